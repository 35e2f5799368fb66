use sqlx::SqlitePool;

use crate::models::SessionUserRow;

const SQL_INSERT_SESSION: &str = r#"
INSERT INTO sessions (
  token,
  user_id,
  expires_at
) VALUES (?1, ?2, datetime('now', ?3))
RETURNING expires_at
"#;

/// Stores the session and returns its expiry timestamp.
pub async fn insert_session(
    pool: &SqlitePool,
    token: &str,
    user_id: i64,
    ttl_hours: i64,
) -> sqlx::Result<String> {
    let modifier = format!("{:+} hours", ttl_hours);
    sqlx::query_scalar::<_, String>(SQL_INSERT_SESSION)
        .bind(token)
        .bind(user_id)
        .bind(modifier)
        .fetch_one(pool)
        .await
}

pub const SQL_LOAD_SESSION_USER: &str = r#"
SELECT
    u.id AS user_id,
    u.username,
    u.role,
    s.expires_at
FROM sessions s
JOIN users u ON u.id = s.user_id
WHERE s.token = ?1
  AND s.expires_at > datetime('now')
  AND (u.is_deleted = 0 OR u.is_deleted IS NULL)
LIMIT 1
"#;

pub async fn load_session_user(
    pool: &SqlitePool,
    token: &str,
) -> sqlx::Result<Option<SessionUserRow>> {
    sqlx::query_as::<_, SessionUserRow>(SQL_LOAD_SESSION_USER)
        .bind(token)
        .fetch_optional(pool)
        .await
}

const SQL_DELETE_SESSION: &str = r#"
DELETE FROM sessions
WHERE token = ?1
"#;

pub async fn delete_session(pool: &SqlitePool, token: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_SESSION)
        .bind(token)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
