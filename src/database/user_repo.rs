use sqlx::SqlitePool;

use crate::models::UsersRow;

pub const SQL_FIND_LOGIN_CANDIDATE: &str = r#"
SELECT
    id,
    username,
    email,
    full_name,
    role,
    municipality_id,
    password_hash
FROM users
WHERE (username = ?1 OR LOWER(email) = LOWER(?1))
  AND (is_deleted = 0 OR is_deleted IS NULL)
ORDER BY (username = ?1) DESC, id ASC
LIMIT 1
"#;

pub async fn find_login_candidate(
    pool: &SqlitePool,
    identifier: &str,
) -> sqlx::Result<Option<UsersRow>> {
    sqlx::query_as::<_, UsersRow>(SQL_FIND_LOGIN_CANDIDATE)
        .bind(identifier)
        .fetch_optional(pool)
        .await
}

pub const SQL_LOAD_USER: &str = r#"
SELECT
    id,
    username,
    email,
    full_name,
    role,
    municipality_id,
    password_hash
FROM users
WHERE id = ?1
  AND (is_deleted = 0 OR is_deleted IS NULL)
LIMIT 1
"#;

pub async fn load_user(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Option<UsersRow>> {
    sqlx::query_as::<_, UsersRow>(SQL_LOAD_USER)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub full_name: &'a str,
    pub role: &'a str,
    pub municipality_id: Option<i64>,
    pub password_hash: &'a str,
}

const SQL_INSERT_USER: &str = r#"
INSERT INTO users (
  username,
  email,
  full_name,
  role,
  municipality_id,
  password_hash
) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub async fn insert_user(pool: &SqlitePool, user: NewUser<'_>) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_USER)
        .bind(user.username)
        .bind(user.email)
        .bind(user.full_name)
        .bind(user.role)
        .bind(user.municipality_id)
        .bind(user.password_hash)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    async fn seed(pool: &SqlitePool) -> i64 {
        insert_user(
            pool,
            NewUser {
                username: "Luis",
                email: "luis@parques.example",
                full_name: "Luis Pérez",
                role: "admin",
                municipality_id: Some(1),
                password_hash: "$2b$04$placeholder",
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn finds_by_username_or_email() {
        let pool = test_pool().await;
        let id = seed(&pool).await;

        let by_name = find_login_candidate(&pool, "Luis").await.unwrap().unwrap();
        assert_eq!(by_name.id, id);

        let by_email = find_login_candidate(&pool, "LUIS@parques.example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, id);
    }

    #[tokio::test]
    async fn username_match_wins_over_email_match() {
        let pool = test_pool().await;
        let email_owner = seed(&pool).await;
        let name_owner = insert_user(
            &pool,
            NewUser {
                username: "luis@parques.example",
                email: "otro@parques.example",
                full_name: "",
                role: "viewer",
                municipality_id: None,
                password_hash: "$2b$04$placeholder",
            },
        )
        .await
        .unwrap();
        assert!(email_owner < name_owner);

        let found = find_login_candidate(&pool, "luis@parques.example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, name_owner);
    }

    #[tokio::test]
    async fn soft_deleted_users_are_invisible() {
        let pool = test_pool().await;
        let id = seed(&pool).await;
        sqlx::query("UPDATE users SET is_deleted = 1 WHERE id = ?1")
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();

        assert!(find_login_candidate(&pool, "Luis").await.unwrap().is_none());
        assert!(load_user(&pool, id).await.unwrap().is_none());
    }
}
