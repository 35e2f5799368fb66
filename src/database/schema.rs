use sqlx::SqlitePool;
use tracing::info;

const SQL_CREATE_TABLES: &[&str] = &[
    r#"
CREATE TABLE IF NOT EXISTS users (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  username TEXT NOT NULL UNIQUE,
  email TEXT NOT NULL UNIQUE,
  full_name TEXT NOT NULL DEFAULT '',
  role TEXT NOT NULL DEFAULT 'viewer',
  municipality_id INTEGER,
  password_hash TEXT NOT NULL,
  is_deleted INTEGER NOT NULL DEFAULT 0,
  created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
  updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS sessions (
  token TEXT PRIMARY KEY,
  user_id INTEGER NOT NULL REFERENCES users(id),
  created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
  expires_at TEXT NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS volunteers (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  user_id INTEGER REFERENCES users(id),
  full_name TEXT NOT NULL,
  email TEXT,
  phone TEXT,
  skills TEXT,
  availability TEXT,
  interest_areas TEXT NOT NULL DEFAULT '[]',
  created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
  updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS parks (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL,
  address TEXT,
  municipality_id INTEGER,
  description TEXT,
  status TEXT NOT NULL DEFAULT 'active',
  created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
  updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS activities (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  park_id INTEGER NOT NULL REFERENCES parks(id),
  title TEXT NOT NULL,
  description TEXT,
  category TEXT,
  start_date TEXT,
  end_date TEXT,
  capacity INTEGER,
  created_by INTEGER REFERENCES users(id),
  created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
  updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS assets (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  park_id INTEGER NOT NULL REFERENCES parks(id),
  name TEXT NOT NULL,
  category TEXT,
  condition TEXT,
  status TEXT NOT NULL DEFAULT 'active',
  created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
  updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS advertisements (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  title TEXT NOT NULL,
  image_url TEXT,
  target_url TEXT,
  placement TEXT NOT NULL DEFAULT 'sidebar',
  is_active INTEGER NOT NULL DEFAULT 1,
  created_by INTEGER REFERENCES users(id),
  created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
  updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS amenities (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  park_id INTEGER NOT NULL REFERENCES parks(id),
  name TEXT NOT NULL,
  category TEXT,
  description TEXT,
  status TEXT NOT NULL DEFAULT 'available',
  created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
  updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#,
    "CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_activities_park ON activities(park_id)",
    "CREATE INDEX IF NOT EXISTS idx_assets_park ON assets(park_id)",
    "CREATE INDEX IF NOT EXISTS idx_amenities_park ON amenities(park_id)",
];

/// Columns that were added after the first deployments. Older databases get
/// them through `ensure_column`; fresh ones already have them.
pub const COLUMN_PATCHES: &[(&str, &str, &str)] = &[
    ("users", "municipality_id", "INTEGER"),
    ("users", "is_deleted", "INTEGER NOT NULL DEFAULT 0"),
    ("volunteers", "availability", "TEXT"),
    ("volunteers", "interest_areas", "TEXT NOT NULL DEFAULT '[]'"),
    ("advertisements", "placement", "TEXT NOT NULL DEFAULT 'sidebar'"),
    ("amenities", "status", "TEXT NOT NULL DEFAULT 'available'"),
];

const SQL_COLUMN_EXISTS: &str = r#"
SELECT COUNT(*)
FROM pragma_table_info(?1)
WHERE name = ?2
"#;

pub async fn column_exists(pool: &SqlitePool, table: &str, column: &str) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar(SQL_COLUMN_EXISTS)
        .bind(table)
        .bind(column)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Adds `column` to `table` unless it is already there. Returns whether an
/// ALTER TABLE ran.
pub async fn ensure_column(
    pool: &SqlitePool,
    table: &'static str,
    column: &'static str,
    definition: &'static str,
) -> sqlx::Result<bool> {
    if column_exists(pool, table, column).await? {
        return Ok(false);
    }

    let sql = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, definition);
    sqlx::query(&sql).execute(pool).await?;
    info!(table, column, "added missing column");
    Ok(true)
}

pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    for &statement in SQL_CREATE_TABLES {
        sqlx::query(statement).execute(pool).await?;
    }
    for &(table, column, definition) in COLUMN_PATCHES {
        ensure_column(pool, table, column, definition).await?;
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct BackfillReport {
    pub interest_areas: u64,
    pub expired_sessions: u64,
}

const SQL_BACKFILL_INTEREST_AREAS: &str = r#"
UPDATE volunteers
SET interest_areas = '[]'
WHERE interest_areas IS NULL
   OR TRIM(interest_areas) = ''
"#;

const SQL_DELETE_EXPIRED_SESSIONS: &str = r#"
DELETE FROM sessions
WHERE expires_at <= datetime('now')
"#;

/// Data fixes that accompany the column patches.
pub async fn run_backfills(pool: &SqlitePool) -> sqlx::Result<BackfillReport> {
    let interest_areas = sqlx::query(SQL_BACKFILL_INTEREST_AREAS)
        .execute(pool)
        .await?
        .rows_affected();
    let expired_sessions = sqlx::query(SQL_DELETE_EXPIRED_SESSIONS)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(BackfillReport {
        interest_areas,
        expired_sessions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::open_pool;

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let pool = open_pool("sqlite::memory:", 1).await.unwrap();
        ensure_schema(&pool).await.unwrap();
        ensure_schema(&pool).await.unwrap();
        assert!(column_exists(&pool, "volunteers", "interest_areas").await.unwrap());
    }

    #[tokio::test]
    async fn ensure_column_adds_once() {
        let pool = open_pool("sqlite::memory:", 1).await.unwrap();
        sqlx::query("CREATE TABLE legacy_volunteers (id INTEGER PRIMARY KEY, full_name TEXT)")
            .execute(&pool)
            .await
            .unwrap();

        assert!(ensure_column(&pool, "legacy_volunteers", "skills", "TEXT").await.unwrap());
        assert!(!ensure_column(&pool, "legacy_volunteers", "skills", "TEXT").await.unwrap());
        assert!(column_exists(&pool, "legacy_volunteers", "skills").await.unwrap());
    }

    #[tokio::test]
    async fn backfill_fills_blank_interest_areas() {
        let pool = open_pool("sqlite::memory:", 1).await.unwrap();
        ensure_schema(&pool).await.unwrap();
        sqlx::query("INSERT INTO volunteers (full_name, interest_areas) VALUES ('Ana', '  ')")
            .execute(&pool)
            .await
            .unwrap();

        let report = run_backfills(&pool).await.unwrap();
        assert_eq!(report.interest_areas, 1);

        let stored: String = sqlx::query_scalar("SELECT interest_areas FROM volunteers")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored, "[]");
    }
}
