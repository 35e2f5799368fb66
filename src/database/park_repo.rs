use sqlx::SqlitePool;

use crate::database::field_update::{self, FieldUpdate};
use crate::models::ParksRow;

const SQL_LIST_PARKS: &str = r#"
SELECT
  id,
  name,
  address,
  municipality_id,
  description,
  status,
  created_at,
  updated_at
FROM parks
WHERE (?1 IS NULL OR municipality_id = ?1)
ORDER BY name ASC
"#;

pub async fn list_parks(
    pool: &SqlitePool,
    municipality_id: Option<i64>,
) -> sqlx::Result<Vec<ParksRow>> {
    sqlx::query_as::<_, ParksRow>(SQL_LIST_PARKS)
        .bind(municipality_id)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_PARK: &str = r#"
SELECT
  id,
  name,
  address,
  municipality_id,
  description,
  status,
  created_at,
  updated_at
FROM parks
WHERE id = ?1
LIMIT 1
"#;

pub async fn load_park(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<ParksRow>> {
    sqlx::query_as::<_, ParksRow>(SQL_LOAD_PARK)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_park_fields(
    pool: &SqlitePool,
    id: i64,
    fields: &[FieldUpdate],
) -> sqlx::Result<u64> {
    field_update::update_fields(pool, "parks", id, fields).await
}
