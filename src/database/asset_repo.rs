use sqlx::SqlitePool;

use crate::models::AssetsRow;

const SQL_LIST_ASSETS_FOR_PARK: &str = r#"
SELECT
  id,
  park_id,
  name,
  category,
  condition,
  status,
  created_at,
  updated_at
FROM assets
WHERE park_id = ?
ORDER BY name ASC
"#;

pub async fn list_assets_for_park(pool: &SqlitePool, park_id: i64) -> sqlx::Result<Vec<AssetsRow>> {
    sqlx::query_as::<_, AssetsRow>(SQL_LIST_ASSETS_FOR_PARK)
        .bind(park_id)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_ASSET: &str = r#"
SELECT
  id,
  park_id,
  name,
  category,
  condition,
  status,
  created_at,
  updated_at
FROM assets
WHERE id = ?
LIMIT 1
"#;

pub async fn load_asset(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<AssetsRow>> {
    sqlx::query_as::<_, AssetsRow>(SQL_LOAD_ASSET)
        .bind(id)
        .fetch_optional(pool)
        .await
}
