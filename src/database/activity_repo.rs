use sqlx::SqlitePool;

use crate::database::field_update::{self, FieldUpdate};
use crate::models::ActivitiesRow;

const SQL_LIST_ACTIVITIES_FOR_PARK: &str = r#"
SELECT
  id,
  park_id,
  title,
  description,
  category,
  start_date,
  end_date,
  capacity,
  created_by,
  created_at,
  updated_at
FROM activities
WHERE park_id = ?
ORDER BY COALESCE(start_date, '9999') ASC, id ASC
"#;

pub async fn list_activities_for_park(
    pool: &SqlitePool,
    park_id: i64,
) -> sqlx::Result<Vec<ActivitiesRow>> {
    sqlx::query_as::<_, ActivitiesRow>(SQL_LIST_ACTIVITIES_FOR_PARK)
        .bind(park_id)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_ACTIVITY: &str = r#"
SELECT
  id,
  park_id,
  title,
  description,
  category,
  start_date,
  end_date,
  capacity,
  created_by,
  created_at,
  updated_at
FROM activities
WHERE id = ?
LIMIT 1
"#;

pub async fn load_activity(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<ActivitiesRow>> {
    sqlx::query_as::<_, ActivitiesRow>(SQL_LOAD_ACTIVITY)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_activity_fields(
    pool: &SqlitePool,
    id: i64,
    fields: &[FieldUpdate],
) -> sqlx::Result<u64> {
    field_update::update_fields(pool, "activities", id, fields).await
}
