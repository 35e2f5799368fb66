use sqlx::SqlitePool;

use crate::database::field_update::{self, FieldUpdate};
use crate::models::AmenitiesRow;

const SQL_LIST_AMENITIES_FOR_PARK: &str = r#"
SELECT
  id,
  park_id,
  name,
  category,
  description,
  status,
  created_at,
  updated_at
FROM amenities
WHERE park_id = ?
ORDER BY COALESCE(NULLIF(TRIM(category), ''), 'zzz') ASC, name ASC
"#;

pub async fn list_amenities_for_park(
    pool: &SqlitePool,
    park_id: i64,
) -> sqlx::Result<Vec<AmenitiesRow>> {
    sqlx::query_as::<_, AmenitiesRow>(SQL_LIST_AMENITIES_FOR_PARK)
        .bind(park_id)
        .fetch_all(pool)
        .await
}

const SQL_LOAD_AMENITY: &str = r#"
SELECT
  id,
  park_id,
  name,
  category,
  description,
  status,
  created_at,
  updated_at
FROM amenities
WHERE id = ?
LIMIT 1
"#;

pub async fn load_amenity(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<AmenitiesRow>> {
    sqlx::query_as::<_, AmenitiesRow>(SQL_LOAD_AMENITY)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct NewAmenity<'a> {
    pub park_id: i64,
    pub name: &'a str,
    pub category: Option<&'a str>,
    pub description: Option<&'a str>,
    pub status: &'a str,
}

const SQL_INSERT_AMENITY: &str = r#"
INSERT INTO amenities (
  park_id,
  name,
  category,
  description,
  status
) VALUES (?, ?, ?, ?, ?)
"#;

pub async fn insert_amenity(pool: &SqlitePool, a: NewAmenity<'_>) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_AMENITY)
        .bind(a.park_id)
        .bind(a.name)
        .bind(a.category)
        .bind(a.description)
        .bind(a.status)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

pub async fn update_amenity_fields(
    pool: &SqlitePool,
    id: i64,
    fields: &[FieldUpdate],
) -> sqlx::Result<u64> {
    field_update::update_fields(pool, "amenities", id, fields).await
}
