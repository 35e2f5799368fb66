use sqlx::SqlitePool;

use crate::database::field_update::{self, FieldUpdate};
use crate::models::VolunteersRow;

pub const SQL_LIST_VOLUNTEERS: &str = r#"
SELECT
    id,
    user_id,
    full_name,
    email,
    phone,
    skills,
    availability,
    interest_areas,
    created_at,
    updated_at
FROM volunteers
ORDER BY full_name ASC, id ASC
LIMIT ?1 OFFSET ?2
"#;

pub async fn list_volunteers(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<VolunteersRow>> {
    sqlx::query_as::<_, VolunteersRow>(SQL_LIST_VOLUNTEERS)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}

pub const SQL_LOAD_VOLUNTEER: &str = r#"
SELECT
    id,
    user_id,
    full_name,
    email,
    phone,
    skills,
    availability,
    interest_areas,
    created_at,
    updated_at
FROM volunteers
WHERE id = ?1
LIMIT 1
"#;

pub async fn load_volunteer(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<VolunteersRow>> {
    sqlx::query_as::<_, VolunteersRow>(SQL_LOAD_VOLUNTEER)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct NewVolunteer<'a> {
    pub user_id: Option<i64>,
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub skills: Option<&'a str>,
    pub availability: Option<&'a str>,
    pub interest_areas: &'a str, // JSON array
}

const SQL_INSERT_VOLUNTEER: &str = r#"
INSERT INTO volunteers (
  user_id,
  full_name,
  email,
  phone,
  skills,
  availability,
  interest_areas
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub async fn insert_volunteer(pool: &SqlitePool, v: NewVolunteer<'_>) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_VOLUNTEER)
        .bind(v.user_id)
        .bind(v.full_name)
        .bind(v.email)
        .bind(v.phone)
        .bind(v.skills)
        .bind(v.availability)
        .bind(v.interest_areas)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

pub async fn update_volunteer_fields(
    pool: &SqlitePool,
    id: i64,
    fields: &[FieldUpdate],
) -> sqlx::Result<u64> {
    field_update::update_fields(pool, "volunteers", id, fields).await
}
