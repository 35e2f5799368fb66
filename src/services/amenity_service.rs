use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::database::amenity_repo;
use crate::database::field_update::FieldUpdate;
use crate::error::{AppError, AppResult};
use crate::models::AmenitiesRow;
use crate::services::park_service;

const AMENITY_STATUSES: &[&str] = &["available", "maintenance", "unavailable"];

#[derive(Debug, Deserialize)]
pub struct NewAmenityInput {
    pub park_id: i64,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AmenityPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl AmenityPatch {
    pub fn into_fields(self) -> AppResult<Vec<FieldUpdate>> {
        let mut fields = Vec::new();
        if let Some(name) = self.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::validation("name cannot be empty"));
            }
            fields.push(FieldUpdate::text("name", Some(name)));
        }
        if let Some(category) = self.category {
            fields.push(FieldUpdate::text("category", Some(category.trim().to_string())));
        }
        if let Some(description) = self.description {
            fields.push(FieldUpdate::text("description", Some(description)));
        }
        if let Some(status) = self.status {
            fields.push(FieldUpdate::text("status", Some(parse_status(&status)?)));
        }
        Ok(fields)
    }
}

fn parse_status(raw: &str) -> AppResult<String> {
    let status = raw.trim().to_lowercase();
    if AMENITY_STATUSES.contains(&status.as_str()) {
        Ok(status)
    } else {
        Err(AppError::validation(format!("unknown amenity status: {status}")))
    }
}

pub async fn list_park_amenities(pool: &SqlitePool, park_id: i64) -> AppResult<Vec<AmenitiesRow>> {
    park_service::load_park(pool, park_id).await?;
    Ok(amenity_repo::list_amenities_for_park(pool, park_id).await?)
}

pub async fn load_amenity(pool: &SqlitePool, id: i64) -> AppResult<AmenitiesRow> {
    amenity_repo::load_amenity(pool, id)
        .await?
        .ok_or(AppError::NotFound("amenity"))
}

pub async fn create_amenity(pool: &SqlitePool, input: NewAmenityInput) -> AppResult<AmenitiesRow> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name is required"));
    }
    let status = match input.status.as_deref() {
        Some(raw) => parse_status(raw)?,
        None => "available".to_string(),
    };
    let category = input.category.as_deref().map(str::trim).filter(|s| !s.is_empty());

    // A missing park surfaces as a foreign-key violation.
    let id = amenity_repo::insert_amenity(
        pool,
        amenity_repo::NewAmenity {
            park_id: input.park_id,
            name,
            category,
            description: input.description.as_deref(),
            status: &status,
        },
    )
    .await?;

    info!(amenity_id = id, park_id = input.park_id, "amenity created");
    load_amenity(pool, id).await
}

pub async fn update_amenity(
    pool: &SqlitePool,
    id: i64,
    patch: AmenityPatch,
) -> AppResult<AmenitiesRow> {
    let fields = patch.into_fields()?;
    if fields.is_empty() {
        return Err(AppError::validation("no fields to update"));
    }
    if amenity_repo::update_amenity_fields(pool, id, &fields).await? == 0 {
        return Err(AppError::NotFound("amenity"));
    }
    info!(amenity_id = id, "amenity updated");
    load_amenity(pool, id).await
}
