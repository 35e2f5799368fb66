use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::database::field_update::FieldUpdate;
use crate::database::{asset_repo, park_repo};
use crate::error::{AppError, AppResult};
use crate::models::{AssetsRow, ParksRow};

const PARK_STATUSES: &[&str] = &["active", "maintenance", "closed"];

#[derive(Debug, Default, Deserialize)]
pub struct ParkPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl ParkPatch {
    pub fn into_fields(self) -> AppResult<Vec<FieldUpdate>> {
        let mut fields = Vec::new();
        if let Some(name) = self.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::validation("name cannot be empty"));
            }
            fields.push(FieldUpdate::text("name", Some(name)));
        }
        if let Some(address) = self.address {
            fields.push(FieldUpdate::text("address", Some(address.trim().to_string())));
        }
        if let Some(description) = self.description {
            fields.push(FieldUpdate::text("description", Some(description)));
        }
        if let Some(status) = self.status {
            let status = status.trim().to_lowercase();
            if !PARK_STATUSES.contains(&status.as_str()) {
                return Err(AppError::validation(format!("unknown park status: {status}")));
            }
            fields.push(FieldUpdate::text("status", Some(status)));
        }
        Ok(fields)
    }
}

pub async fn list_parks(pool: &SqlitePool, municipality_id: Option<i64>) -> AppResult<Vec<ParksRow>> {
    Ok(park_repo::list_parks(pool, municipality_id).await?)
}

pub async fn load_park(pool: &SqlitePool, id: i64) -> AppResult<ParksRow> {
    park_repo::load_park(pool, id)
        .await?
        .ok_or(AppError::NotFound("park"))
}

pub async fn update_park(pool: &SqlitePool, id: i64, patch: ParkPatch) -> AppResult<ParksRow> {
    let fields = patch.into_fields()?;
    if fields.is_empty() {
        return Err(AppError::validation("no fields to update"));
    }
    if park_repo::update_park_fields(pool, id, &fields).await? == 0 {
        return Err(AppError::NotFound("park"));
    }
    info!(park_id = id, "park updated");
    load_park(pool, id).await
}

/// 404 when the park itself is unknown, so an empty list always means a
/// park without assets.
pub async fn list_park_assets(pool: &SqlitePool, park_id: i64) -> AppResult<Vec<AssetsRow>> {
    load_park(pool, park_id).await?;
    Ok(asset_repo::list_assets_for_park(pool, park_id).await?)
}

pub async fn load_asset(pool: &SqlitePool, id: i64) -> AppResult<AssetsRow> {
    asset_repo::load_asset(pool, id)
        .await?
        .ok_or(AppError::NotFound("asset"))
}
