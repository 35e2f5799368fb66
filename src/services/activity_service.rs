use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::database::activity_repo;
use crate::database::field_update::FieldUpdate;
use crate::error::{AppError, AppResult};
use crate::models::ActivitiesRow;
use crate::services::park_service;

#[derive(Debug, Default, Deserialize)]
pub struct ActivityPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub capacity: Option<i64>,
}

/// Trimmed date from the patch. A blank string clears the column.
fn supplied_date(value: &Option<String>) -> Option<Option<&str>> {
    value
        .as_deref()
        .map(|v| Some(v.trim()).filter(|v| !v.is_empty()))
}

impl ActivityPatch {
    /// Checks the dates the row would hold once this patch is applied.
    fn check_dates(&self, current: Option<&ActivitiesRow>) -> AppResult<()> {
        let start = supplied_date(&self.start_date)
            .unwrap_or_else(|| current.and_then(|row| row.start_date.as_deref()));
        let end = supplied_date(&self.end_date)
            .unwrap_or_else(|| current.and_then(|row| row.end_date.as_deref()));
        if let (Some(start), Some(end)) = (start, end) {
            // ISO dates compare correctly as strings.
            if end < start {
                return Err(AppError::validation("end_date is before start_date"));
            }
        }
        Ok(())
    }

    pub fn into_fields(self) -> AppResult<Vec<FieldUpdate>> {
        self.check_dates(None)?;
        let start_date = supplied_date(&self.start_date).map(|d| d.map(str::to_string));
        let end_date = supplied_date(&self.end_date).map(|d| d.map(str::to_string));

        let mut fields = Vec::new();
        if let Some(title) = self.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(AppError::validation("title cannot be empty"));
            }
            fields.push(FieldUpdate::text("title", Some(title)));
        }
        if let Some(description) = self.description {
            fields.push(FieldUpdate::text("description", Some(description)));
        }
        if let Some(category) = self.category {
            fields.push(FieldUpdate::text("category", Some(category.trim().to_string())));
        }
        if let Some(start) = start_date {
            fields.push(FieldUpdate::text("start_date", start));
        }
        if let Some(end) = end_date {
            fields.push(FieldUpdate::text("end_date", end));
        }
        if let Some(capacity) = self.capacity {
            if capacity < 0 {
                return Err(AppError::validation("capacity cannot be negative"));
            }
            fields.push(FieldUpdate::integer("capacity", capacity));
        }
        Ok(fields)
    }
}

pub async fn list_park_activities(pool: &SqlitePool, park_id: i64) -> AppResult<Vec<ActivitiesRow>> {
    park_service::load_park(pool, park_id).await?;
    Ok(activity_repo::list_activities_for_park(pool, park_id).await?)
}

pub async fn load_activity(pool: &SqlitePool, id: i64) -> AppResult<ActivitiesRow> {
    activity_repo::load_activity(pool, id)
        .await?
        .ok_or(AppError::NotFound("activity"))
}

pub async fn update_activity(
    pool: &SqlitePool,
    id: i64,
    patch: ActivityPatch,
) -> AppResult<ActivitiesRow> {
    // A single date is checked against the other one already stored.
    if patch.start_date.is_some() != patch.end_date.is_some() {
        let current = load_activity(pool, id).await?;
        patch.check_dates(Some(&current))?;
    }
    let fields = patch.into_fields()?;
    if fields.is_empty() {
        return Err(AppError::validation("no fields to update"));
    }
    if activity_repo::update_activity_fields(pool, id, &fields).await? == 0 {
        return Err(AppError::NotFound("activity"));
    }
    info!(activity_id = id, "activity updated");
    load_activity(pool, id).await
}
