use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

use crate::database::field_update::FieldUpdate;
use crate::database::volunteer_repo;
use crate::error::{AppError, AppResult};
use crate::models::{Role, VolunteersRow};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VolunteerView {
    pub id: i64,
    pub user_id: Option<i64>,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<String>,
    pub availability: Option<String>,
    pub interest_areas: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<VolunteersRow> for VolunteerView {
    fn from(row: VolunteersRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            skills: row.skills,
            availability: row.availability,
            interest_areas: parse_interest_areas(row.interest_areas.as_deref().unwrap_or("[]")),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewVolunteerInput {
    pub user_id: Option<i64>,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<String>,
    pub availability: Option<String>,
    #[serde(default)]
    pub interest_areas: Vec<String>,
}

/// Partial update. Only `Some` fields are written.
#[derive(Debug, Default, Deserialize)]
pub struct VolunteerPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<String>,
    pub availability: Option<String>,
    pub interest_areas: Option<Vec<String>>,
}

impl VolunteerPatch {
    pub fn into_fields(self) -> AppResult<Vec<FieldUpdate>> {
        let mut fields = Vec::new();
        if let Some(name) = self.full_name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::validation("full_name cannot be empty"));
            }
            fields.push(FieldUpdate::text("full_name", Some(name)));
        }
        if let Some(email) = self.email {
            fields.push(FieldUpdate::text("email", normalize_optional(email)));
        }
        if let Some(phone) = self.phone {
            fields.push(FieldUpdate::text("phone", normalize_optional(phone)));
        }
        if let Some(skills) = self.skills {
            fields.push(FieldUpdate::text("skills", Some(skills.trim().to_string())));
        }
        if let Some(availability) = self.availability {
            fields.push(FieldUpdate::text("availability", normalize_optional(availability)));
        }
        if let Some(areas) = self.interest_areas {
            fields.push(FieldUpdate::text(
                "interest_areas",
                Some(encode_interest_areas(&areas)),
            ));
        }
        Ok(fields)
    }
}

pub async fn list_volunteers(
    pool: &SqlitePool,
    limit: Option<i64>,
    offset: Option<i64>,
) -> AppResult<Vec<VolunteerView>> {
    let limit = limit.unwrap_or(100).clamp(1, 500);
    let offset = offset.unwrap_or(0).max(0);
    let rows = volunteer_repo::list_volunteers(pool, limit, offset).await?;
    Ok(rows.into_iter().map(VolunteerView::from).collect())
}

pub async fn load_volunteer(pool: &SqlitePool, id: i64) -> AppResult<VolunteerView> {
    volunteer_repo::load_volunteer(pool, id)
        .await?
        .map(VolunteerView::from)
        .ok_or(AppError::NotFound("volunteer"))
}

pub async fn create_volunteer(
    pool: &SqlitePool,
    input: NewVolunteerInput,
) -> AppResult<VolunteerView> {
    let full_name = input.full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::validation("full_name is required"));
    }
    let email = input.email.and_then(normalize_optional);
    let phone = input.phone.and_then(normalize_optional);
    let availability = input.availability.and_then(normalize_optional);
    let skills = input.skills.map(|s| s.trim().to_string());
    let interest_areas = encode_interest_areas(&input.interest_areas);

    let id = volunteer_repo::insert_volunteer(
        pool,
        volunteer_repo::NewVolunteer {
            user_id: input.user_id,
            full_name,
            email: email.as_deref(),
            phone: phone.as_deref(),
            skills: skills.as_deref(),
            availability: availability.as_deref(),
            interest_areas: &interest_areas,
        },
    )
    .await?;

    info!(volunteer_id = id, "volunteer created");
    load_volunteer(pool, id).await
}

/// Applies the patch to exactly one volunteer and returns the stored row.
pub async fn update_volunteer(
    pool: &SqlitePool,
    id: i64,
    patch: VolunteerPatch,
) -> AppResult<VolunteerView> {
    let fields = patch.into_fields()?;
    if fields.is_empty() {
        return Err(AppError::validation("no fields to update"));
    }

    let affected = volunteer_repo::update_volunteer_fields(pool, id, &fields).await?;
    if affected == 0 {
        return Err(AppError::NotFound("volunteer"));
    }

    info!(volunteer_id = id, fields = fields.len(), "volunteer updated");
    load_volunteer(pool, id).await
}

/// The only code path that changes a volunteer's skills.
pub async fn update_skills(pool: &SqlitePool, id: i64, skills: &str) -> AppResult<VolunteerView> {
    update_volunteer(
        pool,
        id,
        VolunteerPatch {
            skills: Some(skills.to_string()),
            ..Default::default()
        },
    )
    .await
}

/// Managers edit anyone; other users only the volunteer linked to them.
pub async fn ensure_can_edit(
    pool: &SqlitePool,
    actor_id: i64,
    actor_role: Role,
    volunteer_id: i64,
) -> AppResult<()> {
    if actor_role.can_manage_volunteers() {
        return Ok(());
    }
    let row = volunteer_repo::load_volunteer(pool, volunteer_id)
        .await?
        .ok_or(AppError::NotFound("volunteer"))?;
    if row.user_id == Some(actor_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

fn normalize_optional(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trimmed, non-empty, first spelling wins on case-insensitive duplicates.
pub fn normalize_interest_areas(areas: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    areas
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(|s| s.to_string())
        .collect()
}

fn encode_interest_areas(areas: &[String]) -> String {
    serde_json::to_string(&normalize_interest_areas(areas)).unwrap_or_else(|_| "[]".to_string())
}

/// Older rows hold `null`, a bare string or an array of objects with a
/// `name` key. Anything unreadable is an empty list.
pub fn parse_interest_areas(raw: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(raw.trim()) else {
        return vec![];
    };
    let Some(array) = value.as_array() else {
        return vec![];
    };

    let names: Vec<String> = array
        .iter()
        .filter_map(|v| {
            v.as_str()
                .or_else(|| v.get("name").and_then(|n| n.as_str()))
                .map(|s| s.to_string())
        })
        .collect();
    normalize_interest_areas(&names)
}
