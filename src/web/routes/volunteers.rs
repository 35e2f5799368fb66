use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::services::volunteer_service::{self, NewVolunteerInput, VolunteerPatch};
use crate::web::extract::{IdPath, JsonBody};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::response;

#[derive(Debug, Deserialize, Default)]
pub struct VolunteerListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_volunteers_handler(
    State(pool): State<SqlitePool>,
    Query(query): Query<VolunteerListQuery>,
) -> AppResult<Response> {
    let volunteers = volunteer_service::list_volunteers(&pool, query.limit, query.offset).await?;
    Ok(response::ok(volunteers).into_response())
}

pub async fn volunteer_detail_handler(
    IdPath(id): IdPath,
    State(pool): State<SqlitePool>,
) -> AppResult<Response> {
    let volunteer = volunteer_service::load_volunteer(&pool, id).await?;
    Ok(response::ok(volunteer).into_response())
}

pub async fn create_volunteer_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    JsonBody(input): JsonBody<NewVolunteerInput>,
) -> AppResult<Response> {
    auth_user.require_volunteer_manager()?;
    let volunteer = volunteer_service::create_volunteer(&pool, input).await?;
    Ok((
        StatusCode::CREATED,
        response::ok_with_message("volunteer created", volunteer),
    )
        .into_response())
}

pub async fn update_volunteer_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    IdPath(id): IdPath,
    State(pool): State<SqlitePool>,
    JsonBody(patch): JsonBody<VolunteerPatch>,
) -> AppResult<Response> {
    volunteer_service::ensure_can_edit(&pool, auth_user.id, auth_user.role, id).await?;
    let volunteer = volunteer_service::update_volunteer(&pool, id, patch).await?;
    Ok(response::ok_with_message("volunteer updated", volunteer).into_response())
}

#[derive(Debug, Deserialize)]
pub struct SkillsBody {
    pub skills: String,
}

/// Serves both `/api/volunteers/:id/skills` and the legacy `/update-skills/:id`.
pub async fn update_skills_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    IdPath(id): IdPath,
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<SkillsBody>,
) -> AppResult<Response> {
    volunteer_service::ensure_can_edit(&pool, auth_user.id, auth_user.role, id).await?;
    let volunteer = volunteer_service::update_skills(&pool, id, &body.skills).await?;
    Ok(response::ok_with_message("skills updated", volunteer).into_response())
}
