use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Extension,
};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::services::activity_service::{self, ActivityPatch};
use crate::web::extract::{IdPath, JsonBody};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::response;

pub async fn park_activities_handler(
    IdPath(park_id): IdPath,
    State(pool): State<SqlitePool>,
) -> AppResult<Response> {
    let activities = activity_service::list_park_activities(&pool, park_id).await?;
    Ok(response::ok(activities).into_response())
}

pub async fn activity_detail_handler(
    IdPath(id): IdPath,
    State(pool): State<SqlitePool>,
) -> AppResult<Response> {
    let activity = activity_service::load_activity(&pool, id).await?;
    Ok(response::ok(activity).into_response())
}

pub async fn update_activity_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    IdPath(id): IdPath,
    State(pool): State<SqlitePool>,
    JsonBody(patch): JsonBody<ActivityPatch>,
) -> AppResult<Response> {
    auth_user.require_catalog_editor()?;
    let activity = activity_service::update_activity(&pool, id, patch).await?;
    Ok(response::ok_with_message("activity updated", activity).into_response())
}
