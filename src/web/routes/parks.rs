use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Extension,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::services::park_service::{self, ParkPatch};
use crate::web::extract::{IdPath, JsonBody};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::response;

#[derive(Debug, Deserialize, Default)]
pub struct ParkListQuery {
    pub municipality_id: Option<i64>,
}

pub async fn list_parks_handler(
    State(pool): State<SqlitePool>,
    Query(query): Query<ParkListQuery>,
) -> AppResult<Response> {
    let parks = park_service::list_parks(&pool, query.municipality_id).await?;
    Ok(response::ok(parks).into_response())
}

pub async fn park_detail_handler(
    IdPath(id): IdPath,
    State(pool): State<SqlitePool>,
) -> AppResult<Response> {
    let park = park_service::load_park(&pool, id).await?;
    Ok(response::ok(park).into_response())
}

pub async fn update_park_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    IdPath(id): IdPath,
    State(pool): State<SqlitePool>,
    JsonBody(patch): JsonBody<ParkPatch>,
) -> AppResult<Response> {
    auth_user.require_catalog_editor()?;
    let park = park_service::update_park(&pool, id, patch).await?;
    Ok(response::ok_with_message("park updated", park).into_response())
}

pub async fn park_assets_handler(
    IdPath(park_id): IdPath,
    State(pool): State<SqlitePool>,
) -> AppResult<Response> {
    let assets = park_service::list_park_assets(&pool, park_id).await?;
    Ok(response::ok(assets).into_response())
}

pub async fn asset_detail_handler(
    IdPath(id): IdPath,
    State(pool): State<SqlitePool>,
) -> AppResult<Response> {
    let asset = park_service::load_asset(&pool, id).await?;
    Ok(response::ok(asset).into_response())
}
