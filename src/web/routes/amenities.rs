use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension,
};
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::services::amenity_service::{self, AmenityPatch, NewAmenityInput};
use crate::web::extract::{IdPath, JsonBody};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::response;

pub async fn park_amenities_handler(
    IdPath(park_id): IdPath,
    State(pool): State<SqlitePool>,
) -> AppResult<Response> {
    let amenities = amenity_service::list_park_amenities(&pool, park_id).await?;
    Ok(response::ok(amenities).into_response())
}

pub async fn create_amenity_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    JsonBody(input): JsonBody<NewAmenityInput>,
) -> AppResult<Response> {
    auth_user.require_catalog_editor()?;
    let amenity = amenity_service::create_amenity(&pool, input).await?;
    Ok((
        StatusCode::CREATED,
        response::ok_with_message("amenity created", amenity),
    )
        .into_response())
}

pub async fn update_amenity_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    IdPath(id): IdPath,
    State(pool): State<SqlitePool>,
    JsonBody(patch): JsonBody<AmenityPatch>,
) -> AppResult<Response> {
    auth_user.require_catalog_editor()?;
    let amenity = amenity_service::update_amenity(&pool, id, patch).await?;
    Ok(response::ok_with_message("amenity updated", amenity).into_response())
}
