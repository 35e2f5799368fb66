use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::services::advertisement_service;
use crate::web::response;

#[derive(Debug, Deserialize, Default)]
pub struct AdvertisementQuery {
    pub placement: Option<String>,
    pub limit: Option<i64>,
}

pub async fn list_advertisements_handler(
    State(pool): State<SqlitePool>,
    Query(query): Query<AdvertisementQuery>,
) -> AppResult<Response> {
    let ads = advertisement_service::list_active_advertisements(
        &pool,
        query.placement.as_deref(),
        query.limit,
    )
    .await?;
    Ok(response::ok(ads).into_response())
}
