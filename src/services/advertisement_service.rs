use sqlx::SqlitePool;

use crate::database::advertisement_repo;
use crate::error::AppResult;
use crate::models::AdvertisementsRow;

pub async fn list_active_advertisements(
    pool: &SqlitePool,
    placement: Option<&str>,
    limit: Option<i64>,
) -> AppResult<Vec<AdvertisementsRow>> {
    let placement = placement.map(str::trim).filter(|p| !p.is_empty());
    let limit = limit.unwrap_or(20).clamp(1, 100);
    Ok(advertisement_repo::list_active(pool, placement, limit).await?)
}
