use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub mod activity_repo;
pub mod advertisement_repo;
pub mod amenity_repo;
pub mod asset_repo;
pub mod field_update;
pub mod park_repo;
pub mod schema;
pub mod session_repo;
pub mod user_repo;
pub mod volunteer_repo;

/// Opens the shared pool. Foreign keys are enforced on every connection.
///
/// In-memory databases live only as long as their connection, so for those
/// the pool never retires idle connections.
pub async fn open_pool(database_url: &str, max_connections: u32) -> sqlx::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections.max(1));
    if database_url.contains(":memory:") {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    pool_options.connect_with(options).await
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = open_pool("sqlite::memory:", 1).await.unwrap();
    schema::ensure_schema(&pool).await.unwrap();
    pool
}
