use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use parksys::database::{self, schema};
use parksys::Config;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match database::open_pool(&config.database_url, 1).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("cannot connect to {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = schema::ensure_schema(&pool).await {
        eprintln!("schema update failed: {}", e);
        std::process::exit(1);
    }

    match schema::run_backfills(&pool).await {
        Ok(report) => {
            println!(
                "migrate: interest_areas backfilled={}, expired sessions removed={}",
                report.interest_areas, report.expired_sessions
            );
        }
        Err(e) => {
            eprintln!("backfill failed: {}", e);
            std::process::exit(1);
        }
    }

    pool.close().await;
}
