//! Seeds a user account.
//!
//! ```sh
//! create_user <username> <email> <password> [role] [full name...]
//! ```

use std::env;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use parksys::database::{self, schema};
use parksys::models::Role;
use parksys::services::auth_service::{self, NewUserInput};
use parksys::Config;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("usage: create_user <username> <email> <password> [role] [full name...]");
        std::process::exit(2);
    }

    let role = match args.get(3).map(|r| r.parse::<Role>()) {
        Some(Ok(role)) => role,
        Some(Err(e)) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
        None => Role::Viewer,
    };

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

    let input = NewUserInput {
        username: args[0].clone(),
        email: args[1].clone(),
        password: args[2].clone(),
        role,
        full_name: args.get(4..).map(|rest| rest.join(" ")).unwrap_or_default(),
        municipality_id: None,
    };

    match auth_service::create_user(&pool, input, config.bcrypt_cost).await {
        Ok(user) => println!("created user {} ({}) as {}", user.username, user.id, user.role),
        Err(e) => {
            eprintln!("create_user failed: {}", e);
            std::process::exit(1);
        }
    }

    pool.close().await;
}
