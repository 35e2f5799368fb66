//! ParkSys: JSON backend for the municipal parks dashboard and public site.
//!
//! Requests flow `web::routes` -> `services` -> `database` repos -> the shared
//! `SqlitePool`, which is created once in `main` and handed to the router as
//! state.

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod web;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use web::{build_router, AppState};
