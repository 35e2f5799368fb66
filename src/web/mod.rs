use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::auth_service::AuthSettings;

pub mod extract;
pub mod middleware;
pub mod response;
pub mod routes;

use self::middleware::auth as auth_middleware;
use self::routes::{activities, advertisements, amenities, auth, parks, volunteers};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub auth: Arc<AuthSettings>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> AppResult<Self> {
        let auth = AuthSettings::new(config.session_ttl_hours, config.bcrypt_cost)?;
        Ok(Self {
            pool,
            config: Arc::new(config),
            auth: Arc::new(auth),
        })
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<AuthSettings> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

pub fn build_router(state: AppState) -> Router {
    // Writes. Every route here sees an AuthenticatedUser extension.
    let protected_routes = Router::new()
        .route("/api/auth/logout", post(auth::logout_handler))
        .route("/api/auth/me", get(auth::me_handler))
        .route("/api/volunteers", post(volunteers::create_volunteer_handler))
        .route("/api/volunteers/:id", put(volunteers::update_volunteer_handler))
        .route(
            "/api/volunteers/:id/skills",
            post(volunteers::update_skills_handler),
        )
        // Legacy path used by the old admin pages.
        .route("/update-skills/:id", post(volunteers::update_skills_handler))
        .route("/api/parks/:id", put(parks::update_park_handler))
        .route("/api/activities/:id", put(activities::update_activity_handler))
        .route("/amenities", post(amenities::create_amenity_handler))
        .route("/amenities/:id", put(amenities::update_amenity_handler))
        .layer(from_fn_with_state(
            state.pool.clone(),
            auth_middleware::require_auth,
        ));

    Router::new()
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/volunteers", get(volunteers::list_volunteers_handler))
        .route("/api/volunteers/:id", get(volunteers::volunteer_detail_handler))
        .route("/api/parks", get(parks::list_parks_handler))
        .route("/api/parks/:id", get(parks::park_detail_handler))
        .route(
            "/api/parks/:id/activities",
            get(activities::park_activities_handler),
        )
        .route("/api/parks/:id/assets", get(parks::park_assets_handler))
        .route(
            "/api/parks/:id/amenities",
            get(amenities::park_amenities_handler),
        )
        .route("/api/activities/:id", get(activities::activity_detail_handler))
        .route("/api/assets/:id", get(parks::asset_detail_handler))
        .route(
            "/api/advertisements",
            get(advertisements::list_advertisements_handler),
        )
        .merge(protected_routes)
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
