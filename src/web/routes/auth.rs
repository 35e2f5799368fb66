use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Extension,
};
use cookie::Cookie;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::services::auth_service::{self, AuthSettings};
use crate::web::extract::JsonBody;
use crate::web::middleware::auth::{AuthenticatedUser, SESSION_COOKIE};
use crate::web::response;

/// Accepts `identifier`, `username` or `email` for the login name.
#[derive(Deserialize)]
pub struct LoginRequest {
    identifier: Option<String>,
    username: Option<String>,
    email: Option<String>,
    #[serde(default)]
    password: String,
}

impl LoginRequest {
    fn login_name(&self) -> &str {
        self.identifier
            .as_deref()
            .or(self.username.as_deref())
            .or(self.email.as_deref())
            .unwrap_or("")
    }
}

fn session_cookie(token: String, ttl_hours: i64) -> Cookie<'static> {
    let mut session = Cookie::new(SESSION_COOKIE, token);
    session.set_path("/");
    session.set_http_only(true);
    session.set_same_site(cookie::SameSite::Lax);
    session.set_max_age(cookie::time::Duration::hours(ttl_hours));
    session
}

fn set_cookie_header(cookie: &Cookie<'_>) -> AppResult<HeaderMap> {
    let value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| AppError::Internal(format!("bad cookie header: {e}")))?;
    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, value);
    Ok(headers)
}

pub async fn login_handler(
    State(pool): State<SqlitePool>,
    State(settings): State<Arc<AuthSettings>>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> AppResult<Response> {
    let outcome =
        auth_service::authenticate(&pool, &settings, body.login_name(), &body.password).await?;

    let headers = set_cookie_header(&session_cookie(
        outcome.token.clone(),
        settings.session_ttl_hours,
    ))?;
    Ok((headers, response::ok(outcome)).into_response())
}

pub async fn logout_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
) -> AppResult<Response> {
    if let Err(e) = auth_service::logout(&pool, &auth_user.token).await {
        warn!("Logout failed for user {}: {}", auth_user.id, e);
        return Err(e.into());
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    let headers = set_cookie_header(&removal)?;
    Ok((headers, response::ok_with_message("logged out", ())).into_response())
}

pub async fn me_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
) -> AppResult<Response> {
    let user = auth_service::load_public_user(&pool, auth_user.id).await?;
    Ok(response::ok(user).into_response())
}
