use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use cookie::Cookie;
use sqlx::SqlitePool;
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::models::Role;
use crate::services::auth_service;

pub const SESSION_COOKIE: &str = "session_token";

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub token: String,
}

impl AuthenticatedUser {
    pub fn require_catalog_editor(&self) -> AppResult<()> {
        if self.role.can_edit_catalog() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    pub fn require_volunteer_manager(&self) -> AppResult<()> {
        if self.role.can_manage_volunteers() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// Session token from the `session_token` cookie, else from an
/// `Authorization: Bearer` header.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|hv| hv.to_str().ok())
        .flat_map(|raw| Cookie::split_parse(raw))
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|hv| hv.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

pub async fn require_auth(
    State(pool): State<SqlitePool>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_session_token(request.headers()) else {
        return AppError::Unauthorized.into_response();
    };

    match auth_service::resolve_session(&pool, &token).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(AuthenticatedUser {
                id: user.id,
                username: user.username,
                role: user.role,
                token,
            });
            next.run(request).await
        }
        Ok(None) => AppError::Unauthorized.into_response(),
        Err(e) => {
            warn!("Session lookup failed: {}", e);
            AppError::from(e).into_response()
        }
    }
}
