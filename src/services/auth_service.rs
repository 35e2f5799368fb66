use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::database::{session_repo, user_repo};
use crate::error::{AppError, AppResult};
use crate::models::{Role, UsersRow};

/// User as exposed over the API. There is no password field to leak.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub municipality_id: Option<i64>,
}

impl From<UsersRow> for PublicUser {
    fn from(row: UsersRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            full_name: row.full_name,
            role: Role::from_stored(&row.role),
            municipality_id: row.municipality_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub user: PublicUser,
    pub token: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// Login policy shared by every request: session lifetime and the bcrypt
/// cost new hashes are made with.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub session_ttl_hours: i64,
    pub bcrypt_cost: u32,
    // Verified when no user matched so both failure paths do the same work.
    // Hashed at `bcrypt_cost` so its timing matches the stored hashes.
    dummy_hash: String,
}

impl AuthSettings {
    pub fn new(session_ttl_hours: i64, bcrypt_cost: u32) -> AppResult<Self> {
        let dummy_hash = bcrypt::hash("parksys-dummy-password", bcrypt_cost)
            .map_err(|e| AppError::Internal(format!("dummy hash failed: {e}")))?;
        Ok(Self {
            session_ttl_hours,
            bcrypt_cost,
            dummy_hash,
        })
    }
}

pub async fn authenticate(
    pool: &SqlitePool,
    settings: &AuthSettings,
    identifier: &str,
    password: &str,
) -> AppResult<LoginOutcome> {
    let identifier = identifier.trim();
    if identifier.is_empty() || password.is_empty() {
        return Err(AppError::validation("username and password are required"));
    }

    let candidate = user_repo::find_login_candidate(pool, identifier).await?;

    let stored_hash = candidate.as_ref().map(|u| u.password_hash.clone());
    let password = password.to_string();
    let dummy_hash = settings.dummy_hash.clone();
    let matched = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => bcrypt::verify(&password, &hash).unwrap_or(false),
        None => {
            let _ = bcrypt::verify(&password, &dummy_hash);
            false
        }
    })
    .await
    .map_err(|e| AppError::Internal(format!("password check aborted: {e}")))?;

    let user = match candidate {
        Some(user) if matched => user,
        _ => {
            warn!(identifier = %identifier, "login rejected");
            return Err(AppError::InvalidCredentials);
        }
    };

    let token = generate_token();
    let expires_at =
        session_repo::insert_session(pool, &token, user.id, settings.session_ttl_hours).await?;
    info!(user_id = user.id, "login succeeded");

    Ok(LoginOutcome {
        user: PublicUser::from(user),
        token,
        expires_at,
    })
}

pub async fn resolve_session(pool: &SqlitePool, token: &str) -> sqlx::Result<Option<SessionUser>> {
    if token.is_empty() {
        return Ok(None);
    }
    let row = session_repo::load_session_user(pool, token).await?;
    Ok(row.map(|r| SessionUser {
        id: r.user_id,
        username: r.username,
        role: Role::from_stored(&r.role),
    }))
}

pub async fn logout(pool: &SqlitePool, token: &str) -> sqlx::Result<()> {
    session_repo::delete_session(pool, token).await?;
    Ok(())
}

pub async fn load_public_user(pool: &SqlitePool, user_id: i64) -> AppResult<PublicUser> {
    user_repo::load_user(pool, user_id)
        .await?
        .map(PublicUser::from)
        .ok_or(AppError::NotFound("user"))
}

pub struct NewUserInput {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub municipality_id: Option<i64>,
    pub password: String,
}

pub async fn create_user(pool: &SqlitePool, input: NewUserInput, cost: u32) -> AppResult<PublicUser> {
    let username = input.username.trim();
    let email = input.email.trim();
    if username.is_empty() || email.is_empty() {
        return Err(AppError::validation("username and email are required"));
    }
    if !email.contains('@') {
        return Err(AppError::validation("email is not valid"));
    }
    if input.password.len() < 6 {
        return Err(AppError::validation("password must be at least 6 characters"));
    }

    let password_hash = hash_password(input.password, cost).await?;
    let id = user_repo::insert_user(
        pool,
        user_repo::NewUser {
            username,
            email,
            full_name: input.full_name.trim(),
            role: input.role.as_str(),
            municipality_id: input.municipality_id,
            password_hash: &password_hash,
        },
    )
    .await?;

    load_public_user(pool, id).await
}

pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("hashing aborted: {e}")))?
        .map_err(|e| AppError::Internal(format!("hashing failed: {e}")))
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
