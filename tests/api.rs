use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use parksys::database::{self, schema};
use parksys::models::Role;
use parksys::services::auth_service::{self, NewUserInput};
use parksys::{build_router, AppState, Config};

const SKILLS: &str = "Jardinería, plomería, carpintería";

async fn setup() -> (Router, SqlitePool) {
    let pool = database::open_pool("sqlite::memory:", 1).await.unwrap();
    schema::ensure_schema(&pool).await.unwrap();

    for (username, role, password) in [
        ("Luis", Role::Admin, "temp123"),
        ("edita", Role::Editor, "editor123"),
        ("mira", Role::Viewer, "viewer123"),
    ] {
        auth_service::create_user(
            &pool,
            NewUserInput {
                username: username.to_string(),
                email: format!("{}@parques.example", username.to_lowercase()),
                full_name: username.to_string(),
                role,
                municipality_id: Some(1),
                password: password.to_string(),
            },
            4,
        )
        .await
        .unwrap();
    }

    sqlx::query("INSERT INTO volunteers (id, full_name, skills) VALUES (11, 'Rosa', 'Pintura'), (12, 'Tomás', 'Riego')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO parks (id, name, municipality_id) VALUES (1, 'Parque Central', 1)")
        .execute(&pool)
        .await
        .unwrap();

    let config = Config {
        bcrypt_cost: 4,
        ..Config::default()
    };
    let app = build_router(AppState::new(pool.clone(), config).unwrap());
    (app, pool)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn login_returns_user_with_role_and_no_password() {
    let (app, _pool) = setup().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": "Luis", "password": "temp123" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session_token="));
    assert!(cookie.contains("HttpOnly"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let user = &body["data"]["user"];
    assert_eq!(body["success"], true);
    assert_eq!(user["role"], "admin");
    assert_eq!(user["username"], "Luis");
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_identical() {
    let (app, _pool) = setup().await;

    let wrong = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "Luis", "password": "nope" })),
    )
    .await;
    let unknown = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "Fantasma", "password": "temp123" })),
    )
    .await;

    assert_eq!(wrong.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, unknown);
    assert_eq!(wrong.1["message"], "invalid credentials");
}

#[tokio::test]
async fn malformed_login_is_rejected_before_lookup() {
    let (app, _pool) = setup().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn skills_update_reads_back() {
    let (app, _pool) = setup().await;
    let token = login(&app, "Luis", "temp123").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/volunteers/11/skills",
        Some(&token),
        Some(json!({ "skills": SKILLS })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["skills"], SKILLS);

    let (status, body) = send(&app, Method::GET, "/api/volunteers/11", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["skills"], SKILLS);
}

#[tokio::test]
async fn legacy_skills_path_shares_the_handler() {
    let (app, pool) = setup().await;
    let token = login(&app, "Luis", "temp123").await;

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            Method::POST,
            "/update-skills/12",
            Some(&token),
            Some(json!({ "skills": "Poda" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let rows: Vec<(i64, Option<String>)> =
        sqlx::query_as("SELECT id, skills FROM volunteers ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(
        rows,
        vec![
            (11, Some("Pintura".to_string())),
            (12, Some("Poda".to_string()))
        ]
    );
}

#[tokio::test]
async fn update_of_missing_volunteer_is_404_without_mutation() {
    let (app, pool) = setup().await;
    let token = login(&app, "Luis", "temp123").await;

    let before: Vec<(i64, String)> = sqlx::query_as("SELECT id, updated_at FROM volunteers ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/volunteers/999",
        Some(&token),
        Some(json!({ "skills": "Nada" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "volunteer not found");

    let after: Vec<(i64, String)> = sqlx::query_as("SELECT id, updated_at FROM volunteers ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn writes_require_a_session() {
    let (app, _pool) = setup().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/volunteers/11/skills",
        None,
        Some(json!({ "skills": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/volunteers/11/skills",
        Some("not-a-real-token"),
        Some(json!({ "skills": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn amenity_writes_need_an_editing_role() {
    let (app, _pool) = setup().await;
    let viewer = login(&app, "mira", "viewer123").await;
    let editor = login(&app, "edita", "editor123").await;
    let amenity = json!({ "park_id": 1, "name": "Fuente", "category": "Agua" });

    let (status, _) = send(&app, Method::POST, "/amenities", Some(&viewer), Some(amenity.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::POST, "/amenities", Some(&editor), Some(amenity)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/amenities/{id}"),
        Some(&editor),
        Some(json!({ "status": "maintenance" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "maintenance");
    assert_eq!(body["data"]["name"], "Fuente");

    let (status, body) = send(&app, Method::GET, "/api/parks/1/amenities", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn amenity_for_unknown_park_is_a_validation_error() {
    let (app, _pool) = setup().await;
    let editor = login(&app, "edita", "editor123").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/amenities",
        Some(&editor),
        Some(json!({ "park_id": 404, "name": "Columpios" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let (app, _pool) = setup().await;
    let token = login(&app, "Luis", "temp123").await;

    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "Luis");

    let (status, _) = send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_cookie_authenticates() {
    let (app, _pool) = setup().await;
    let token = login(&app, "Luis", "temp123").await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("session_token={token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn volunteers_may_only_edit_themselves() {
    let (app, pool) = setup().await;
    let viewer_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE username = 'mira'")
        .fetch_one(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE volunteers SET user_id = ?1 WHERE id = 12")
        .bind(viewer_id)
        .execute(&pool)
        .await
        .unwrap();
    let token = login(&app, "mira", "viewer123").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/volunteers/12",
        Some(&token),
        Some(json!({ "availability": "Domingos" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/volunteers/11",
        Some(&token),
        Some(json!({ "availability": "Domingos" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn reads_report_not_found_and_bad_ids_as_json() {
    let (app, _pool) = setup().await;

    let (status, body) = send(&app, Method::GET, "/api/parks/77", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "park not found");

    let (status, body) = send(&app, Method::GET, "/api/volunteers/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(&app, Method::GET, "/api/parks", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Parque Central");
}
