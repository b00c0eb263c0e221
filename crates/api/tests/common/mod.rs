#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use ems_api::auth::jwt::{generate_access_token, JwtConfig};
use ems_api::auth::password::hash_password;
use ems_api::config::ServerConfig;
use ems_api::router::build_app_router;
use ems_api::state::AppState;
use ems_core::pagination::PaginationConfig;
use ems_db::models::user::{CreateUser, User};
use ems_db::repositories::UserRepo;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "secret123";

/// A `ServerConfig` with a fixed JWT secret and no bootstrap admin.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        pagination: PaginationConfig {
            default_limit: 10,
            max_limit: 100,
        },
        bootstrap_admin: None,
        trust_proxy: false,
    }
}

/// The production router and middleware stack over `pool`.
///
/// Clone the returned router to keep one rate limiter across requests.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Insert an identity directly and mint an access token for it.
pub async fn seed_user(pool: &PgPool, name: &str, email: &str, role: &str) -> (User, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: role.to_string(),
            profile_url: None,
            profile_storage_id: None,
        },
    )
    .await
    .unwrap();
    let token = generate_access_token(user.id, &user.role, &test_config().jwt).unwrap();
    (user, token)
}

pub async fn seed_admin(pool: &PgPool) -> (User, String) {
    seed_user(pool, "Admin", "admin@corp.test", "admin").await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures through the API
// ---------------------------------------------------------------------------

/// Create a department as `admin_token` and return its id.
pub async fn create_department(app: Router, admin_token: &str, name: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/departments",
        serde_json::json!({ "name": name, "description": format!("{name} team") }),
        admin_token,
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create an employee in `department` and return the `data` object.
pub async fn create_employee(
    app: Router,
    admin_token: &str,
    name: &str,
    email: &str,
    department: &str,
) -> Value {
    let response = post_json_auth(
        app,
        "/api/v1/employees",
        serde_json::json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
            "department": department,
            "dob": "1990-05-01",
            "gender": "female",
            "marital_status": "single",
            "designation": "developer",
            "salary": 50000,
        }),
        admin_token,
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"].clone()
}

/// Log in through the API and return the `data` object.
pub async fn login(app: Router, email: &str, password: &str) -> Value {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), 200);
    body_json(response).await["data"].clone()
}
