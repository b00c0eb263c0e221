//! Health endpoint and cross-cutting HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use common::{body_json, get};
use ems_api::middleware::rate_limit::API_MAX_REQUESTS;
use ems_api::router::MAX_BODY_BYTES;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn responses_carry_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

async fn send_raw(app: axum::Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    for uri in ["/api/v1/nothing-here", "/nothing-here"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Route not found");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_method_is_405_with_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    for (method, uri) in [
        (Method::PATCH, "/api/v1/departments"),
        (Method::DELETE, "/api/v1/auth/login"),
        (Method::POST, "/health"),
    ] {
        let response = send_raw(app.clone(), method.clone(), uri, Body::empty()).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_json_body_is_413(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({
        "name": "Grace Hopper",
        "email": "grace@corp.test",
        "password": "x".repeat(MAX_BODY_BYTES),
    });
    let response = send_raw(
        app,
        Method::POST,
        "/api/v1/auth/register",
        Body::from(serde_json::to_vec(&body).unwrap()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn responses_carry_security_headers(pool: PgPool) {
    let app = common::build_test_app(pool);
    for uri in ["/health", "/api/v1/nothing-here"] {
        let response = get(app.clone(), uri).await;
        let headers = response.headers();
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
        assert_eq!(headers["referrer-policy"], "no-referrer");
        assert!(headers["content-security-policy"]
            .to_str()
            .unwrap()
            .starts_with("default-src 'self'"));
        assert!(headers.contains_key("strict-transport-security"));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn api_has_a_global_request_budget(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Unauthenticated profile reads are rejected before touching the pool.
    for _ in 0..API_MAX_REQUESTS {
        let response = get(app.clone(), "/api/v1/auth/profile").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    let response = get(app.clone(), "/api/v1/departments/dep-name").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body_json(response).await["success"], false);

    // The health check sits outside the API budget.
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}
