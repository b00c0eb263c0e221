//! HTTP-level tests for employees: creation, dual-key lookup, edits, removal.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_department, create_employee, delete_auth, get, get_auth, login,
    post_json, post_json_auth, put_json_auth, seed_admin, seed_user, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_pairs_identity_and_generates_code(pool: PgPool) {
    let (_admin, token) = seed_admin(&pool).await;
    let app = common::build_test_app(pool);
    create_department(app.clone(), &token, "Platform").await;

    let employee =
        create_employee(app.clone(), &token, "Ada Lovelace", "Ada@Corp.test", "Platform").await;

    assert!(employee["emp_code"].as_str().unwrap().starts_with("ada-lovelace-"));
    assert_eq!(employee["email"], "ada@corp.test");
    assert_eq!(employee["department_name"], "Platform");
    assert_eq!(employee["role"], "employee");

    // The paired identity can sign in with the password the admin chose.
    let session = login(app, "ada@corp.test", TEST_PASSWORD).await;
    assert_eq!(session["user"]["id"], employee["user_id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_unknown_department_and_duplicate_email(pool: PgPool) {
    let (_admin, token) = seed_admin(&pool).await;
    let app = common::build_test_app(pool);
    create_department(app.clone(), &token, "Platform").await;

    let mut body = json!({
        "name": "Bo Chen",
        "email": "bo@corp.test",
        "password": TEST_PASSWORD,
        "department": "Nowhere",
        "gender": "male",
        "marital_status": "married",
        "designation": "tester",
    });
    let response = post_json_auth(app.clone(), "/api/v1/employees", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    body["department"] = json!("Platform");
    let response = post_json_auth(app.clone(), "/api/v1/employees", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/employees", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_adopts_self_registered_identity(pool: PgPool) {
    let (_admin, token) = seed_admin(&pool).await;
    let app = common::build_test_app(pool);
    create_department(app.clone(), &token, "Platform").await;

    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        json!({ "name": "Rui", "email": "rui@corp.test", "password": "own-password" }),
    )
    .await;
    let registered = body_json(response).await;

    let employee = create_employee(app.clone(), &token, "Rui Costa", "rui@corp.test", "Platform").await;
    assert_eq!(employee["user_id"], registered["data"]["user"]["id"]);
    assert_eq!(employee["name"], "Rui Costa");

    // Credentials chosen at registration still work.
    login(app, "rui@corp.test", "own-password").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn adoption_keeps_role_unless_one_is_given(pool: PgPool) {
    let (_admin, token) = seed_admin(&pool).await;
    seed_user(&pool, "Second Admin", "boss@corp.test", "admin").await;
    seed_user(&pool, "Kai", "kai@corp.test", "employee").await;
    let app = common::build_test_app(pool);
    create_department(app.clone(), &token, "Platform").await;

    let employee =
        create_employee(app.clone(), &token, "Second Admin", "boss@corp.test", "Platform").await;
    assert_eq!(employee["role"], "admin");

    let response = post_json_auth(
        app,
        "/api/v1/employees",
        json!({
            "name": "Kai",
            "email": "kai@corp.test",
            "password": TEST_PASSWORD,
            "role": "manager",
            "department": "Platform",
            "gender": "male",
            "marital_status": "single",
            "designation": "developer",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["role"], "manager");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn view_resolves_employee_then_identity_id(pool: PgPool) {
    let (_admin, token) = seed_admin(&pool).await;
    let app = common::build_test_app(pool);
    create_department(app.clone(), &token, "Platform").await;
    let employee = create_employee(app.clone(), &token, "Zed", "zed@corp.test", "Platform").await;

    for id in [&employee["id"], &employee["user_id"]] {
        let response = get_auth(app.clone(), &format!("/api/v1/employees/{id}/view"), &token).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["id"], employee["id"]);
    }

    let response = get_auth(app.clone(), "/api/v1/employees/424242/view", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, "/api/v1/employees").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_admin_edits_only_own_safe_fields(pool: PgPool) {
    let (_admin, token) = seed_admin(&pool).await;
    let app = common::build_test_app(pool);
    create_department(app.clone(), &token, "Platform").await;
    let mine = create_employee(app.clone(), &token, "Mia", "mia@corp.test", "Platform").await;
    let theirs = create_employee(app.clone(), &token, "Leo", "leo@corp.test", "Platform").await;
    let session = login(app.clone(), "mia@corp.test", TEST_PASSWORD).await;
    let own_token = session["access_token"].as_str().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/employees/{}/edit", theirs["id"]),
        json!({ "name": "Hacked" }),
        own_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/employees/{}/edit", mine["id"]),
        json!({ "salary": 999999 }),
        own_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        app,
        &format!("/api/v1/employees/{}/edit", mine["id"]),
        json!({ "name": "Mia Wong", "marital_status": "married", "gender": "" }),
        own_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Mia Wong");
    assert_eq!(json["data"]["gender"], "female");
    assert!(json["data"]["emp_code"].as_str().unwrap().starts_with("mia-wong-"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn removing_last_member_retires_department(pool: PgPool) {
    let (_admin, token) = seed_admin(&pool).await;
    let app = common::build_test_app(pool);
    let department_id = create_department(app.clone(), &token, "Tiny").await;
    let employee = create_employee(app.clone(), &token, "Solo", "solo@corp.test", "Tiny").await;

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/employees/department/{department_id}"),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/employees/{}/delete", employee["id"]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["department_retired"], true);

    let list = body_json(get(app.clone(), "/api/v1/departments").await).await;
    assert_eq!(list["totalDocs"], 0);

    let response = get_auth(
        app,
        &format!("/api/v1/employees/department/{department_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moving_last_member_out_retires_department(pool: PgPool) {
    let (_admin, token) = seed_admin(&pool).await;
    let app = common::build_test_app(pool);
    create_department(app.clone(), &token, "Tiny").await;
    create_department(app.clone(), &token, "Large").await;
    let employee = create_employee(app.clone(), &token, "Solo", "solo@corp.test", "Tiny").await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/employees/{}/edit", employee["id"]),
        json!({ "department": "Large" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["department_name"], "Large");

    let list = body_json(get(app.clone(), "/api/v1/departments").await).await;
    assert_eq!(list["totalDocs"], 1);
    assert_eq!(list["data"][0]["name"], "Large");

    // The retired name no longer resolves.
    let response = put_json_auth(
        app,
        &format!("/api/v1/employees/{}/edit", employee["id"]),
        json!({ "department": "Tiny" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
