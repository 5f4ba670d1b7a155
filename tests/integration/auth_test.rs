//! Login and user management tests.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_login_creates_user_once() {
    let app = TestApp::new().await;

    let first = app.login("  Cook@Example.com ").await;
    assert_eq!(first["email"], "cook@example.com");
    assert_eq!(first["name"], "cook@example.com");

    let second = app.login("cook@example.com").await;
    assert_eq!(first["uuid"], second["uuid"]);
}

#[tokio::test]
async fn test_login_rejects_bad_email() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/auth/login", Some(json!({ "email": "" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "email is required");

    let response = app
        .request("POST", "/api/auth/login", Some(json!({ "email": "nope" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "invalid email");
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = TestApp::new().await;
    let response = app
        .raw("POST", "/api/auth/login", "application/json", "{not json")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "invalid request body");
}

#[tokio::test]
async fn test_user_lookup_by_uuid_and_email() {
    let app = TestApp::new().await;
    let user = app.login("cook@example.com").await;
    let uuid = user["uuid"].as_str().unwrap();

    let by_uuid = app.request("GET", &format!("/api/users?uuid={uuid}"), None).await;
    assert_eq!(by_uuid.status, StatusCode::OK);
    assert_eq!(by_uuid.body["user"]["email"], "cook@example.com");

    let by_email = app
        .request("GET", "/api/users?email=COOK%40example.com", None)
        .await;
    assert_eq!(by_email.status, StatusCode::OK);
    assert_eq!(by_email.body["user"]["uuid"], uuid);

    let missing = app.request("GET", "/api/users", None).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.error(), "uuid or email is required");

    let unknown = app
        .request("GET", "/api/users?email=ghost%40example.com", None)
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.error(), "user not found");
}

#[tokio::test]
async fn test_create_rename_and_delete_user() {
    let app = TestApp::new().await;

    let created = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "email": "ada@example.com", "name": "Ada" })),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    let uuid = created.body["user"]["uuid"].as_str().unwrap().to_string();

    let duplicate = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "email": "ada@example.com", "name": "Ada" })),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let renamed = app
        .request(
            "PUT",
            &format!("/api/users?uuid={uuid}"),
            Some(json!({ "name": "Ada L." })),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["user"]["name"], "Ada L.");

    app.create_recipe("ada@example.com", "Soup", "").await;

    let deleted = app.request("DELETE", &format!("/api/users?uuid={uuid}"), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["success"], true);

    let gone = app.request("GET", &format!("/api/users?uuid={uuid}"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let listing = app
        .request("GET", "/api/recipes?email=ada%40example.com", None)
        .await;
    assert_eq!(listing.body["recipeData"], json!([]));
}

#[tokio::test]
async fn test_invalid_uuid_query() {
    let app = TestApp::new().await;
    let response = app.request("DELETE", "/api/users?uuid=nope", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "invalid uuid");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new().await;

    let liveness = app.request("GET", "/health", None).await;
    assert_eq!(liveness.status, StatusCode::OK);
    assert_eq!(liveness.bytes, b"OK");

    let health = app.request("GET", "/api/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");
    assert!(health.headers.contains_key("x-request-id"));
}
