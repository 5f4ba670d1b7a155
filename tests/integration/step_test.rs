//! Recipe step tests.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

async fn recipe(app: &TestApp) -> String {
    app.login("cook@example.com").await;
    let created = app.create_recipe("cook@example.com", "Pancakes", "breakfast").await;
    created["recipe"]["uuid"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_new_recipe_has_empty_step_list() {
    let app = TestApp::new().await;
    let uuid = recipe(&app).await;

    let response = app
        .request("GET", &format!("/api/recipes/{uuid}/steps"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "steps": [] }));
}

#[tokio::test]
async fn test_ingredients_only_first_step_is_preserved() {
    let app = TestApp::new().await;
    let uuid = recipe(&app).await;
    let steps = json!([
        { "instruction": "", "ingredients": ["2 cups flour", "1 tsp salt"] },
        { "instruction": "Mix", "ingredients": [] }
    ]);

    let saved = app
        .request(
            "PUT",
            &format!("/api/recipes/{uuid}/steps"),
            Some(json!({ "steps": steps })),
        )
        .await;
    assert_eq!(saved.status, StatusCode::OK, "{:?}", saved.body);
    assert_eq!(saved.body, json!({ "success": true }));

    let loaded = app
        .request("GET", &format!("/api/recipes/{uuid}/steps"), None)
        .await;
    assert_eq!(loaded.body["steps"], steps);
}

#[tokio::test]
async fn test_replace_overwrites_whole_list() {
    let app = TestApp::new().await;
    let uuid = recipe(&app).await;
    let path = format!("/api/recipes/{uuid}/steps");

    app.request(
        "PUT",
        &path,
        Some(json!({ "steps": [
            { "instruction": "Whisk", "ingredients": ["3 eggs"] },
            { "instruction": "Fry", "ingredients": [] }
        ] })),
    )
    .await;
    app.request(
        "PUT",
        &path,
        Some(json!({ "steps": [{ "instruction": "Serve", "ingredients": [] }] })),
    )
    .await;

    let loaded = app.request("GET", &path, None).await;
    assert_eq!(
        loaded.body["steps"],
        json!([{ "instruction": "Serve", "ingredients": [] }])
    );

    app.request("PUT", &path, Some(json!({ "steps": [] }))).await;
    let cleared = app.request("GET", &path, None).await;
    assert_eq!(cleared.body["steps"], json!([]));
}

#[tokio::test]
async fn test_later_steps_need_instructions() {
    let app = TestApp::new().await;
    let uuid = recipe(&app).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/recipes/{uuid}/steps"),
            Some(json!({ "steps": [
                { "instruction": "Mix", "ingredients": [] },
                { "instruction": "  ", "ingredients": ["1 cup milk"] }
            ] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "step 2 instruction is required");
}

#[tokio::test]
async fn test_unparseable_ingredient_is_rejected() {
    let app = TestApp::new().await;
    let uuid = recipe(&app).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/recipes/{uuid}/steps"),
            Some(json!({ "steps": [{ "instruction": "", "ingredients": ["5"] }] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error().starts_with("invalid ingredient \"5\""));
}

#[tokio::test]
async fn test_steps_of_missing_recipe() {
    let app = TestApp::new().await;
    let path = format!("/api/recipes/{}/steps", uuid::Uuid::new_v4());

    let response = app.request("GET", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "recipe not found");

    let response = app.request("GET", "/api/recipes/xyz/steps", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "invalid uuid");
}

#[tokio::test]
async fn test_public_view_includes_steps() {
    let app = TestApp::new().await;
    let uuid = recipe(&app).await;
    app.request(
        "PUT",
        &format!("/api/recipes/{uuid}/steps"),
        Some(json!({ "steps": [{ "instruction": "Flip", "ingredients": [] }] })),
    )
    .await;
    app.request(
        "PATCH",
        &format!("/api/recipes/{uuid}"),
        Some(json!({ "is_public": true })),
    )
    .await;

    let public = app
        .request("GET", &format!("/api/recipes/{uuid}/public"), None)
        .await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["steps"][0]["instruction"], "Flip");
    assert_eq!(public.body["tags"], json!(["breakfast"]));
}
