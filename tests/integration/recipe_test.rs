//! Recipe lifecycle and visibility tests.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{Part, TestApp};

#[tokio::test]
async fn test_create_recipe_with_tags() {
    let app = TestApp::new().await;
    app.login("cook@example.com").await;

    let body = app
        .create_recipe("cook@example.com", "Pancakes", "breakfast,  quick ,,")
        .await;
    assert_eq!(body["success"], true);
    assert_eq!(body["recipe"]["name"], "Pancakes");
    assert_eq!(body["recipe"]["tag_string"], "breakfast, quick");
    assert_eq!(body["recipe"]["is_public"], false);

    let names: Vec<&str> = body["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["breakfast", "quick"]);

    let tags = app.request("GET", "/api/tags", None).await;
    assert_eq!(tags.status, StatusCode::OK);
    let catalog: Vec<&str> = tags.body["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(catalog, ["breakfast", "quick"]);
}

#[tokio::test]
async fn test_create_recipe_with_pages() {
    let app = TestApp::new().await;
    app.login("cook@example.com").await;

    let response = app
        .upload(
            "/api/recipes?email=cook%40example.com&name=Soup&tagString=dinner&source=grandma",
            &[
                Part {
                    field: "file",
                    file_name: "page1.jpg",
                    content_type: Some("image/jpeg"),
                    data: b"\xff\xd8\xff\xe0",
                },
                Part {
                    field: "file",
                    file_name: "notes.pdf",
                    content_type: Some("application/pdf"),
                    data: b"%PDF-1.4",
                },
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["recipe"]["source"], "grandma");

    let files = response.body["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["page_number"], 0);
    assert_eq!(files[0]["image"], true);
    assert_eq!(files[1]["page_number"], 1);
    assert_eq!(files[1]["image"], false);

    let listing = app
        .request("GET", "/api/recipes?email=cook%40example.com", None)
        .await;
    assert_eq!(listing.body["recipeData"].as_array().unwrap().len(), 1);
    assert_eq!(listing.body["fileData"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_recipe_validation() {
    let app = TestApp::new().await;
    app.login("cook@example.com").await;

    let response = app.request("POST", "/api/recipes?email=cook%40example.com", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "name is required");

    let response = app.request("POST", "/api/recipes?name=Soup", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "email is required");

    let response = app
        .request("POST", "/api/recipes?email=ghost%40example.com&name=Soup", None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_requires_email() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/recipes", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "email is required");
}

#[tokio::test]
async fn test_listing_is_newest_first() {
    let app = TestApp::new().await;
    app.login("cook@example.com").await;
    app.create_recipe("cook@example.com", "First", "").await;
    app.create_recipe("cook@example.com", "Second", "").await;

    let listing = app
        .request("GET", "/api/recipes?email=cook%40example.com", None)
        .await;
    let names: Vec<&str> = listing.body["recipeData"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Second", "First"]);
}

#[tokio::test]
async fn test_patch_tags_source_and_visibility() {
    let app = TestApp::new().await;
    app.login("cook@example.com").await;
    let created = app.create_recipe("cook@example.com", "Soup", "dinner").await;
    let uuid = created["recipe"]["uuid"].as_str().unwrap().to_string();

    let private = app
        .request("GET", &format!("/api/recipes/{uuid}/public"), None)
        .await;
    assert_eq!(private.status, StatusCode::NOT_FOUND);

    let patched = app
        .request(
            "PATCH",
            &format!("/api/recipes/{uuid}"),
            Some(json!({ "tagString": "Dinner, Quick", "source": " cookbook p.12 ", "is_public": true })),
        )
        .await;
    assert_eq!(patched.status, StatusCode::OK, "{:?}", patched.body);
    assert_eq!(patched.body["success"], true);

    let public = app
        .request("GET", &format!("/api/recipes/{uuid}/public"), None)
        .await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["recipe"]["tag_string"], "Dinner, Quick");
    assert_eq!(public.body["recipe"]["source"], "cookbook p.12");
    assert_eq!(public.body["tags"], json!(["Dinner", "Quick"]));
    assert_eq!(public.body["steps"], json!([]));

    // Only the visibility changes; tags and source stay.
    app.request(
        "PATCH",
        &format!("/api/recipes/{uuid}"),
        Some(json!({ "is_public": false })),
    )
    .await;
    let listing = app
        .request("GET", "/api/recipes?email=cook%40example.com", None)
        .await;
    let recipe = &listing.body["recipeData"][0];
    assert_eq!(recipe["is_public"], false);
    assert_eq!(recipe["tag_string"], "Dinner, Quick");

    // Explicit null clears the source.
    app.request(
        "PATCH",
        &format!("/api/recipes/{uuid}"),
        Some(json!({ "source": null })),
    )
    .await;
    let listing = app
        .request("GET", "/api/recipes?email=cook%40example.com", None)
        .await;
    assert_eq!(listing.body["recipeData"][0]["source"], json!(null));
}

#[tokio::test]
async fn test_patch_errors() {
    let app = TestApp::new().await;

    let bad = app
        .request("PATCH", "/api/recipes/not-a-uuid", Some(json!({})))
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad.error(), "invalid uuid");

    let missing = app
        .request(
            "PATCH",
            &format!("/api/recipes/{}", uuid::Uuid::new_v4()),
            Some(json!({ "is_public": true })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error(), "recipe not found");
}

#[tokio::test]
async fn test_delete_recipe() {
    let app = TestApp::new().await;
    app.login("cook@example.com").await;
    let created = app.create_recipe("cook@example.com", "Soup", "").await;
    let uuid = created["recipe"]["uuid"].as_str().unwrap().to_string();

    let deleted = app
        .request("DELETE", &format!("/api/recipes?uuid={uuid}"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let again = app
        .request("DELETE", &format!("/api/recipes?uuid={uuid}"), None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let missing = app.request("DELETE", "/api/recipes", None).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.error(), "uuid is required");
}
