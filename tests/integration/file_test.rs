//! Recipe file upload and download tests.

mod helpers;

use axum::http::{StatusCode, header};

use helpers::{Part, TestApp};

const JPEG: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg";

fn jpeg(name: &str) -> Part<'_> {
    Part {
        field: "file",
        file_name: name,
        content_type: Some("image/jpeg"),
        data: JPEG,
    }
}

#[tokio::test]
async fn test_download_serves_bytes_with_cache_headers() {
    let app = TestApp::new().await;
    app.login("cook@example.com").await;
    let created = app
        .upload(
            "/api/recipes?email=cook%40example.com&name=Soup",
            &[jpeg("page.jpg")],
        )
        .await;
    let url = created.body["files"][0]["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/api/files/"));

    let response = app.request("GET", &url, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, JPEG);
    assert_eq!(response.headers[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(
        response.headers[header::CACHE_CONTROL],
        "public, max-age=31536000"
    );
    assert_eq!(response.headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert!(response.headers.get(header::CONTENT_DISPOSITION).is_none());
}

#[tokio::test]
async fn test_non_image_upload_is_served_as_attachment() {
    let app = TestApp::new().await;
    app.login("cook@example.com").await;
    let page = b"<html><script>alert(1)</script></html>";
    let created = app
        .upload(
            "/api/recipes?email=cook%40example.com&name=Soup",
            &[Part {
                field: "file",
                file_name: "page.html",
                content_type: Some("text/html"),
                data: page,
            }],
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    assert_eq!(created.body["files"][0]["image"], false);
    let url = created.body["files"][0]["url"].as_str().unwrap().to_string();

    let response = app.request("GET", &url, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, page);
    assert_eq!(
        response.headers[header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(response.headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    let disposition = response.headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap();
    assert!(disposition.starts_with("attachment"), "{disposition}");
}

#[tokio::test]
async fn test_appended_files_continue_page_numbers() {
    let app = TestApp::new().await;
    app.login("cook@example.com").await;
    let created = app
        .upload(
            "/api/recipes?email=cook%40example.com&name=Soup",
            &[jpeg("one.jpg")],
        )
        .await;
    let uuid = created.body["recipe"]["uuid"].as_str().unwrap().to_string();

    let appended = app
        .upload(
            &format!("/api/recipes/{uuid}/files"),
            &[jpeg("two.jpg"), jpeg("three.jpg")],
        )
        .await;
    assert_eq!(appended.status, StatusCode::OK, "{:?}", appended.body);
    let pages: Vec<i64> = appended.body["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["page_number"].as_i64().unwrap())
        .collect();
    assert_eq!(pages, [1, 2]);

    let listing = app
        .request("GET", "/api/recipes?email=cook%40example.com", None)
        .await;
    assert_eq!(listing.body["fileData"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_append_requires_files_and_recipe() {
    let app = TestApp::new().await;
    app.login("cook@example.com").await;
    let created = app.create_recipe("cook@example.com", "Soup", "").await;
    let uuid = created["recipe"]["uuid"].as_str().unwrap().to_string();

    let empty = app
        .request("POST", &format!("/api/recipes/{uuid}/files"), None)
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.error(), "at least one file is required");

    let missing = app
        .upload(
            &format!("/api/recipes/{}/files", uuid::Uuid::new_v4()),
            &[jpeg("one.jpg")],
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_errors() {
    let app = TestApp::new().await;

    let bad = app.request("GET", "/api/files/abc", None).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad.error(), "invalid file uuid");

    let missing = app
        .request("GET", &format!("/api/files/{}", uuid::Uuid::new_v4()), None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error(), "file not found");
}

#[tokio::test]
async fn test_deleting_recipe_removes_its_files() {
    let app = TestApp::new().await;
    app.login("cook@example.com").await;
    let created = app
        .upload(
            "/api/recipes?email=cook%40example.com&name=Soup",
            &[jpeg("page.jpg")],
        )
        .await;
    let uuid = created.body["recipe"]["uuid"].as_str().unwrap().to_string();
    let url = created.body["files"][0]["url"].as_str().unwrap().to_string();

    app.request("DELETE", &format!("/api/recipes?uuid={uuid}"), None)
        .await;

    let response = app.request("GET", &url, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
