//! AI extraction endpoint tests with a scripted extractor.

mod helpers;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;

use hungr_core::error::AppError;
use hungr_core::result::AppResult;
use hungr_entity::RecipeStep;
use hungr_service::extraction::{ExtractedRecipe, ExtractionInput, Extractor};

use helpers::{Part, TestApp};

/// Records inputs and answers with a fixed recipe, or fails when asked.
#[derive(Default)]
struct ScriptedExtractor {
    inputs: Mutex<Vec<ExtractionInput>>,
    fail: bool,
}

#[async_trait]
impl Extractor for ScriptedExtractor {
    async fn extract(&self, input: ExtractionInput) -> AppResult<ExtractedRecipe> {
        self.inputs.lock().unwrap().push(input);
        if self.fail {
            return Err(AppError::external("OpenAI API returned HTTP 503"));
        }
        Ok(ExtractedRecipe {
            steps: vec![
                RecipeStep::new("", vec!["2 cup flour".into(), "3 eggs".into()]),
                RecipeStep::new("Whisk everything", vec![]),
            ],
            tags: None,
        })
    }
}

async fn app_with(extractor: Arc<ScriptedExtractor>) -> TestApp {
    let extractor: Arc<dyn Extractor> = extractor;
    TestApp::with_extractor(extractor).await
}

#[tokio::test]
async fn test_extract_from_text() {
    let extractor = Arc::new(ScriptedExtractor::default());
    let app = app_with(extractor.clone()).await;

    let response = app
        .request(
            "POST",
            "/api/extract-recipe-text",
            Some(json!({ "text": "Pancakes: 2 cups flour, 3 eggs. Whisk." })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["steps"][0]["instruction"], "");
    assert_eq!(response.body["steps"][0]["ingredients"], json!(["2 cup flour", "3 eggs"]));
    assert_eq!(response.body["steps"][1]["instruction"], "Whisk everything");
    assert!(response.body.get("tags").is_none());

    assert_eq!(
        extractor.inputs.lock().unwrap()[0],
        ExtractionInput::Text("Pancakes: 2 cups flour, 3 eggs. Whisk.".to_string())
    );
}

#[tokio::test]
async fn test_extract_from_images() {
    let extractor = Arc::new(ScriptedExtractor::default());
    let app = app_with(extractor.clone()).await;

    let response = app
        .upload(
            "/api/extract-recipe-image",
            &[Part {
                field: "images",
                file_name: "card.png",
                content_type: Some("image/png"),
                data: b"hi",
            }],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        extractor.inputs.lock().unwrap()[0],
        ExtractionInput::Images(vec!["data:image/png;base64,aGk=".to_string()])
    );
}

#[tokio::test]
async fn test_extract_image_validation() {
    let app = app_with(Arc::new(ScriptedExtractor::default())).await;

    let none = app.request("POST", "/api/extract-recipe-image", None).await;
    assert_eq!(none.status, StatusCode::BAD_REQUEST);
    assert_eq!(none.error(), "at least one image file is required");

    let wrong_field = app
        .upload(
            "/api/extract-recipe-image",
            &[Part {
                field: "file",
                file_name: "card.png",
                content_type: Some("image/png"),
                data: b"hi",
            }],
        )
        .await;
    assert_eq!(wrong_field.status, StatusCode::BAD_REQUEST);

    let not_image = app
        .upload(
            "/api/extract-recipe-image",
            &[Part {
                field: "images",
                file_name: "notes.txt",
                content_type: Some("text/plain"),
                data: b"hi",
            }],
        )
        .await;
    assert_eq!(not_image.status, StatusCode::BAD_REQUEST);
    assert_eq!(not_image.error(), "file notes.txt must be an image");
}

#[tokio::test]
async fn test_extract_requires_input() {
    let app = app_with(Arc::new(ScriptedExtractor::default())).await;

    let response = app
        .request("POST", "/api/extract-recipe", Some(json!({ "url": "" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "url is required");

    let response = app
        .request("POST", "/api/extract-recipe-text", Some(json!({ "text": "  " })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "text is required");
}

#[tokio::test]
async fn test_unreachable_url_is_a_bad_request() {
    let app = app_with(Arc::new(ScriptedExtractor::default())).await;

    let response = app
        .request(
            "POST",
            "/api/extract-recipe",
            Some(json!({ "url": "http://127.0.0.1:1/recipe" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error().starts_with("failed to fetch URL: "));
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let extractor = Arc::new(ScriptedExtractor {
        fail: true,
        ..ScriptedExtractor::default()
    });
    let app = app_with(extractor).await;

    let response = app
        .request("POST", "/api/extract-recipe-text", Some(json!({ "text": "rice" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.error(),
        "failed to extract recipe: OpenAI API returned HTTP 503"
    );
}

#[tokio::test]
async fn test_unconfigured_extraction() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/extract-recipe-text", Some(json!({ "text": "rice" })))
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error(), "recipe extraction not configured");
}
