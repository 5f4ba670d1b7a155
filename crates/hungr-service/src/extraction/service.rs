//! Extraction service.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, warn};

use hungr_core::config::ExtractionConfig;
use hungr_core::error::{AppError, ErrorKind};
use hungr_core::result::AppResult;

use super::extractor::{ExtractedRecipe, ExtractionInput, Extractor};
use super::html::visible_text;
use super::openai::OpenAiExtractor;
use crate::upload::Upload;

/// Turns URLs, photos and pasted text into recipe steps.
#[derive(Clone)]
pub struct ExtractionService {
    extractor: Option<Arc<dyn Extractor>>,
    http: reqwest::Client,
    max_content_chars: usize,
}

impl std::fmt::Debug for ExtractionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionService")
            .field("configured", &self.is_configured())
            .field("max_content_chars", &self.max_content_chars)
            .finish()
    }
}

impl ExtractionService {
    /// Build from configuration. Without an API key the service still
    /// exists but every extraction fails with "not configured".
    pub fn from_config(config: &ExtractionConfig) -> AppResult<Self> {
        let extractor: Option<Arc<dyn Extractor>> = match config.api_key() {
            Some(_) => Some(Arc::new(OpenAiExtractor::new(config)?) as Arc<dyn Extractor>),
            None => {
                warn!("OPENAI_API_KEY not set; recipe extraction disabled");
                None
            }
        };
        Self::new(
            extractor,
            config.max_content_chars,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Build around any extractor.
    pub fn new(
        extractor: Option<Arc<dyn Extractor>>,
        max_content_chars: usize,
        fetch_timeout: Duration,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "failed to build HTTP client", e)
            })?;
        Ok(Self {
            extractor,
            http,
            max_content_chars,
        })
    }

    /// Whether an extractor is available.
    pub fn is_configured(&self) -> bool {
        self.extractor.is_some()
    }

    /// Fetch a page and extract the recipe from its visible text.
    pub async fn from_url(&self, url: &str) -> AppResult<ExtractedRecipe> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::validation("url is required"));
        }
        let extractor = self.extractor()?;

        info!(url = %url, "Fetching recipe page");
        let html = self.fetch_page(url).await?;
        let content = truncate_chars(&visible_text(&html), self.max_content_chars);

        info!(url = %url, length = content.len(), "Extracting recipe from page");
        run(extractor, ExtractionInput::WebPage(content)).await
    }

    /// Extract the recipe from pasted text.
    pub async fn from_text(&self, text: &str) -> AppResult<ExtractedRecipe> {
        if text.trim().is_empty() {
            return Err(AppError::validation("text is required"));
        }
        let extractor = self.extractor()?;

        let text = truncate_chars(text, self.max_content_chars);
        info!(length = text.len(), "Extracting recipe from text");
        run(extractor, ExtractionInput::Text(text)).await
    }

    /// Extract the recipe from one or more photos.
    pub async fn from_images(&self, uploads: Vec<Upload>) -> AppResult<ExtractedRecipe> {
        if uploads.is_empty() {
            return Err(AppError::validation("at least one image file is required"));
        }
        let extractor = self.extractor()?;

        let mut data_urls = Vec::with_capacity(uploads.len());
        for upload in &uploads {
            if !upload.is_image() {
                return Err(AppError::validation(format!(
                    "file {} must be an image",
                    upload.display_name()
                )));
            }
            data_urls.push(data_url(upload));
        }

        info!(count = data_urls.len(), "Extracting recipe from images");
        run(extractor, ExtractionInput::Images(data_urls)).await
    }

    fn extractor(&self) -> AppResult<&Arc<dyn Extractor>> {
        self.extractor
            .as_ref()
            .ok_or_else(|| AppError::not_configured("recipe extraction not configured"))
    }

    async fn fetch_page(&self, url: &str) -> AppResult<String> {
        let fetch_error =
            |reason: String| AppError::validation(format!("failed to fetch URL: {reason}"));

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(fetch_error(format!("HTTP {}: {}", status.as_u16(), status)));
        }

        response.text().await.map_err(|e| fetch_error(e.to_string()))
    }
}

async fn run(extractor: &Arc<dyn Extractor>, input: ExtractionInput) -> AppResult<ExtractedRecipe> {
    let result = extractor.extract(input).await.map_err(|e| {
        let message = format!("failed to extract recipe: {}", e.message);
        AppError::with_source(ErrorKind::ExternalService, message, e)
    })?;
    info!(steps = result.steps.len(), "Recipe extracted");
    Ok(result)
}

fn data_url(upload: &Upload) -> String {
    format!(
        "data:{};base64,{}",
        upload.content_type,
        STANDARD.encode(&upload.data)
    )
}

/// Keep at most `max` characters.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
