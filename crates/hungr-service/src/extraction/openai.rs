//! OpenAI-compatible chat-completions extractor.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use hungr_core::config::ExtractionConfig;
use hungr_core::error::{AppError, ErrorKind};
use hungr_core::result::AppResult;

use super::extractor::{ExtractedRecipe, ExtractionInput, Extractor};
use super::prompts;

/// Calls `{base_url}/chat/completions` with a strict JSON schema response
/// format and decodes the returned steps.
#[derive(Debug, Clone)]
pub struct OpenAiExtractor {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    timeout: Duration,
    image_timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: Value,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl OpenAiExtractor {
    /// Build from configuration. Fails when no API key is set.
    pub fn new(config: &ExtractionConfig) -> AppResult<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| AppError::not_configured("recipe extraction not configured"))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            image_timeout: Duration::from_secs(config.image_timeout_seconds),
        })
    }

    /// Model name sent with requests.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn messages(input: ExtractionInput) -> Vec<ChatMessage> {
        let (system, user) = match input {
            ExtractionInput::WebPage(content) => (
                prompts::web_page_system_prompt(),
                MessageContent::Text(format!(
                    "Extract the recipe from this webpage content:\n\n{content}"
                )),
            ),
            ExtractionInput::Text(text) => (
                prompts::text_system_prompt(),
                MessageContent::Text(format!("Extract the recipe from this text:\n\n{text}")),
            ),
            ExtractionInput::Images(urls) => {
                let mut parts = vec![ContentPart::Text {
                    text: prompts::image_user_prompt(urls.len()).to_string(),
                }];
                parts.extend(urls.into_iter().map(|url| ContentPart::ImageUrl {
                    image_url: ImageUrl { url },
                }));
                (prompts::image_system_prompt(), MessageContent::Parts(parts))
            }
        };

        vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(system),
            },
            ChatMessage {
                role: "user",
                content: user,
            },
        ]
    }

    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        timeout: Duration,
    ) -> AppResult<ExtractedRecipe> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            response_format: json!({
                "type": "json_schema",
                "json_schema": {
                    "name": "recipe_steps",
                    "strict": true,
                    "schema": prompts::recipe_steps_schema(),
                }
            }),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("failed to call OpenAI API: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("failed to read OpenAI response: {e}"),
                e,
            )
        })?;
        debug!(status = status.as_u16(), bytes = body.len(), "OpenAI response received");

        let parsed = match serde_json::from_str::<ChatResponse>(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(AppError::external(format!(
                    "OpenAI API returned HTTP {}",
                    status.as_u16()
                )));
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("failed to parse OpenAI response: {e}"),
                    e,
                ));
            }
        };

        if let Some(error) = parsed.error {
            return Err(AppError::external(format!(
                "OpenAI API error: {}",
                error.message
            )));
        }
        if !status.is_success() {
            return Err(AppError::external(format!(
                "OpenAI API returned HTTP {}",
                status.as_u16()
            )));
        }

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::external("no response from OpenAI"))?;

        serde_json::from_str(&content).map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("failed to parse recipe JSON: {e}"),
                e,
            )
        })
    }
}

#[async_trait]
impl Extractor for OpenAiExtractor {
    async fn extract(&self, input: ExtractionInput) -> AppResult<ExtractedRecipe> {
        let timeout = match input {
            ExtractionInput::Images(_) => self.image_timeout,
            _ => self.timeout,
        };
        self.complete(Self::messages(input), timeout).await
    }
}
