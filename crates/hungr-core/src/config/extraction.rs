//! AI recipe extraction configuration.

use serde::{Deserialize, Serialize};

/// Settings for the OpenAI-compatible chat completions backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Bearer token. Extraction endpoints answer 500 while this is unset.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model name sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL, without the `/chat/completions` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Page or pasted text longer than this is cut before prompting.
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
    /// Timeout for URL and text extraction calls.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Timeout for image extraction calls.
    #[serde(default = "default_image_timeout")]
    pub image_timeout_seconds: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            max_content_chars: default_max_content_chars(),
            timeout_seconds: default_timeout(),
            image_timeout_seconds: default_image_timeout(),
        }
    }
}

impl ExtractionConfig {
    /// Fill the key and model from `OPENAI_API_KEY` / `OPENAI_MODEL` when
    /// the layered config left them unset.
    pub fn apply_env_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.api_key.as_deref().is_none_or(str::is_empty) {
            self.api_key = lookup("OPENAI_API_KEY").filter(|k| !k.is_empty());
        }
        if let Some(model) = lookup("OPENAI_MODEL").filter(|m| !m.is_empty()) {
            if self.model == default_model() {
                self.model = model;
            }
        }
    }

    /// The API key, if extraction is configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

fn default_model() -> String {
    "gpt-5.2".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_max_content_chars() -> usize {
    15_000
}

fn default_timeout() -> u64 {
    60
}

fn default_image_timeout() -> u64 {
    90
}
