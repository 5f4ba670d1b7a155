//! Extractor trait and its input/output types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use hungr_core::result::AppResult;
use hungr_entity::RecipeStep;

/// What the model is asked to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionInput {
    /// Visible text of a recipe web page.
    WebPage(String),
    /// Photos as `data:` URLs.
    Images(Vec<String>),
    /// Text pasted by the user.
    Text(String),
}

/// Steps recovered from a source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractedRecipe {
    /// Step 0 holds the ingredients; later steps hold instructions.
    pub steps: Vec<RecipeStep>,
    /// Suggested tags, when the extractor offers any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Turns recipe sources into structured steps.
#[async_trait]
pub trait Extractor: Send + Sync + 'static {
    /// Run one extraction. Upstream failures use `ErrorKind::ExternalService`.
    async fn extract(&self, input: ExtractionInput) -> AppResult<ExtractedRecipe>;
}
