//! Recipe extraction from web pages, photos and pasted text.
//!
//! The model call sits behind [`Extractor`]; [`OpenAiExtractor`] talks to
//! an OpenAI-compatible chat-completions endpoint. [`ExtractionService`]
//! does the input handling around it: fetching pages, reducing HTML to
//! text, truncating, and checking image uploads.

pub mod extractor;
pub mod html;
pub mod openai;
pub mod prompts;
pub mod service;

pub use extractor::{ExtractedRecipe, ExtractionInput, Extractor};
pub use openai::OpenAiExtractor;
pub use service::ExtractionService;
