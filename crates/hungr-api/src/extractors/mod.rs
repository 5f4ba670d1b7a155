//! Custom Axum extractors and query-parameter parsers.

pub mod body;
pub mod query;
pub mod upload;

pub use body::JsonBody;
pub use query::{parse_bool, parse_uuid, require};
pub use upload::read_uploads;
