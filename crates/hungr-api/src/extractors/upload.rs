//! Multipart upload collection.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;

use hungr_service::Upload;

use crate::error::ApiError;

/// Collect every part named `field` from a multipart request.
///
/// Requests that are not `multipart/form-data` carry no files and yield an
/// empty list; the services decide whether that is acceptable.
pub async fn read_uploads(request: Request, field: &str) -> Result<Vec<Upload>, ApiError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));
    if !is_multipart {
        return Ok(Vec::new());
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ApiError::validation(format!("failed to parse form: {e}")))?;

    let mut uploads = Vec::new();
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("failed to parse form: {e}")))?
    {
        if part.name() != Some(field) {
            continue;
        }
        let file_name = part.file_name().map(String::from);
        let content_type = part.content_type().map(String::from);
        let data = part
            .bytes()
            .await
            .map_err(|e| ApiError::validation(format!("failed to read file: {e}")))?;
        uploads.push(Upload::new(file_name, content_type, data));
    }

    Ok(uploads)
}
