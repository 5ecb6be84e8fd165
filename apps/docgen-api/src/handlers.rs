//! HTTP handlers for the Docgen API

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};

use crate::error::ApiError;
use crate::models::{ApiBanner, GeneratePdfRequest};
use crate::state::AppState;

/// Landing page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../templates/index.html"))
}

/// Functions page
pub async fn functions() -> Html<&'static str> {
    Html(include_str!("../templates/functions.html"))
}

/// API root banner
pub async fn api_root() -> Json<ApiBanner> {
    Json(ApiBanner {
        message: "Docgen Services API",
    })
}

/// Generate a PDF from content and return it as a download.
///
/// The core never rejects content: unparsable structured payloads and
/// unknown type tags still produce valid documents, so this responds 200
/// for any well-formed request body.
pub async fn generate_pdf(
    State(_state): State<Arc<AppState>>,
    Json(req): Json<GeneratePdfRequest>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ApiError> {
    let request: docgen_core::RenderRequest = req.into();
    let document = docgen_core::render(&request)?;

    tracing::info!(
        "Generated {} ({} bytes, kind: {})",
        document.filename,
        document.bytes.len(),
        request.kind
    );

    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "application/pdf".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename={}", document.filename),
            ),
        ],
        document.bytes,
    ))
}
