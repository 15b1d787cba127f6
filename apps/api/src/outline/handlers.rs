//! Axum route handler for the outline endpoint.

use axum::{extract::State, Json};
use bytes::Bytes;
use serde_json::Value;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::outline::generator::{generate_outline, prompt_text, GenerateOutlineRequest};
use crate::state::AppState;

/// POST /api/v1/course-outline
///
/// Body: `{"prompt": "..."}`. Returns the model's outline JSON.
///
/// The body is read as raw bytes and parsed here rather than through the
/// `Json` extractor: the content type is not checked, and a malformed body
/// is reported as a service failure (500), not a framework 4xx. Bodies that
/// are valid JSON but not an object carry no prompt and get the 400.
pub async fn handle_generate_outline(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body: Value =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequestBody(e.to_string()))?;
    let request = GenerateOutlineRequest::from_body(body)?;

    let prompt = prompt_text(&request)?;

    let request_id = Uuid::new_v4();
    let outline = generate_outline(
        prompt,
        state.completion.as_ref(),
        state.config.outline_validation,
    )
    .instrument(info_span!("outline", %request_id))
    .await?;

    Ok(Json(outline))
}
