use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const MISSING_PROMPT: &str = "Missing prompt";
pub const PARSE_FAILURE: &str = "Failed to parse AI response";
pub const SERVICE_FAILURE: &str = "Something went wrong with the AI service";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only three messages ever reach the caller. The variant detail is logged
/// server-side and never echoed.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing prompt")]
    MissingPrompt,

    #[error("Request body error: {0}")]
    BadRequestBody(String),

    #[error("AI response parse error: {0}")]
    AiResponseParse(String),

    #[error("LLM error: {0}")]
    Llm(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingPrompt => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MissingPrompt => MISSING_PROMPT,
            AppError::AiResponseParse(_) => PARSE_FAILURE,
            AppError::BadRequestBody(_) | AppError::Llm(_) => SERVICE_FAILURE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MissingPrompt => {}
            AppError::AiResponseParse(detail) => {
                tracing::error!("JSON parsing error: {detail}");
            }
            AppError::BadRequestBody(detail) => {
                tracing::error!("API error: malformed request body: {detail}");
            }
            AppError::Llm(detail) => {
                tracing::error!("API error: {detail}");
            }
        }

        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}
