//! Outline Generator: prompt validation, completion request construction,
//! and lenient parsing of the model's reply.
//!
//! Flow: prompt check → one completion call → fence strip → JSON parse →
//! optional shape validation. Each step is a separate function so it can be
//! tested without the network.

use serde_json::Value;
use tracing::{info, warn};

use crate::config::OutlineValidation;
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, CompletionRequest, CompletionService, ResponseFormat};
use crate::outline::cleaning::strip_code_fences;
use crate::outline::prompts::{
    COURSE_OUTLINE_SYSTEM, OUTLINE_MAX_TOKENS, OUTLINE_MODEL, OUTLINE_TEMPERATURE,
};
use crate::outline::validation::validate_outline;

/// Incoming request body. `prompt` stays untyped so that `null`, `false`,
/// `0` and `""` can all be treated as missing.
#[derive(Debug, Default)]
pub struct GenerateOutlineRequest {
    pub prompt: Option<Value>,
}

impl GenerateOutlineRequest {
    /// Reads `prompt` out of a parsed request body.
    ///
    /// Only an object can carry a prompt. Arrays, strings, numbers and
    /// booleans have no `prompt` field and yield a request without one. A
    /// `null` body cannot be read at all and is a body error.
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        match body {
            Value::Null => Err(AppError::BadRequestBody(
                "request body is null".to_string(),
            )),
            Value::Object(mut fields) => Ok(Self {
                prompt: fields.remove("prompt"),
            }),
            _ => Ok(Self::default()),
        }
    }
}

/// Extracts the prompt text, rejecting falsy values with `MissingPrompt`.
///
/// Whitespace-only strings are accepted and forwarded verbatim.
pub fn prompt_text(request: &GenerateOutlineRequest) -> Result<&str, AppError> {
    match &request.prompt {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(AppError::MissingPrompt),
        Some(Value::String(s)) if s.is_empty() => Err(AppError::MissingPrompt),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(AppError::MissingPrompt),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(AppError::BadRequestBody(format!(
            "prompt must be a string, got {}",
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds the two-turn completion request: fixed system instruction, then the
/// caller's prompt unmodified.
pub fn build_completion_request(prompt: &str) -> CompletionRequest {
    CompletionRequest {
        model: OUTLINE_MODEL.to_string(),
        messages: vec![
            ChatMessage::system(COURSE_OUTLINE_SYSTEM),
            ChatMessage::user(prompt),
        ],
        temperature: OUTLINE_TEMPERATURE,
        max_tokens: OUTLINE_MAX_TOKENS,
        response_format: Some(ResponseFormat::json_object()),
    }
}

/// Strips code fences from the model text and parses what remains as JSON.
///
/// Absent text is a parse failure, same as text that is not JSON.
pub fn parse_outline(text: Option<&str>) -> Result<Value, AppError> {
    let text = text.ok_or_else(|| AppError::AiResponseParse("model returned no content".into()))?;
    let cleaned = strip_code_fences(text);
    serde_json::from_str(&cleaned).map_err(|e| AppError::AiResponseParse(e.to_string()))
}

/// Runs one outline generation against `completion`.
///
/// In `Passthrough` mode the parsed JSON is returned as-is even when it does
/// not look like a `CourseOutline`. In `Strict` mode such output is treated
/// as a parse failure.
pub async fn generate_outline(
    prompt: &str,
    completion: &dyn CompletionService,
    mode: OutlineValidation,
) -> Result<Value, AppError> {
    info!("Generating outline for prompt of {} chars", prompt.chars().count());

    let request = build_completion_request(prompt);
    let text = completion
        .complete(&request)
        .await
        .map_err(|e| AppError::Llm(format!("Outline completion failed: {e}")))?;

    let value = parse_outline(text.as_deref())?;

    let report = validate_outline(&value);
    for warning in &report.warnings {
        warn!("Outline shape warning: {warning}");
    }

    if !report.is_valid() {
        match mode {
            OutlineValidation::Passthrough => {
                warn!(
                    "Returning outline that does not match CourseOutline: {}",
                    report.problems.join("; ")
                );
            }
            OutlineValidation::Strict => {
                return Err(AppError::AiResponseParse(format!(
                    "outline failed shape validation: {}",
                    report.problems.join("; ")
                )));
            }
        }
    }

    if let Some(outline) = &report.outline {
        info!(
            "Outline generated: title={:?}, modules={}, lessons={}",
            outline.course_title,
            outline.modules.len(),
            outline.lesson_count()
        );
    }

    Ok(value)
}
