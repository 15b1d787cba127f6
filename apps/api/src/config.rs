use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Whether the outline returned by the model is checked against the
/// `CourseOutline` shape before it is sent back to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutlineValidation {
    /// Forward any syntactically valid JSON unchanged. Shape problems are only logged.
    #[default]
    Passthrough,
    /// Reject outlines that do not match the `CourseOutline` shape.
    Strict,
}

impl FromStr for OutlineValidation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passthrough" => Ok(OutlineValidation::Passthrough),
            "strict" => Ok(OutlineValidation::Strict),
            other => bail!("unknown outline validation mode '{other}' (expected passthrough|strict)"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if the OpenAI key is missing.
#[derive(Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_timeout_secs: u64,
    pub outline_validation: OutlineValidation,
    pub port: u16,
    pub rust_log: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("outline_validation", &self.outline_validation)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")
                .or_else(|_| require_env("VITE_OPENAI_API_KEY"))
                .context("Set OPENAI_API_KEY to the completion service credential")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            outline_validation: std::env::var("OUTLINE_VALIDATION")
                .map(|v| v.parse::<OutlineValidation>())
                .unwrap_or(Ok(OutlineValidation::default()))?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// A config suitable for tests: dummy key, default everything else.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            openai_api_key: "test-key".to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            llm_timeout_secs: 5,
            outline_validation: OutlineValidation::Passthrough,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}
