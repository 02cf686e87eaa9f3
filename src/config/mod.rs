#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_env_var_name, validate_non_empty_string, validate_positive_number, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub api_base: String,
    pub model: String,
    pub api_key_env: String,
    pub timeout_seconds: u64,
    pub structured_output: bool,
    pub min_text_length: usize,
    pub max_context_chars: usize,
    pub sentence_boundary: bool,
    pub default_questions: usize,
    pub max_questions: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_seconds: 90,
            structured_output: false,
            min_text_length: 50,
            max_context_chars: 4000,
            sentence_boundary: false,
            default_questions: 10,
            max_questions: 50,
        }
    }
}

impl GeneratorConfig {
    /// Interprets the optional question-count argument.
    ///
    /// Anything that is not a positive integer falls back to `default_questions`;
    /// larger requests are clamped to `max_questions`.
    pub fn question_count(&self, raw: Option<&str>) -> usize {
        let Some(raw) = raw else {
            return self.default_questions;
        };
        match raw.trim().parse::<i64>() {
            Err(_) => {
                tracing::info!(
                    "Question count {:?} is not an integer, using {}",
                    raw,
                    self.default_questions
                );
                self.default_questions
            }
            Ok(n) if n <= 0 => {
                tracing::info!(
                    "Question count {} is not positive, using {}",
                    n,
                    self.default_questions
                );
                self.default_questions
            }
            Ok(n) if n as u64 > self.max_questions as u64 => {
                tracing::warn!(
                    "Requested {} questions, clamping to {}",
                    n,
                    self.max_questions
                );
                self.max_questions
            }
            Ok(n) => n as usize,
        }
    }
}

impl ConfigProvider for GeneratorConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn api_key_env(&self) -> &str {
        &self.api_key_env
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn structured_output(&self) -> bool {
        self.structured_output
    }

    fn min_text_length(&self) -> usize {
        self.min_text_length
    }

    fn max_context_chars(&self) -> usize {
        self.max_context_chars
    }

    fn sentence_boundary(&self) -> bool {
        self.sentence_boundary
    }

    fn default_questions(&self) -> usize {
        self.default_questions
    }

    fn max_questions(&self) -> usize {
        self.max_questions
    }
}

impl Validate for GeneratorConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_non_empty_string("model", &self.model)?;
        validate_env_var_name("api_key_env", &self.api_key_env)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;
        validate_positive_number("min_text_length", self.min_text_length, 1)?;
        validate_positive_number(
            "max_context_chars",
            self.max_context_chars,
            self.min_text_length,
        )?;
        validate_positive_number("default_questions", self.default_questions, 1)?;
        validate_positive_number("max_questions", self.max_questions, self.default_questions)?;
        Ok(())
    }
}
