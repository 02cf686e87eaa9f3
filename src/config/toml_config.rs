use crate::config::GeneratorConfig;
use crate::utils::error::{McqError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional overrides loaded from a TOML file. Every key may be omitted.
///
/// ```toml
/// [api]
/// base_url = "https://generativelanguage.googleapis.com/v1"
/// model = "gemini-2.5-flash"
/// key_env = "GEMINI_API_KEY"
/// timeout_seconds = 90
/// structured_output = false
///
/// [extraction]
/// min_text_length = 50
///
/// [generation]
/// max_context_chars = 4000
/// sentence_boundary = true
/// default_questions = 10
/// max_questions = 50
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub extraction: ExtractionSection,
    #[serde(default)]
    pub generation: GenerationSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub key_env: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub structured_output: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionSection {
    pub min_text_length: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationSection {
    pub max_context_chars: Option<usize>,
    pub sentence_boundary: Option<bool>,
    pub default_questions: Option<usize>,
    pub max_questions: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| McqError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| McqError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_BASE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| McqError::Config {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Layers the keys present in the file over `config`.
    pub fn apply_to(&self, config: &mut GeneratorConfig) {
        if let Some(base_url) = &self.api.base_url {
            config.api_base = base_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = &self.api.model {
            config.model = model.clone();
        }
        if let Some(key_env) = &self.api.key_env {
            config.api_key_env = key_env.clone();
        }
        if let Some(timeout) = self.api.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        if let Some(structured) = self.api.structured_output {
            config.structured_output = structured;
        }
        if let Some(min_len) = self.extraction.min_text_length {
            config.min_text_length = min_len;
        }
        if let Some(max_chars) = self.generation.max_context_chars {
            config.max_context_chars = max_chars;
        }
        if let Some(sentence_boundary) = self.generation.sentence_boundary {
            config.sentence_boundary = sentence_boundary;
        }
        if let Some(default_questions) = self.generation.default_questions {
            config.default_questions = default_questions;
        }
        if let Some(max_questions) = self.generation.max_questions {
            config.max_questions = max_questions;
        }
    }
}
