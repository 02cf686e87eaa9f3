use crate::config::toml_config::TomlConfig;
use crate::config::GeneratorConfig;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pdf-mcq", version)]
#[command(about = "Generate multiple-choice questions from a PDF; prints one JSON document")]
pub struct CliConfig {
    /// Path to the PDF to read
    pub pdf_path: Option<String>,

    /// Number of questions to ask for (non-integers fall back to the default)
    #[arg(allow_negative_numbers = true)]
    pub num_questions: Option<String>,

    /// TOML file with API and generation settings
    #[arg(long)]
    pub config: Option<String>,

    /// Override the model name
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log per-stage timing and memory")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines on stderr")]
    pub log_json: bool,
}

impl CliConfig {
    /// Defaults, then the TOML file, then flags.
    pub fn resolve(&self) -> Result<GeneratorConfig> {
        let mut config = GeneratorConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from {}", path);
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(model) = &self.model {
            config.model = model.clone();
        }

        Ok(config)
    }
}
