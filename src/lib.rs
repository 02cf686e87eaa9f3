pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::GeneratorConfig;
pub use core::{engine::McqEngine, pipeline::McqPipeline};
pub use domain::model::{AnswerKey, FatalOutput, GenerationOutput, Mcq};
pub use utils::error::{McqError, Result};
