pub mod engine;
pub mod extract;
pub mod gemini;
pub mod pipeline;
pub mod prompt;
pub mod response;
pub mod text;

pub use crate::domain::model::{ExtractedDocument, GenerationOutput, Mcq, PreparedText};
pub use crate::domain::ports::{ConfigProvider, Pipeline, QuestionGenerator, TextExtractor};
pub use crate::utils::error::Result;
