use thiserror::Error;

/// Fallback message when the API gives us nothing to quote.
pub const UNKNOWN_API_ERROR: &str = "Unknown API Error";

#[derive(Error, Debug)]
pub enum McqError {
    #[error("No PDF file path provided.")]
    MissingPdfPath,

    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    #[error("PDF Extraction Failed: {message}")]
    Extraction { message: String },

    #[error("The PDF contains too little text to generate questions.")]
    InsufficientText { length: usize, minimum: usize },

    #[error("{env_var} not found in environment variables.")]
    MissingApiKey { env_var: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Google API {status}: {message}")]
    Api { status: u16, message: String },

    #[error("API returned an empty or invalid response structure.")]
    EmptyResponse,

    #[error("Failed to parse JSON response: {reason}. Response: {snippet}")]
    ResponseParse { reason: String, snippet: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Extraction,
    Content,
    Credentials,
    Network,
    Upstream,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl McqError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            McqError::MissingPdfPath | McqError::InvalidArguments { .. } => ErrorCategory::Input,
            McqError::Extraction { .. } => ErrorCategory::Extraction,
            McqError::InsufficientText { .. } => ErrorCategory::Content,
            McqError::MissingApiKey { .. } => ErrorCategory::Credentials,
            McqError::Transport(_) => ErrorCategory::Network,
            McqError::Api { .. } | McqError::EmptyResponse | McqError::ResponseParse { .. } => {
                ErrorCategory::Upstream
            }
            McqError::Config { .. } | McqError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            McqError::Io(_) | McqError::Serialization(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Content => ErrorSeverity::Low,
            ErrorCategory::Credentials | ErrorCategory::Network | ErrorCategory::Upstream => {
                ErrorSeverity::Medium
            }
            ErrorCategory::Input | ErrorCategory::Extraction | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Fatal errors end the run with `{"error": ...}` and exit code 1.
    /// Everything else is reported inside a full output document.
    pub fn is_fatal(&self) -> bool {
        self.severity() >= ErrorSeverity::High
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Usage: pdf-mcq <pdf_path> [num_questions]",
            ErrorCategory::Extraction => {
                "Check that the file exists and is a readable, unencrypted PDF"
            }
            ErrorCategory::Content => {
                "The document may be scanned; run OCR first or use a text-based PDF"
            }
            ErrorCategory::Credentials => "Export the API key before invoking the tool",
            ErrorCategory::Network => "Check network connectivity or raise timeout_seconds",
            ErrorCategory::Upstream => {
                "Retry the request; the model may have returned malformed output"
            }
            ErrorCategory::Configuration => "Fix the configuration file or CLI flags",
            ErrorCategory::System => "Check that stdout is still open and writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the generation API: {}", self),
            ErrorCategory::Upstream => format!("The generation API misbehaved: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, McqError>;
