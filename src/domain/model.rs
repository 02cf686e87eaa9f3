use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// The letter of the correct option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    pub fn index(self) -> usize {
        match self {
            AnswerKey::A => 0,
            AnswerKey::B => 1,
            AnswerKey::C => 2,
            AnswerKey::D => 3,
        }
    }
}

impl TryFrom<String> for AnswerKey {
    type Error = String;

    // Models sometimes answer "b" or "B)" instead of "B".
    fn try_from(raw: String) -> std::result::Result<Self, Self::Error> {
        let normalized = raw.trim().trim_end_matches(&[')', '.'][..]).to_ascii_uppercase();
        match normalized.as_str() {
            "A" => Ok(AnswerKey::A),
            "B" => Ok(AnswerKey::B),
            "C" => Ok(AnswerKey::C),
            "D" => Ok(AnswerKey::D),
            _ => Err(format!("correct_answer must be one of A, B, C, D, got {:?}", raw)),
        }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            AnswerKey::A => "A",
            AnswerKey::B => "B",
            AnswerKey::C => "C",
            AnswerKey::D => "D",
        };
        f.write_str(letter)
    }
}

/// One multiple-choice question. `options` is always exactly four entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    pub question: String,
    pub options: [String; 4],
    pub correct_answer: AnswerKey,
}

impl Mcq {
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer.index()]
    }
}

/// Text pulled out of a PDF, page by page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub pages: Vec<String>,
    /// Non-empty pages, each followed by a newline, trimmed as a whole.
    pub text: String,
}

impl ExtractedDocument {
    pub fn from_pages(pages: Vec<String>) -> Self {
        let mut text = String::new();
        for page in pages.iter().filter(|p| !p.is_empty()) {
            text.push_str(page);
            text.push('\n');
        }
        let text = text.trim().to_string();
        Self { pages, text }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedText {
    pub cleaned: String,
    /// What actually goes into the prompt.
    pub context: String,
    pub sentence_count: usize,
}

/// The document written to stdout when the pipeline got past extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub text: String,
    pub questions: Vec<Mcq>,
    pub error: Option<String>,
}

impl GenerationOutput {
    pub fn with_text(text: String) -> Self {
        Self {
            text,
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// The document written to stdout when the run could not start or extraction failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatalOutput {
    pub error: String,
}

/// Serializes `document` as a single line and flushes the writer.
pub fn write_json_line<W: Write, T: Serialize>(mut writer: W, document: &T) -> Result<()> {
    let line = serde_json::to_string(document)?;
    writeln!(writer, "{}", line)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ErrorCategory, McqError};

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_json_line_emits_one_line() {
        let mut buffer = Vec::new();
        let output = GenerationOutput::with_text("Cells\ndivide.".to_string());
        write_json_line(&mut buffer, &output).unwrap();

        let written = String::from_utf8(buffer).unwrap();
        assert!(written.ends_with('\n'));
        assert_eq!(written.lines().count(), 1);
        let parsed: GenerationOutput = serde_json::from_str(written.trim_end()).unwrap();
        assert_eq!(parsed, output);
    }

    #[test]
    fn test_write_json_line_reports_io_failure() {
        let output = FatalOutput {
            error: "No PDF file path provided.".to_string(),
        };
        let err = write_json_line(ClosedPipe, &output).unwrap_err();

        assert!(matches!(err, McqError::Io(_)));
        assert_eq!(err.category(), ErrorCategory::System);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_answer_key_accepts_loose_letters() {
        let parsed: AnswerKey = serde_json::from_str("\" b) \"").unwrap();
        assert_eq!(parsed, AnswerKey::B);
        let parsed: AnswerKey = serde_json::from_str("\"D.\"").unwrap();
        assert_eq!(parsed, AnswerKey::D);
        assert!(serde_json::from_str::<AnswerKey>("\"E\"").is_err());
        assert!(serde_json::from_str::<AnswerKey>("\"Paris\"").is_err());
    }

    #[test]
    fn test_answer_key_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&AnswerKey::C).unwrap(), "\"C\"");
    }

    #[test]
    fn test_mcq_requires_four_options() {
        let three = serde_json::json!({
            "question": "Q?",
            "options": ["a", "b", "c"],
            "correct_answer": "A"
        });
        assert!(serde_json::from_value::<Mcq>(three).is_err());

        let four = serde_json::json!({
            "question": "Capital of France?",
            "options": ["Berlin", "Paris", "Rome", "Madrid"],
            "correct_answer": "B"
        });
        let mcq: Mcq = serde_json::from_value(four).unwrap();
        assert_eq!(mcq.correct_option(), "Paris");
    }

    #[test]
    fn test_extracted_document_joins_non_empty_pages() {
        let doc = ExtractedDocument::from_pages(vec![
            "  first page".to_string(),
            String::new(),
            "second page  ".to_string(),
        ]);
        assert_eq!(doc.text, "first page\nsecond page");
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn test_generation_output_serializes_null_error() {
        let output = GenerationOutput::with_text("hello".to_string());
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "hello", "questions": [], "error": null})
        );
        assert!(output.is_success());
    }

    #[test]
    fn test_fatal_output_has_only_error_key() {
        let json = serde_json::to_value(FatalOutput {
            error: "No PDF file path provided.".to_string(),
        })
        .unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert!(obj.contains_key("error"));
    }
}
