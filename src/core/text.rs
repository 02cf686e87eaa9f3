//! Whitespace normalization and prompt-context trimming.

use regex::Regex;
use std::sync::LazyLock;

static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.!?]["')\]]*(\s|$)"#).unwrap());

/// Collapses every whitespace run (newlines included) to one space and trims.
pub fn clean_text(text: &str) -> String {
    let text = NEWLINE_RUNS.replace_all(text, "\n");
    let text = WHITESPACE_RUNS.replace_all(&text, " ");
    text.trim().to_string()
}

/// Length in characters, which is what the minimum-length threshold counts.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The first `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Splits on sentence-ending punctuation followed by whitespace or end of text.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END.find_iter(text) {
        let end = m.end();
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = end;
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

/// Trims `text` to `max_chars` for the prompt.
///
/// With `sentence_boundary`, a cut that lands mid-sentence backs off to the last
/// complete sentence, as long as that keeps at least half the window.
pub fn build_context(text: &str, max_chars: usize, sentence_boundary: bool) -> String {
    let truncated = truncate_chars(text, max_chars);
    if !sentence_boundary || truncated.len() == text.len() {
        return truncated.to_string();
    }

    let backed_off = SENTENCE_END
        .find_iter(truncated)
        .last()
        .map(|m| truncated[..m.end()].trim_end());

    match backed_off {
        Some(context) if char_len(context) * 2 >= char_len(truncated) => context.to_string(),
        _ => truncated.to_string(),
    }
}
