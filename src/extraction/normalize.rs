//! Normalization of raw model output into parsed JSON.
//!
//! The prompts forbid markdown, but models wrap payloads in ```json fences
//! often enough that the fences are stripped unconditionally before parsing.
//! Anything that is not valid JSON after stripping is a hard failure for the
//! whole request; there is no retry or correction round.

use super::error::ExtractionError;
use super::types::{CalendarEvent, TimetableDocument};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static CODE_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json|```").unwrap());

/// Removes code-fence markers and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE_REGEX.replace_all(raw.trim(), "").trim().to_string()
}

/// Parses normalized text as a JSON value.
pub fn parse_json(raw: &str) -> Result<Value, ExtractionError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| ExtractionError::Malformed {
        message: format!("{e} (cleaned text: {})", preview(&cleaned)),
    })
}

/// Parses raw model output into timetable documents.
///
/// The prompt asks for an array, but a single bare object is accepted too
/// and treated as a one-document batch.
pub fn parse_timetable_documents(raw: &str) -> Result<Vec<TimetableDocument>, ExtractionError> {
    let value = parse_json(raw)?;
    let docs = match value {
        Value::Array(_) => serde_json::from_value::<Vec<TimetableDocument>>(value)?,
        Value::Object(_) => vec![serde_json::from_value::<TimetableDocument>(value)?],
        other => {
            return Err(ExtractionError::Malformed {
                message: format!("expected a timetable object or array, got {other}"),
            })
        }
    };
    Ok(docs)
}

/// Parses raw model output into calendar events.
pub fn parse_calendar_events(raw: &str) -> Result<Vec<CalendarEvent>, ExtractionError> {
    let value = parse_json(raw)?;
    if !value.is_array() {
        return Err(ExtractionError::Malformed {
            message: format!("expected an event array, got {value}"),
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Truncated copy of the cleaned text for error messages.
fn preview(text: &str) -> String {
    const MAX: usize = 120;
    if text.len() <= MAX {
        text.to_string()
    } else {
        let mut end = MAX;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}
