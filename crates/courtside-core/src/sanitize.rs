//! Classifier response sanitization.
//!
//! A classifier response is free text that should contain one JSON object.
//! Sanitizing it is an explicit two-step process:
//!
//! 1. [`parse_response`] locates the first balanced `{...}` block and parses it.
//! 2. [`validate_classification`] checks the envelope and clamps every field
//!    into a [`SanitizedClassification`].
//!
//! The envelope is fail-closed: a missing object, invalid JSON, a non-boolean
//! `isHandball` or a non-array `tags` rejects the whole response. Inside a
//! valid envelope every field is lenient and a bad value only empties that
//! field.

use serde_json::Value;
use tracing::debug;

use crate::domain::{ActionLabel, ActionSignal, SanitizeError, SanitizedClassification, SkillLevel};

/// Maximum number of tags kept from a response.
pub const MAX_TAGS: usize = 3;

/// Maximum number of actions kept from a response.
pub const MAX_ACTIONS: usize = 3;

/// Confidence assigned to an action whose confidence is missing or not a number.
pub const DEFAULT_ACTION_CONFIDENCE: f64 = 0.5;

/// Tunables for field-level sanitization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeOptions {
    /// Sentences kept for each of `positives` and `improvements`.
    pub max_sentences: usize,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self { max_sentences: 3 }
    }
}

/// Sanitize a raw classifier response, or `None` when it is unusable.
///
/// The rejection reason is logged at debug level; callers treat `None` the
/// same as an unavailable classifier.
pub fn sanitize_response(text: &str, options: &SanitizeOptions) -> Option<SanitizedClassification> {
    match try_sanitize_response(text, options) {
        Ok(classification) => Some(classification),
        Err(reason) => {
            debug!(reason = %reason, "classifier response unusable");
            None
        }
    }
}

/// Like [`sanitize_response`] but keeps the rejection reason.
pub fn try_sanitize_response(
    text: &str,
    options: &SanitizeOptions,
) -> Result<SanitizedClassification, SanitizeError> {
    let value = parse_response(text)?;
    validate_classification(&value, options)
}

/// Parse the first balanced JSON object embedded in `text`.
pub fn parse_response(text: &str) -> Result<Value, SanitizeError> {
    let raw = extract_json_object(text).ok_or(SanitizeError::NoJsonObject)?;
    serde_json::from_str(raw).map_err(|e| SanitizeError::InvalidJson(e.to_string()))
}

/// Locate the first balanced `{...}` block in `text`.
///
/// Single pass over a stack of open-brace offsets, so hostile input with
/// thousands of unclosed braces stays linear. Braces inside JSON string
/// literals are ignored; quotes outside any brace are prose. Unclosed
/// braces before the payload are skipped.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut open: Vec<usize> = Vec::new();
    let mut first: Option<(usize, usize)> = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.bytes().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' if !open.is_empty() => in_string = true,
            b'{' => open.push(i),
            b'}' => {
                let Some(start) = open.pop() else { continue };
                if first.map_or(true, |(s, _)| start < s) {
                    first = Some((start, i + 1));
                }
                if open.is_empty() {
                    break;
                }
            }
            _ => {}
        }
    }
    first.map(|(start, end)| &text[start..end])
}

/// Validate a parsed response envelope into a [`SanitizedClassification`].
pub fn validate_classification(
    value: &Value,
    options: &SanitizeOptions,
) -> Result<SanitizedClassification, SanitizeError> {
    let obj = value.as_object().ok_or(SanitizeError::NotAnObject)?;

    let is_handball = obj
        .get("isHandball")
        .and_then(Value::as_bool)
        .ok_or(SanitizeError::IsHandballNotBool)?;
    let tags = obj
        .get("tags")
        .and_then(Value::as_array)
        .ok_or(SanitizeError::TagsNotArray)?;

    let classification = SanitizedClassification {
        is_handball,
        tags: sanitize_tags(tags),
        positives: sanitize_sentences(obj.get("positives"), options.max_sentences),
        improvements: sanitize_sentences(obj.get("improvements"), options.max_sentences),
        confidence: obj
            .get("confidence")
            .and_then(Value::as_f64)
            .filter(|c| c.is_finite()),
        level: obj
            .get("level")
            .and_then(Value::as_str)
            .and_then(SkillLevel::parse),
        actions: sanitize_actions(obj.get("actions")),
    };

    debug!(
        is_handball = classification.is_handball,
        tags = classification.tags.len(),
        actions = classification.actions.len(),
        positives = classification.positives.len(),
        improvements = classification.improvements.len(),
        "classifier response sanitized"
    );
    Ok(classification)
}

fn sanitize_tags(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .filter_map(clean_tag)
        .take(MAX_TAGS)
        .collect()
}

/// Characters that carry markdown or HTML structure.
const MARKUP_CHARS: [char; 7] = ['<', '>', '#', '*', '`', '[', ']'];

/// Reduce a tag to a single line of plain text, or `None` if nothing is left.
///
/// Tags end up in feedback headings and bullet labels.
pub fn clean_tag(tag: &str) -> Option<String> {
    let cleaned = tag
        .replace(MARKUP_CHARS, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (!cleaned.is_empty()).then_some(cleaned)
}

fn sanitize_actions(value: Option<&Value>) -> Vec<ActionSignal> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let label = entry
                .get("label")
                .and_then(Value::as_str)
                .and_then(ActionLabel::parse)?;
            let confidence = entry
                .get("confidence")
                .and_then(Value::as_f64)
                .filter(|c| c.is_finite())
                .map(|c| c.clamp(0.0, 1.0))
                .unwrap_or(DEFAULT_ACTION_CONFIDENCE);
            Some(ActionSignal { label, confidence })
        })
        .take(MAX_ACTIONS)
        .collect()
}

/// Reduce each entry to its first sentence, keeping at most `max` sentences.
fn sanitize_sentences(value: Option<&Value>, max: usize) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(coerce_text)
        .filter_map(|text| first_clause(&text).map(ensure_terminal))
        .take(max)
        .collect()
}

/// Scalars become text; objects, arrays and nulls are dropped.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Text up to the first sentence end (`.`, `!` or `?` followed by whitespace).
fn first_clause(text: &str) -> Option<&str> {
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(_, next)) = chars.peek() {
                if next.is_whitespace() {
                    return Some(text[..i + c.len_utf8()].trim());
                }
            }
        }
    }
    let rest = text.trim();
    (!rest.is_empty()).then_some(rest)
}

/// Append a period unless the sentence already ends in `.`, `!` or `?`.
pub fn ensure_terminal(sentence: &str) -> String {
    let sentence = sentence.trim();
    if sentence.ends_with(['.', '!', '?']) {
        sentence.to_string()
    } else {
        format!("{sentence}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_skips_surrounding_prose() {
        let text = "Sure! Here is the result:\n{\"isHandball\": true, \"tags\": []}\nThanks.";
        assert_eq!(
            extract_json_object(text),
            Some("{\"isHandball\": true, \"tags\": []}")
        );
    }

    #[test]
    fn test_extract_ignores_braces_in_strings() {
        let text = r#"{"note": "a } inside", "tags": []} trailing }"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"note": "a } inside", "tags": []}"#)
        );
    }

    #[test]
    fn test_extract_skips_unclosed_prefix() {
        let text = r#"{ oops {"isHandball": false, "tags": []}"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"isHandball": false, "tags": []}"#)
        );
    }

    #[test]
    fn test_extract_none_without_object() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("{ never closed"), None);
    }

    #[test]
    fn test_extract_unclosed_flood_is_linear() {
        let flood = "{".repeat(200_000);
        assert_eq!(extract_json_object(&flood), None);

        let text = format!("{flood}{}", r#"{"tags": ["passing"]}"#);
        assert_eq!(extract_json_object(&text), Some(r#"{"tags": ["passing"]}"#));
    }

    #[test]
    fn test_extract_prefers_outermost_closed_object() {
        let text = r#"{ draft {"tags": {"x": 1}, "isHandball": true} {"late": 1}"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"tags": {"x": 1}, "isHandball": true}"#)
        );
    }

    #[test]
    fn test_clean_tag_strips_markup() {
        assert_eq!(
            clean_tag("<b>pass\n\n# ing</b>").as_deref(),
            Some("bpass ing/b")
        );
        assert_eq!(clean_tag("  fast   break ").as_deref(), Some("fast break"));
        assert_eq!(clean_tag("**[`#`]**"), None);
        assert_eq!(clean_tag("   "), None);
    }

    #[test]
    fn test_first_clause_splits_on_boundary() {
        assert_eq!(first_clause("Good balance. Keep going!"), Some("Good balance."));
        assert_eq!(first_clause("Version 2.0 is out"), Some("Version 2.0 is out"));
        assert_eq!(first_clause("   "), None);
    }

    #[test]
    fn test_ensure_terminal() {
        assert_eq!(ensure_terminal("Nice pass"), "Nice pass.");
        assert_eq!(ensure_terminal("Nice pass!"), "Nice pass!");
        assert_eq!(ensure_terminal(" Why? "), "Why?");
    }

    #[test]
    fn test_coerce_text_drops_structures() {
        assert_eq!(coerce_text(&serde_json::json!(3)), Some("3".to_string()));
        assert_eq!(coerce_text(&serde_json::json!({"a": 1})), None);
        assert_eq!(coerce_text(&Value::Null), None);
    }
}
