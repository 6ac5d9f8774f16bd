//! Validation of raw reasoning-service output into an `AnalysisResult`.
//!
//! The service is asked for a single JSON object but routinely wraps it in
//! prose or code fences. Validation locates the embedded object, parses it and
//! repairs what can be repaired. Anything else is a `ValidationFailure`, which
//! callers turn into the fallback analysis.

use std::collections::HashSet;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::analysis::models::{AnalysisResult, CareerDomain};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("response contains no JSON object")]
    NoJsonObject,

    #[error("response contains no parseable JSON object")]
    MalformedJson,

    #[error("'domain' is missing or empty")]
    MissingDomain,

    #[error("'{0}' is not one of the allowed domains")]
    UnknownDomain(String),
}

/// Validates a raw response into a well-formed analysis.
pub fn validate_analysis(raw: &str) -> Result<AnalysisResult, ValidationFailure> {
    let object = parse_embedded_object(raw)?;

    let domain = match object.get("domain").and_then(Value::as_str).map(str::trim) {
        Some(domain) if !domain.is_empty() => domain
            .parse::<CareerDomain>()
            .map_err(|e| ValidationFailure::UnknownDomain(e.0))?,
        _ => return Err(ValidationFailure::MissingDomain),
    };

    Ok(AnalysisResult {
        domain,
        skills: dedup_case_insensitive(string_list(object.get("skills"))),
        suggestions: string_list(object.get("suggestions")),
    })
}

/// Returns the first balanced `{...}` candidate that parses as a JSON object.
fn parse_embedded_object(raw: &str) -> Result<Map<String, Value>, ValidationFailure> {
    if find_json_object(raw).is_none() {
        return Err(ValidationFailure::NoJsonObject);
    }

    balanced_objects(raw)
        .find_map(|candidate| match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(object)) => Some(object),
            _ => None,
        })
        .ok_or(ValidationFailure::MalformedJson)
}

/// Finds the first balanced JSON object substring in `text`.
pub fn find_json_object(text: &str) -> Option<&str> {
    balanced_objects(text).next()
}

/// Yields every balanced `{...}` substring, left to right, skipping candidates
/// nested inside an earlier one. An opening brace that never closes is passed
/// over and scanning continues with the next one.
fn balanced_objects(text: &str) -> impl Iterator<Item = &str> {
    let mut spans = object_spans(text.as_bytes());
    spans.sort_unstable_by_key(|&(open, _)| open);

    let mut cursor = 0;
    spans.into_iter().filter_map(move |(open, close)| {
        if open < cursor {
            return None;
        }
        cursor = close + 1;
        Some(&text[open..=close])
    })
}

/// Byte offsets of every matched `{`/`}` pair, found in a single pass.
///
/// Quotes only open string literals while some brace is open, so prose around
/// objects never hides a brace. Braces inside string literals (including
/// escaped quotes) are ignored. All delimiters are ASCII, so every offset is a
/// char boundary.
fn object_spans(bytes: &[u8]) -> Vec<(usize, usize)> {
    let mut open = Vec::new();
    let mut spans = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' if !open.is_empty() => in_string = true,
            b'{' => open.push(i),
            b'}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, i));
                }
            }
            _ => {}
        }
    }

    spans
}

/// Missing or non-list values become empty; non-string and blank entries are dropped.
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn dedup_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}
