//! Result Renderer: turns a parse response into the text shown in each results region.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::ParseResult;

const NO_EDUCATION: &str = "No education information found";
const NO_EXPERIENCE: &str = "No experience information found";
const NO_SKILLS: &str = "No skills information found";
const NO_SUMMARY: &str = "No summary available";
const NO_PERSONAL_INFO: &str = "No personal information found";
const NO_CONTACT_INFO: &str = "No contact information found";
const CONTACT_NOT_FOUND: &str = "Not found";

#[derive(Debug, Error)]
#[error("Malformed parse result: {0}")]
pub struct RenderError(#[from] serde_json::Error);

/// Displayed text of every results region, keyed by region id when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedResults {
    pub personal_info: String,
    pub contact_info: String,
    pub education: String,
    pub experience: String,
    pub skills: String,
    pub summary: String,
}

impl RenderedResults {
    /// (region id, heading, text) in display order.
    pub fn regions(&self) -> [(&'static str, &'static str, &str); 6] {
        [
            ("personalInfo", "Personal Information", self.personal_info.as_str()),
            ("contactInfo", "Contact Information", self.contact_info.as_str()),
            ("education", "Education", self.education.as_str()),
            ("experience", "Experience", self.experience.as_str()),
            ("skills", "Skills", self.skills.as_str()),
            ("summary", "Summary", self.summary.as_str()),
        ]
    }
}

/// Checks that a response body has the parse result shape.
pub fn parse_result(value: &Value) -> Result<ParseResult, RenderError> {
    Ok(ParseResult::deserialize(value)?)
}

pub fn render_parse_result(result: &ParseResult) -> RenderedResults {
    RenderedResults {
        personal_info: lines_or(
            mapping_lines(result.personal_info.as_ref(), None),
            NO_PERSONAL_INFO,
        ),
        contact_info: lines_or(
            mapping_lines(result.contact_info.as_ref(), Some(CONTACT_NOT_FOUND)),
            NO_CONTACT_INFO,
        ),
        education: text_or(result.education.as_deref(), NO_EDUCATION),
        experience: text_or(result.experience.as_deref(), NO_EXPERIENCE),
        skills: text_or(result.skills.as_deref(), NO_SKILLS),
        summary: text_or(result.summary.as_deref(), NO_SUMMARY),
    }
}

fn mapping_lines(map: Option<&Map<String, Value>>, empty_value: Option<&str>) -> String {
    let Some(map) = map else {
        return String::new();
    };
    map.iter()
        .map(|(key, value)| {
            let text = match empty_value {
                Some(placeholder) if is_falsy(value) => placeholder.to_string(),
                _ => value_text(value),
            };
            format!("{}: {}", capitalize(key), text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `null`, `""`, `0` and `false` count as missing.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lines_or(lines: String, fallback: &str) -> String {
    if lines.is_empty() {
        fallback.to_string()
    } else {
        lines
    }
}

fn text_or(text: Option<&str>, fallback: &str) -> String {
    match text {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => fallback.to_string(),
    }
}
