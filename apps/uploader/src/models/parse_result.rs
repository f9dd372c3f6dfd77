use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured record returned by `/parse-resume/`.
///
/// Mapping fields keep the server's key order; unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParseResult {
    #[serde(default)]
    pub personal_info: Option<Map<String, Value>>,
    #[serde(default)]
    pub contact_info: Option<Map<String, Value>>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}
