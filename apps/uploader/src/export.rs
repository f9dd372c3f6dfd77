//! Result Exporter: writes the displayed fields of the last parse result as JSON.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::UploadError;
use crate::models::ParseResult;
use crate::render::render_parse_result;

pub const EXPORT_FILE_NAME: &str = "resume-analysis.json";

/// Re-renders `result` and writes it, pretty-printed, to `dir/resume-analysis.json`.
pub async fn export_results(result: &ParseResult, dir: &Path) -> Result<PathBuf, UploadError> {
    let rendered = render_parse_result(result);
    let json = serde_json::to_string_pretty(&rendered)?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(EXPORT_FILE_NAME);
    tokio::fs::write(&path, json).await?;

    info!("Exported results to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn result() -> ParseResult {
        serde_json::from_value(json!({
            "personal_info": {"name": "Ada"},
            "contact_info": {"email": ""},
            "skills": "Analytical engines"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_writes_rendered_fields_by_region_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_results(&result(), dir.path()).await.unwrap();

        assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
        let written: Value =
            serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
        assert_eq!(
            written,
            json!({
                "personalInfo": "Name: Ada",
                "contactInfo": "Email: Not found",
                "education": "No education information found",
                "experience": "No experience information found",
                "skills": "Analytical engines",
                "summary": "No summary available"
            })
        );
    }

    #[tokio::test]
    async fn test_empty_result_exports_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_results(&ParseResult::default(), dir.path()).await.unwrap();
        let written: Value =
            serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
        assert_eq!(written["personalInfo"], "No personal information found");
        assert_eq!(written["contactInfo"], "No contact information found");
        assert_eq!(written["summary"], "No summary available");
    }

    #[tokio::test]
    async fn test_output_is_indented() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_results(&result(), dir.path()).await.unwrap();
        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(text.starts_with("{\n  \"personalInfo\": \"Name: Ada\","));
    }

    #[tokio::test]
    async fn test_creates_missing_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("downloads").join("today");
        let path = export_results(&result(), &nested).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        export_results(&ParseResult::default(), dir.path()).await.unwrap();
        let path = export_results(&result(), dir.path()).await.unwrap();
        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(text.contains("Analytical engines"));
    }
}
