use thiserror::Error;

/// Failures surfaced by the upload flow.
///
/// The `Display` text of each variant is what the user sees after the
/// `Error: ` prefix, so server and transport variants carry the raw message.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please select a file")]
    NoFileSelected,

    #[error("Please select at least one type of information to extract")]
    NoOptionsSelected,

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Storage(#[from] redis::RedisError),

    #[error("Failed to write download: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Validation failures are reported verbatim; everything else is a
    /// request-level failure and gets the `Error: ` prefix.
    pub fn alert_text(&self) -> String {
        match self {
            UploadError::NoFileSelected | UploadError::NoOptionsSelected => self.to_string(),
            other => format!("Error: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_alert_is_prefixed_detail() {
        let err = UploadError::Server {
            status: 413,
            message: "file too large".to_string(),
        };
        assert_eq!(err.alert_text(), "Error: file too large");
    }

    #[test]
    fn test_validation_alert_has_no_prefix() {
        assert_eq!(
            UploadError::NoOptionsSelected.alert_text(),
            "Please select at least one type of information to extract"
        );
        assert_eq!(
            UploadError::NoFileSelected.alert_text(),
            "Please select a file"
        );
    }

    #[test]
    fn test_decode_error_alert_uses_parser_message() {
        let err: UploadError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(err.alert_text().starts_with("Error: key must be a string"));
    }
}
