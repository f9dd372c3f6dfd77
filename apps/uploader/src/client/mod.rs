//! Parse client: the single point of contact with the resume-parsing service.
//!
//! One multipart POST per submission. No retries: every failure is terminal
//! for that attempt and surfaces to the user.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::UploadError;
use crate::models::SelectedFile;

pub const PARSE_RESUME_PATH: &str = "/parse-resume/";
const GENERIC_SERVER_ERROR: &str = "Failed to parse resume";

#[async_trait]
pub trait ParseClient: Send + Sync {
    /// Uploads `file` with the selected option ids and returns the JSON body.
    async fn parse_resume(
        &self,
        file: &SelectedFile,
        options: &[String],
    ) -> Result<Value, UploadError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

#[derive(Clone)]
pub struct HttpParseClient {
    client: Client,
    endpoint: String,
}

impl HttpParseClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, UploadError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint_url(base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), PARSE_RESUME_PATH)
}

/// `detail` when it is present and non-empty, the generic message otherwise.
fn error_message(body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail);
    match detail {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Null) | Some(Value::String(_)) | None => GENERIC_SERVER_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}

#[async_trait]
impl ParseClient for HttpParseClient {
    async fn parse_resume(
        &self,
        file: &SelectedFile,
        options: &[String],
    ) -> Result<Value, UploadError> {
        let options_json = serde_json::to_string(options)?;
        let part = Part::bytes(file.content.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type())?;
        let form = Form::new()
            .part("file", part)
            .text("options", options_json);

        info!(
            "Uploading '{}' ({} bytes) to {} with options {:?}",
            file.name,
            file.content.len(),
            self.endpoint,
            options
        );

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            warn!("Parse service returned {status}: {message}");
            return Err(UploadError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;
        debug!("Parse service returned {} bytes of JSON", body.len());
        Ok(value)
    }
}
