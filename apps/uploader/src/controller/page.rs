use std::path::PathBuf;

use crate::models::{ExtractOptions, SelectedFile};
use crate::render::RenderedResults;

pub const DEFAULT_LOADING_MESSAGE: &str = "Processing your resume...";

/// Everything the upload page shows, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub drop_zone_active: bool,
    /// Contents of the file input. Only the first file is uploaded.
    pub files: Vec<SelectedFile>,
    pub file_indicator_visible: bool,
    pub file_name: String,
    pub options: ExtractOptions,
    pub submit_enabled: bool,
    pub loading_visible: bool,
    pub loading_message: String,
    pub results_visible: bool,
    pub scrolled_to_results: bool,
    pub results: RenderedResults,
    pub last_download: Option<PathBuf>,
    alerts: Vec<String>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            drop_zone_active: false,
            files: Vec::new(),
            file_indicator_visible: false,
            file_name: String::new(),
            options: ExtractOptions::default(),
            submit_enabled: false,
            loading_visible: false,
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
            results_visible: false,
            scrolled_to_results: false,
            results: RenderedResults::default(),
            last_download: None,
            alerts: Vec::new(),
        }
    }
}

impl PageState {
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.files.first()
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Drains pending alerts in the order they were raised.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}
