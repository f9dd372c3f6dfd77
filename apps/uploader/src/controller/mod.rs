//! Upload Interaction Controller.
//!
//! Owns the page model and reacts to named events. All state changes are
//! synchronous; the only suspension points are the parse request, session
//! storage I/O and writing a download.

pub mod events;
pub mod page;

use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::client::ParseClient;
use crate::errors::UploadError;
use crate::export::export_results;
use crate::models::{ParseResult, SelectedFile};
use crate::render::{parse_result, render_parse_result};
use crate::session::{SessionStore, RESULTS_KEY};

pub use events::UploadEvent;
pub use page::PageState;

pub const DISPLAY_ERROR_ALERT: &str =
    "Error: Error displaying results. Please check the console for details.";
pub const NO_RESULTS_ALERT: &str = "No results available to download";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Validating,
    Submitting,
}

/// A validated submission, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub file: SelectedFile,
    pub options: Vec<String>,
}

pub struct UploadController<C, S> {
    client: C,
    store: S,
    download_dir: PathBuf,
    page: PageState,
    phase: SubmitPhase,
    last_result: Option<ParseResult>,
}

impl<C: ParseClient, S: SessionStore> UploadController<C, S> {
    pub fn new(client: C, store: S, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            store,
            download_dir: download_dir.into(),
            page: PageState::default(),
            phase: SubmitPhase::Idle,
            last_result: None,
        }
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    #[allow(dead_code)]
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        self.page.take_alerts()
    }

    pub async fn dispatch(&mut self, event: UploadEvent) {
        debug!("Dispatching {:?}", EventName(&event));
        match event {
            UploadEvent::DragEnter | UploadEvent::DragOver => self.on_drag_over(),
            UploadEvent::DragLeave => self.on_drag_leave(),
            UploadEvent::Drop(files) => self.on_drop(files),
            UploadEvent::FilesChanged(files) => self.on_files_changed(files),
            UploadEvent::RemoveFile => self.on_remove_file(),
            UploadEvent::OptionToggled { id, checked } => self.on_option_toggled(&id, checked),
            UploadEvent::Submit => self.submit().await,
            UploadEvent::Download => self.download().await,
            UploadEvent::PageLoad => self.on_page_load().await,
        }
    }

    // -- drop zone ----------------------------------------------------------

    pub fn on_drag_over(&mut self) {
        self.page.drop_zone_active = true;
    }

    pub fn on_drag_leave(&mut self) {
        self.page.drop_zone_active = false;
    }

    /// Hands the dropped files to the file input as if they had been picked.
    pub fn on_drop(&mut self, files: Vec<SelectedFile>) {
        self.page.drop_zone_active = false;
        self.on_files_changed(files);
    }

    // -- file selection -----------------------------------------------------

    pub fn on_files_changed(&mut self, files: Vec<SelectedFile>) {
        self.page.files = files;
        let selected = self.page.selected_file().map(|file| {
            info!("Selected '{}' ({} bytes)", file.name, file.content.len());
            file.name.clone()
        });
        if let Some(name) = selected {
            self.page.file_name = name;
            self.page.file_indicator_visible = true;
        }
        self.refresh_submit();
    }

    pub fn on_remove_file(&mut self) {
        self.page.files.clear();
        self.page.file_name.clear();
        self.page.file_indicator_visible = false;
        self.page.submit_enabled = false;
    }

    pub fn on_option_toggled(&mut self, id: &str, checked: bool) {
        self.page.options.set_checked(id, checked);
        self.refresh_submit();
    }

    /// Submit is enabled iff a file is present, an option is checked and
    /// nothing is in flight.
    fn refresh_submit(&mut self) {
        self.page.submit_enabled = self.phase == SubmitPhase::Idle
            && self.page.selected_file().is_some()
            && self.page.options.any_checked();
    }

    // -- submission ---------------------------------------------------------

    pub async fn submit(&mut self) {
        if let Some(request) = self.begin_submission() {
            let outcome = self
                .client
                .parse_resume(&request.file, &request.options)
                .await;
            self.finish_submission(outcome).await;
        }
    }

    /// Validates the form and switches the page into its loading state.
    /// Returns `None` when validation failed or a submission is in flight.
    pub fn begin_submission(&mut self) -> Option<SubmissionRequest> {
        if self.phase != SubmitPhase::Idle {
            debug!("Submit ignored: a submission is already in flight");
            return None;
        }

        self.phase = SubmitPhase::Validating;
        let request = match self.validate() {
            Ok(request) => request,
            Err(e) => {
                warn!("Submission blocked: {e}");
                self.page.alert(e.alert_text());
                self.phase = SubmitPhase::Idle;
                return None;
            }
        };

        self.phase = SubmitPhase::Submitting;
        self.page.submit_enabled = false;
        self.page.loading_visible = true;
        self.page.results_visible = false;
        self.page.scrolled_to_results = false;
        Some(request)
    }

    fn validate(&self) -> Result<SubmissionRequest, UploadError> {
        let file = self
            .page
            .selected_file()
            .cloned()
            .ok_or(UploadError::NoFileSelected)?;
        let options = self.page.options.selected();
        if options.is_empty() {
            return Err(UploadError::NoOptionsSelected);
        }
        Ok(SubmissionRequest { file, options })
    }

    /// Applies the outcome of the parse request and returns to idle.
    pub async fn finish_submission(&mut self, outcome: Result<Value, UploadError>) {
        let outcome = match outcome {
            Ok(body) => self.persist(&body).await.map(|()| body),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(body) => {
                self.page.loading_visible = false;
                self.display_results(&body);
            }
            Err(e) => {
                error!("Submission failed: {e}");
                self.page.alert(e.alert_text());
            }
        }

        self.phase = SubmitPhase::Idle;
        self.page.loading_visible = false;
        self.refresh_submit();
    }

    async fn persist(&self, body: &Value) -> Result<(), UploadError> {
        let raw = serde_json::to_string(body)?;
        self.store.set(RESULTS_KEY, &raw).await
    }

    /// Updates the loading indicator's text while a request is in flight.
    #[allow(dead_code)]
    pub fn set_loading_message(&mut self, message: impl Into<String>) {
        self.page.loading_message = message.into();
    }

    // -- results ------------------------------------------------------------

    fn display_results(&mut self, body: &Value) {
        match parse_result(body) {
            Ok(result) => {
                self.page.results = render_parse_result(&result);
                self.last_result = Some(result);
                self.page.loading_visible = false;
                self.page.results_visible = true;
                self.page.scrolled_to_results = true;
            }
            Err(e) => {
                error!("Failed to display results: {e}");
                self.page.alert(DISPLAY_ERROR_ALERT);
            }
        }
    }

    /// Restores the last stored result without touching the network.
    pub async fn on_page_load(&mut self) {
        let raw = match self.store.get(RESULTS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored results for this session");
                return;
            }
            Err(e) => {
                warn!("Could not read stored results: {e}");
                return;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(body) => {
                info!("Restoring results from session storage");
                self.display_results(&body);
            }
            Err(e) => warn!("Ignoring unreadable stored results: {e}"),
        }
    }

    pub async fn download(&mut self) {
        let Some(result) = self.last_result.as_ref() else {
            warn!("Download requested before any results were shown");
            self.page.alert(NO_RESULTS_ALERT);
            return;
        };

        match export_results(result, &self.download_dir).await {
            Ok(path) => self.page.last_download = Some(path),
            Err(e) => {
                error!("Export failed: {e}");
                self.page.alert(e.alert_text());
            }
        }
    }
}

/// Event name without the file payloads.
struct EventName<'a>(&'a UploadEvent);

impl std::fmt::Debug for EventName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            UploadEvent::Drop(files) => write!(f, "Drop({} file(s))", files.len()),
            UploadEvent::FilesChanged(files) => write!(f, "FilesChanged({} file(s))", files.len()),
            other => write!(f, "{other:?}"),
        }
    }
}
