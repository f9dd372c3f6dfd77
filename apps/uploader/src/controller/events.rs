use crate::models::SelectedFile;

/// Named interactions on the upload page.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    DragEnter,
    DragOver,
    DragLeave,
    /// Files carried by the drop payload.
    Drop(Vec<SelectedFile>),
    /// The file input's list changed (manual pick).
    FilesChanged(Vec<SelectedFile>),
    RemoveFile,
    OptionToggled { id: String, checked: bool },
    Submit,
    Download,
    PageLoad,
}
