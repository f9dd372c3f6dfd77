use bytes::Bytes;
use tracing::warn;

/// Checkbox ids in page order.
pub const DEFAULT_OPTION_IDS: &[&str] = &[
    "personal_info",
    "contact_info",
    "education",
    "experience",
    "skills",
    "summary",
];

/// The single file the user intends to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// MIME type guessed from the file extension.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOption {
    pub id: String,
    pub checked: bool,
}

/// The `extractOptions` checkbox group. Read fresh at submission time.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    options: Vec<ExtractOption>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new(DEFAULT_OPTION_IDS.iter().copied())
    }
}

impl ExtractOptions {
    /// Builds an all-unchecked group with the given ids in page order.
    pub fn new<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            options: ids
                .into_iter()
                .map(|id| ExtractOption {
                    id: id.to_string(),
                    checked: false,
                })
                .collect(),
        }
    }

    /// Returns false when `id` is not one of the group's checkboxes.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        match self.options.iter_mut().find(|o| o.id == id) {
            Some(option) => {
                option.checked = checked;
                true
            }
            None => {
                warn!("Ignoring toggle of unknown extraction option '{id}'");
                false
            }
        }
    }

    /// Checked ids in page order.
    pub fn selected(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.checked)
            .map(|o| o.id.clone())
            .collect()
    }

    pub fn any_checked(&self) -> bool {
        self.options.iter().any(|o| o.checked)
    }
}
