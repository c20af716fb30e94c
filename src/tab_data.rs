/// Data structures for Tab Porter
use serde::{Deserialize, Serialize};

pub type WindowId = i32;

/// A live browser tab as returned by `chrome.tabs.query`.
///
/// Only `title` and `url` are exported; the remaining fields are runtime state.
/// The host omits `title`/`url` when the extension lacks permission for a tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TabRecord {
    pub id: Option<i32>,
    pub window_id: WindowId,
    pub index: i32,
    pub active: bool,
    pub pinned: bool,
    pub title: Option<String>,
    pub url: Option<String>,
}

/// Whether `url` is usable as an exported/imported tab url.
/// Blank (empty or whitespace-only) urls are not.
pub fn is_usable_url(url: &str) -> bool {
    !url.trim().is_empty()
}

/// One persisted tab: the only two fields written to an export file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportedTabEntry {
    pub title: String,
    pub url: String,
}

impl ExportedTabEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> ExportedTabEntry {
        ExportedTabEntry {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Ordered list of exported tabs, serialized as a bare JSON array
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ExportDocument(pub Vec<ExportedTabEntry>);

impl ExportDocument {
    pub fn entries(&self) -> &[ExportedTabEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which tabs an export collects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    CurrentWindow,
    AllWindows,
}

/// Where imported tabs are opened
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    #[default]
    SameWindow,
    NewWindow,
}

impl PlacementMode {
    /// Map the "open in new window" switch state to a mode.
    pub fn from_toggle(checked: bool) -> PlacementMode {
        if checked {
            PlacementMode::NewWindow
        } else {
            PlacementMode::SameWindow
        }
    }

    pub fn is_new_window(self) -> bool {
        self == PlacementMode::NewWindow
    }
}
