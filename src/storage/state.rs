//! Serialized bookmark state of one storage slot.

use serde::{Deserialize, Serialize};

use super::LATEST_FORMAT_VERSION;

/// Persisted form of a bookmark group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SerializableGroup {
    pub name: String,
    pub color: String,
    pub shape: String,
    #[serde(default)]
    pub icon_text: String,
}

/// Persisted form of a bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SerializableBookmark {
    pub fs_path: String,
    pub line_number: u32,
    pub character_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub line_text: String,
    #[serde(default)]
    pub is_line_number_changed: bool,
    pub group_name: String,
}

/// Everything stored in one slot.
///
/// Returned by [`BookmarkStorage::read_storage`](super::BookmarkStorage::read_storage)
/// already migrated to [`LATEST_FORMAT_VERSION`], and written back wholesale by
/// [`BookmarkStorage::persist`](super::BookmarkStorage::persist).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct StoredState {
    pub format_version: u64,
    /// Logical clock of the last bookmark change.
    pub timestamp: i64,
    pub groups: Vec<SerializableGroup>,
    pub bookmarks: Vec<SerializableBookmark>,
    pub workspace_folders: Vec<String>,
}

impl Default for StoredState {
    fn default() -> Self {
        Self {
            format_version: LATEST_FORMAT_VERSION,
            timestamp: 0,
            groups: Vec::new(),
            bookmarks: Vec::new(),
            workspace_folders: Vec::new(),
        }
    }
}

impl StoredState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_groups(&mut self, groups: Vec<SerializableGroup>) {
        self.groups = groups;
    }

    pub fn set_bookmarks(&mut self, bookmarks: Vec<SerializableBookmark>) {
        self.bookmarks = bookmarks;
    }

    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = timestamp;
    }

    pub fn set_workspace_folders(&mut self, workspace_folders: Vec<String>) {
        self.workspace_folders = workspace_folders;
    }

    /// Serializes the slot for export.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes an exported slot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
