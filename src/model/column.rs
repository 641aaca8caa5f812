//! Column descriptors

use serde::{Deserialize, Serialize};

/// A column of the table: which record field to show, its header label,
/// and whether clicking the header sorts by it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    /// Header text; falls back to the key when left empty
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub sortable: bool,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
        }
    }

    /// Mark the column as sortable
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Header text to render
    pub fn header_label(&self) -> &str {
        if self.label.is_empty() {
            &self.key
        } else {
            &self.label
        }
    }
}
