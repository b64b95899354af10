/*!
 * Structured training-script document.
 *
 * The JSON form has exactly two levels:
 * `{"title": .., "sections": [{"title": .., "content": [..]}]}`.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::file_utils::FileManager;

/// A titled run of content lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Detected cue phrase or default label
    pub title: String,

    /// Segments in discovery order
    pub content: Vec<String>,
}

impl Chapter {
    /// Create a chapter with initial content
    pub fn new(title: impl Into<String>, content: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }

    /// Create a chapter with no content yet
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Title plus ordered sections, the output of the script pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Document title
    pub title: String,

    /// Sections in discourse order
    pub sections: Vec<Chapter>,
}

impl StructuredDocument {
    pub fn new(title: impl Into<String>, sections: Vec<Chapter>) -> Self {
        Self {
            title: title.into(),
            sections,
        }
    }

    /// True when there is nothing to render
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of content lines across all sections
    pub fn line_count(&self) -> usize {
        self.sections.iter().map(|s| s.content.len()).sum()
    }

    /// Section titles in order
    pub fn section_titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }

    /// Encode as pretty-printed JSON (non-ASCII kept verbatim)
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize structured document")
    }

    /// Decode from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse structured document")
    }

    /// Write the JSON encoding to `path`, creating parent directories
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(&path, &self.to_json()?)
    }

    /// Read a document previously written by [`StructuredDocument::save_json`]
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid structured document: {:?}", path.as_ref()))
    }
}
