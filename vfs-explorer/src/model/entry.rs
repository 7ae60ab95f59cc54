//! ``src/model/entry.rs``
//! ============================================================================
//! # `DirectoryEntry`: one row of a directory listing
//!
//! Entries come from the backend, except the synthetic "go up" entry which is
//! fabricated locally by the display-list builder.

use bytesize::ByteSize;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::fs::path_resolver::parent_of;

/// Display name of the synthetic parent entry.
pub const PARENT_ENTRY_NAME: &str = "../";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Display name, unique within one listing.
    pub name: CompactString,

    /// Absolute path to navigate to when the entry is activated.
    pub path: Option<String>,

    pub is_directory: bool,

    /// `false` suppresses activation even for directories.
    pub has_permission: bool,

    /// Set only on the locally synthesized "go up" entry.
    pub is_parent_marker: bool,

    /// Recursive size in bytes as reported by the backend.
    pub full_size: Option<u64>,
}

impl DirectoryEntry {
    pub fn file(name: impl Into<CompactString>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
            is_directory: false,
            has_permission: true,
            is_parent_marker: false,
            full_size: None,
        }
    }

    pub fn directory(name: impl Into<CompactString>, path: impl Into<String>) -> Self {
        Self {
            is_directory: true,
            ..Self::file(name, path)
        }
    }

    /// The "go up" entry for a listing of `path`.
    #[must_use]
    pub fn parent_of(path: &str) -> Self {
        Self {
            name: CompactString::const_new(PARENT_ENTRY_NAME),
            path: Some(parent_of(path)),
            is_directory: true,
            has_permission: true,
            is_parent_marker: true,
            full_size: None,
        }
    }

    #[must_use]
    pub fn with_permission(mut self, has_permission: bool) -> Self {
        self.has_permission = has_permission;
        self
    }

    #[must_use]
    pub fn with_size(mut self, bytes: u64) -> Self {
        self.full_size = Some(bytes);
        self
    }

    /// Path to request when this entry is activated, or `None` for inert
    /// entries (files, locked directories, entries without a path).
    #[must_use]
    pub fn navigation_target(&self) -> Option<&str> {
        if self.is_directory && self.has_permission {
            self.path.as_deref().filter(|p| !p.is_empty())
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        self.navigation_target().is_some()
    }

    /// Size formatted for display; the parent entry has none.
    #[must_use]
    pub fn human_size(&self) -> Option<String> {
        if self.is_parent_marker {
            return None;
        }
        self.full_size.map(|bytes| ByteSize::b(bytes).to_string())
    }
}
