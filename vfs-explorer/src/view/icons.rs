//! src/view/icons.rs
//! ============================================================================
//! # Entry Icons (Nerd Fonts)
//!
//! Icons shown in front of each listing row.

use crate::model::entry::DirectoryEntry;

pub const BACK_ICON: &str = "";
pub const FOLDER_ICON: &str = "";
pub const FILE_ICON: &str = "";
pub const LOCK_ICON: &str = "";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryIcon {
    Back,
    Dir,
    File,
}

impl EntryIcon {
    pub fn for_entry(entry: &DirectoryEntry) -> Self {
        if entry.is_parent_marker {
            Self::Back
        } else if entry.is_directory {
            Self::Dir
        } else {
            Self::File
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Back => BACK_ICON,
            Self::Dir => FOLDER_ICON,
            Self::File => FILE_ICON,
        }
    }
}

/// Lock overlay for entries the server reports as not permitted.
pub fn lock_indicator(entry: &DirectoryEntry) -> Option<&'static str> {
    (!entry.has_permission).then_some(LOCK_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_follows_entry_kind() {
        assert_eq!(EntryIcon::for_entry(&DirectoryEntry::parent_of("/home")), EntryIcon::Back);
        assert_eq!(EntryIcon::for_entry(&DirectoryEntry::directory("a", "/a")), EntryIcon::Dir);
        assert_eq!(EntryIcon::for_entry(&DirectoryEntry::file("b", "/b")), EntryIcon::File);
    }

    #[test]
    fn lock_only_without_permission() {
        let open = DirectoryEntry::directory("a", "/a");
        let locked = DirectoryEntry::directory("root", "/root").with_permission(false);
        assert_eq!(lock_indicator(&open), None);
        assert_eq!(lock_indicator(&locked), Some(LOCK_ICON));
        assert_eq!(EntryIcon::for_entry(&locked), EntryIcon::Dir);
    }
}
