//! ``src/model/display_list.rs``
//!
//! Turns a backend listing into the ordered rows the user sees.

use crate::fs::path_resolver::is_root;
use crate::model::entry::DirectoryEntry;

/// Builds the display list for a listing of `path`.
///
/// Entries are copied and stably sorted by name using ordinal comparison,
/// so equal names keep their response order. Unless `path` is the root, a
/// synthetic "go up" entry is prepended and never takes part in the sort.
#[must_use]
pub fn build_display_list(entries: &[DirectoryEntry], path: &str) -> Vec<DirectoryEntry> {
    let mut sorted: Vec<DirectoryEntry> = entries.to_vec();
    sorted.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));

    if is_root(path) {
        return sorted;
    }

    let mut display = Vec::with_capacity(sorted.len() + 1);
    display.push(DirectoryEntry::parent_of(path));
    display.extend(sorted);
    display
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[DirectoryEntry]) -> Vec<&str> {
        list.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn ordinal_order_puts_uppercase_first() {
        let entries = vec![
            DirectoryEntry::file("b", "/b"),
            DirectoryEntry::file("a", "/a"),
            DirectoryEntry::file("C", "/C"),
        ];
        assert_eq!(names(&build_display_list(&entries, "/")), ["C", "a", "b"]);
    }

    #[test]
    fn equal_names_keep_response_order() {
        let entries = vec![
            DirectoryEntry::directory("same", "/x/first").with_permission(false),
            DirectoryEntry::file("a", "/x/a"),
            DirectoryEntry::directory("same", "/x/second"),
        ];
        let list = build_display_list(&entries, "/");
        let paths: Vec<_> = list.iter().map(|e| e.path.as_deref().unwrap()).collect();
        assert_eq!(paths, ["/x/a", "/x/first", "/x/second"]);
    }

    #[test]
    fn parent_entry_leads_non_root_listing() {
        let entries = vec![DirectoryEntry::file("..a", "/home/user/..a")];
        let list = build_display_list(&entries, "/home/user");

        assert_eq!(names(&list), ["../", "..a"]);
        assert!(list[0].is_parent_marker);
        assert_eq!(list[0].path.as_deref(), Some("/home"));
        assert!(!list[1].is_parent_marker);
    }

    #[test]
    fn root_listing_has_no_parent_entry() {
        let entries = vec![DirectoryEntry::directory("home", "/home")];
        let list = build_display_list(&entries, "/");
        assert_eq!(names(&list), ["home"]);
        assert!(list.iter().all(|e| !e.is_parent_marker));
    }

    #[test]
    fn empty_listing_still_offers_parent() {
        let list = build_display_list(&[], "/home");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].path.as_deref(), Some("/"));
    }

    #[test]
    fn input_is_not_mutated() {
        let entries = vec![DirectoryEntry::file("z", "/z"), DirectoryEntry::file("y", "/y")];
        let _ = build_display_list(&entries, "/");
        assert_eq!(names(&entries), ["z", "y"]);
    }
}
