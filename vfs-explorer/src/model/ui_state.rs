//! src/model/ui_state.rs
//! ============================================================================
//! # UIState: what the terminal frontend draws
//!
//! `UIState` is the controller's render collaborator. Each callback updates
//! the visible state and raises a redraw flag; the renderer reads it back
//! when painting the next frame.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use compact_str::CompactString;

use crate::model::entry::DirectoryEntry;
use crate::view::traits::RenderSink;

/// Loading indicator shown between dispatch and settlement.
#[derive(Debug, Clone)]
pub struct LoadingState {
    pub message: CompactString,
    pub start_time: Instant,
}

impl LoadingState {
    fn new() -> Self {
        Self {
            message: CompactString::const_new("Loading directory"),
            start_time: Instant::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UIState {
    /// Entries of the last rendered listing, parent entry included.
    pub entries: Vec<DirectoryEntry>,

    /// Label of the directory that `entries` belongs to.
    pub path_label: String,

    pub selected: Option<usize>,

    pub loading: Option<LoadingState>,

    /// Pending error notification, shown until dismissed.
    pub error: Option<String>,

    /// Server-side scan time of the last listing.
    pub scan_time: Option<Duration>,

    pub last_updated: Option<DateTime<Local>>,

    pub show_sizes: bool,

    redraw: bool,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            path_label: String::new(),
            selected: None,
            loading: None,
            error: None,
            scan_time: None,
            last_updated: None,
            show_sizes: true,
            redraw: true,
        }
    }
}

impl UIState {
    pub fn new(show_sizes: bool) -> Self {
        Self {
            show_sizes,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    #[inline]
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    #[inline]
    pub fn clear_redraw(&mut self) {
        self.redraw = false;
    }

    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.selected.and_then(|idx| self.entries.get(idx))
    }

    pub fn move_selection_up(&mut self) {
        if let Some(idx) = self.selected {
            self.select(idx.saturating_sub(1));
        }
    }

    pub fn move_selection_down(&mut self) {
        if let Some(idx) = self.selected {
            self.select(idx.saturating_add(1));
        }
    }

    pub fn select_first(&mut self) {
        self.select(0);
    }

    pub fn select_last(&mut self) {
        self.select(usize::MAX);
    }

    /// Selects `idx`, clamped to the entry list.
    pub fn select(&mut self, idx: usize) {
        let clamped = match self.entries.len() {
            0 => None,
            len => Some(idx.min(len - 1)),
        };
        if clamped != self.selected {
            self.selected = clamped;
            self.redraw = true;
        }
    }

    pub fn dismiss_error(&mut self) {
        if self.error.take().is_some() {
            self.redraw = true;
        }
    }
}

impl RenderSink for UIState {
    fn show_loading(&mut self) {
        self.loading.get_or_insert_with(LoadingState::new);
        self.redraw = true;
    }

    fn hide_loading(&mut self) {
        self.loading = None;
        self.redraw = true;
    }

    fn render_success(&mut self, entries: &[DirectoryEntry], path: &str) {
        let changed_dir = self.path_label != path;

        self.entries = entries.to_vec();
        self.path_label = path.to_string();
        self.error = None;
        self.last_updated = Some(Local::now());

        // A reload keeps the cursor where it was; a new directory starts at
        // its first real entry.
        let start = match self.selected {
            Some(idx) if !changed_dir => idx,
            _ => usize::from(entries.first().is_some_and(|e| e.is_parent_marker)),
        };
        self.selected = None;
        self.select(start);
        self.redraw = true;
    }

    fn render_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.redraw = true;
    }

    fn record_scan_time(&mut self, elapsed: Option<Duration>) {
        self.scan_time = elapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_listing() -> Vec<DirectoryEntry> {
        vec![
            DirectoryEntry::parent_of("/home"),
            DirectoryEntry::directory("a", "/home/a"),
            DirectoryEntry::file("b", "/home/b"),
        ]
    }

    #[test]
    fn success_replaces_entries_and_selects_first_real_entry() {
        let mut ui = UIState::default();
        ui.render_error("boom");
        ui.render_success(&home_listing(), "/home");

        assert_eq!(ui.path_label, "/home");
        assert_eq!(ui.entries.len(), 3);
        assert_eq!(ui.selected, Some(1));
        assert!(ui.error.is_none());
        assert!(ui.last_updated.is_some());
    }

    #[test]
    fn root_listing_selects_index_zero() {
        let mut ui = UIState::default();
        ui.render_success(&[DirectoryEntry::directory("home", "/home")], "/");
        assert_eq!(ui.selected, Some(0));
    }

    #[test]
    fn reload_keeps_cursor() {
        let mut ui = UIState::default();
        ui.render_success(&home_listing(), "/home");
        ui.move_selection_down();
        assert_eq!(ui.selected, Some(2));

        ui.render_success(&home_listing()[..2], "/home");
        assert_eq!(ui.selected, Some(1));
    }

    #[test]
    fn selection_is_clamped() {
        let mut ui = UIState::default();
        ui.move_selection_down();
        assert_eq!(ui.selected, None);

        ui.render_success(&home_listing(), "/home");
        ui.select_last();
        ui.move_selection_down();
        assert_eq!(ui.selected, Some(2));
        ui.select_first();
        ui.move_selection_up();
        assert_eq!(ui.selected, Some(0));
        assert_eq!(ui.selected_entry().map(|e| e.is_parent_marker), Some(true));
    }

    #[test]
    fn error_leaves_entries_until_dismissed() {
        let mut ui = UIState::default();
        ui.render_success(&home_listing(), "/home");
        ui.clear_redraw();

        ui.render_error("access denied");
        assert!(ui.needs_redraw());
        assert_eq!(ui.error.as_deref(), Some("access denied"));
        assert_eq!(ui.path_label, "/home");
        assert_eq!(ui.entries.len(), 3);

        ui.dismiss_error();
        assert!(ui.error.is_none());
    }

    #[test]
    fn repeated_show_keeps_loading_start_time() {
        let mut ui = UIState::default();
        ui.show_loading();
        let started = ui.loading.as_ref().map(|l| l.start_time);

        std::thread::sleep(Duration::from_millis(2));
        ui.show_loading();
        assert_eq!(ui.loading.as_ref().map(|l| l.start_time), started);

        ui.hide_loading();
        ui.hide_loading();
        assert!(!ui.is_loading());
    }

    #[test]
    fn loading_toggles() {
        let mut ui = UIState::default();
        ui.show_loading();
        assert!(ui.is_loading());
        ui.hide_loading();
        assert!(!ui.is_loading());
    }
}
