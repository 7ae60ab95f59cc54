//! src/view/traits.rs
//! ============================================================================
//! # Render collaborator
//!
//! The navigation controller never draws anything itself. It drives an
//! implementation of [`RenderSink`] through the loading / success / error
//! lifecycle of each navigation.

use std::time::Duration;

use crate::model::entry::DirectoryEntry;

pub trait RenderSink {
    /// Show the busy indicator. Must be idempotent.
    fn show_loading(&mut self);

    /// Hide the busy indicator. Must be idempotent.
    fn hide_loading(&mut self);

    /// Replace the visible entry list and the current-path label.
    fn render_success(&mut self, entries: &[DirectoryEntry], path: &str);

    /// Surface a failed navigation to the user.
    fn render_error(&mut self, message: &str);

    /// Scan time reported by the backend for the listing about to be shown.
    fn record_scan_time(&mut self, _elapsed: Option<Duration>) {}
}
