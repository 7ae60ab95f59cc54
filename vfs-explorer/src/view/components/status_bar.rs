//! src/view/components/status_bar.rs
//!
//! Bottom line: entry count, server scan time and refresh time on the left,
//! key hints on the right.

use std::time::Duration;

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

use crate::{model::ui_state::UIState, view::theme};

const KEY_HINTS: &str = "j/k move · enter open · h up · r reload · q quit";

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame<'_>, ui_state: &UIState, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        Paragraph::new(summary(ui_state))
            .style(theme::base_style())
            .alignment(Alignment::Left)
            .render(layout[0], frame.buffer_mut());

        Paragraph::new(KEY_HINTS)
            .style(theme::status_hint_style())
            .alignment(Alignment::Right)
            .render(layout[1], frame.buffer_mut());
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

fn summary(ui_state: &UIState) -> String {
    // The parent entry is not part of the directory's contents.
    let count = ui_state
        .entries
        .iter()
        .filter(|e| !e.is_parent_marker)
        .count();

    let mut text = format!("{count} entries");
    if let Some(scan) = ui_state.scan_time {
        text.push_str(&format!(" | scanned in {}", format_scan_time(scan)));
    }
    if let Some(updated) = ui_state.last_updated {
        text.push_str(&format!(" | {}", updated.format("%H:%M:%S")));
    }
    text
}

fn format_scan_time(elapsed: Duration) -> String {
    if elapsed.as_millis() >= 1 {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{}µs", elapsed.as_micros())
    }
}
