//! src/view/ui.rs
//! ============================================================
//! Frame renderer: entry table, status bar, then whichever
//! overlays are active on top.

use std::time::{Duration, Instant};

use ratatui::prelude::*;
use tracing::{instrument, trace};

use crate::{
    model::ui_state::UIState,
    view::components::{
        error_overlay::ErrorOverlay, loading_overlay::LoadingOverlay,
        object_table::EntryTable, status_bar::StatusBar,
    },
};

pub struct UIRenderer {
    table: EntryTable,
    status_bar: StatusBar,
    loading: LoadingOverlay,
    stats: RenderStats,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RenderStats {
    pub frames: u64,
    pub slow: u64,
    pub total: Duration,
}

impl RenderStats {
    pub fn avg_frame_time(&self) -> Duration {
        if self.frames == 0 {
            Duration::ZERO
        } else {
            let nanos = self.total.as_nanos() / u128::from(self.frames);
            Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
        }
    }
}

impl UIRenderer {
    pub fn new() -> Self {
        Self {
            table: EntryTable::new(),
            status_bar: StatusBar::new(),
            loading: LoadingOverlay::new(),
            stats: RenderStats::default(),
        }
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render(&mut self, frame: &mut Frame<'_>, ui_state: &UIState) {
        let start = Instant::now();

        let [main, status] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .areas(frame.area());

        self.table.render(frame, ui_state, main);
        self.status_bar.render(frame, ui_state, status);

        if let Some(loading) = &ui_state.loading {
            self.loading
                .render(frame, loading, centered_rect(40, 5, main));
        }
        if let Some(message) = &ui_state.error {
            ErrorOverlay::new(message).render(frame, centered_rect(60, 7, main));
        }

        let elapsed = start.elapsed();
        self.stats.frames += 1;
        self.stats.total += elapsed;
        if elapsed.as_millis() > 16 {
            self.stats.slow += 1;
        }
        trace!(elapsed_us = elapsed.as_micros() as u64, "Frame rendered");
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Box of `width_pct` percent of `area`'s width and `height` rows, centered.
fn centered_rect(width_pct: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width.saturating_mul(width_pct) / 100).max(20).min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::DirectoryEntry;
    use crate::view::traits::RenderSink;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn average_survives_huge_frame_counts() {
        let stats = RenderStats {
            frames: u64::from(u32::MAX) + 1,
            slow: 0,
            total: Duration::from_secs(u64::from(u32::MAX) + 1),
        };
        assert_eq!(stats.avg_frame_time(), Duration::from_secs(1));
        assert_eq!(RenderStats::default().avg_frame_time(), Duration::ZERO);
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 30, 4);
        let rect = centered_rect(60, 7, area);
        assert!(rect.width <= area.width);
        assert_eq!(rect.height, 4);
        assert_eq!(rect.y, 0);
    }

    #[test]
    fn draws_listing_and_error() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut renderer = UIRenderer::new();
        let mut ui = UIState::default();
        ui.render_success(
            &[
                DirectoryEntry::parent_of("/home"),
                DirectoryEntry::directory("docs", "/home/docs"),
            ],
            "/home",
        );
        ui.render_error("access denied");

        terminal.draw(|frame| renderer.render(frame, &ui)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("/home"));
        assert!(text.contains("docs"));
        assert!(text.contains("access denied"));
        assert_eq!(renderer.stats().frames, 1);
    }

    #[test]
    fn draws_loading_overlay() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut renderer = UIRenderer::new();
        let mut ui = UIState::default();
        ui.show_loading();

        terminal.draw(|frame| renderer.render(frame, &ui)).unwrap();
        assert!(buffer_text(&terminal).contains("Loading"));
    }
}
