//! src/view/components/loading_overlay.rs
//! ============================================================
//! Indeterminate loading box shown while a listing request is
//! pending. Only the message and elapsed time are drawn.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::model::ui_state::LoadingState;
use crate::view::theme;

pub struct LoadingOverlay;

impl LoadingOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame<'_>, loading: &LoadingState, rect: Rect) {
        let elapsed = loading.start_time.elapsed();

        frame.render_widget(Clear, rect);

        let chrome = Block::default()
            .title(" Loading ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme::overlay_border_style())
            .style(theme::base_style());

        let text = Text::from(vec![
            Line::from(Span::styled(
                loading.message.as_str(),
                Style::default()
                    .fg(theme::YELLOW)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Elapsed: {elapsed:.0?}")),
        ]);

        frame.render_widget(
            Paragraph::new(text)
                .block(chrome)
                .alignment(Alignment::Center),
            rect,
        );
    }
}

impl Default for LoadingOverlay {
    fn default() -> Self {
        Self::new()
    }
}
