//! src/view/components/error_overlay.rs
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::view::theme;

pub struct ErrorOverlay<'a> {
    message: &'a str,
}

impl<'a> ErrorOverlay<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(" Error ")
            .title_bottom(Line::from(" Esc to dismiss ").right_aligned())
            .borders(Borders::ALL)
            .border_style(theme::error_border_style())
            .style(theme::base_style());

        let text = Paragraph::new(self.message)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, area);
        frame.render_widget(text, area);
    }
}
