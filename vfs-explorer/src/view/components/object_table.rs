//! src/view/components/object_table.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, HighlightSpacing, Row, Table, TableState},
};

use crate::{
    model::{entry::DirectoryEntry, ui_state::UIState},
    view::{
        icons::{EntryIcon, lock_indicator},
        theme,
    },
};

pub struct EntryTable;

impl EntryTable {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame<'_>, ui_state: &UIState, area: Rect) {
        let header_cells = if ui_state.show_sizes {
            vec!["Name", "Size"]
        } else {
            vec!["Name"]
        };
        let header = Row::new(header_cells)
            .style(theme::header_style())
            .bottom_margin(1);

        let rows: Vec<Row<'_>> = ui_state
            .entries
            .iter()
            .map(|entry| entry_row(entry, ui_state.show_sizes))
            .collect();

        let widths: &[Constraint] = if ui_state.show_sizes {
            &[Constraint::Fill(1), Constraint::Length(12)]
        } else {
            &[Constraint::Fill(1)]
        };

        let mut table_state = TableState::default().with_selected(ui_state.selected);

        let title = if ui_state.path_label.is_empty() {
            " … ".to_string()
        } else {
            format!(" {} ", ui_state.path_label)
        };

        let table = Table::new(rows, widths.iter().copied())
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_style(Style::default().fg(theme::PURPLE).bold())
                    .border_style(theme::border_style())
                    .style(Style::default().bg(theme::BACKGROUND)),
            )
            .row_highlight_style(theme::highlight_style())
            .highlight_symbol("▶ ")
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, &mut table_state);
    }
}

impl Default for EntryTable {
    fn default() -> Self {
        Self::new()
    }
}

fn entry_row(entry: &DirectoryEntry, show_sizes: bool) -> Row<'static> {
    let style = if entry.is_parent_marker {
        theme::parent_entry_style()
    } else if !entry.has_permission {
        theme::locked_entry_style()
    } else if entry.is_directory {
        theme::directory_style()
    } else {
        theme::file_style()
    };

    let icon = EntryIcon::for_entry(entry).glyph();
    let name = match lock_indicator(entry) {
        Some(lock) => format!("{icon} {} {lock}", entry.name),
        None => format!("{icon} {}", entry.name),
    };

    let mut cells = vec![Cell::from(name)];
    if show_sizes {
        cells.push(Cell::from(entry.human_size().unwrap_or_default()));
    }

    Row::new(cells).style(style)
}
