//! Dialog rendering module
//!
//! Renders the cell edit dialog over the income table.

use crate::app::AppState;
use crate::components::centered_rect;
use crate::theme::Styles;
use crate::types::Language;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the edit dialog for the focused cell
pub fn render_edit_dialog(f: &mut Frame, state: &AppState) {
    let Some(dialog) = &state.edit_dialog else {
        return;
    };
    let language = state.language;

    let area = centered_rect(f.area(), 50, 40, (40, 9), (70, 12));
    f.render_widget(Clear, area);

    let title = format!(
        " {} ({} {}) ",
        dialog.field.label(language),
        match language {
            Language::En => "row",
            Language::Fr => "ligne",
        },
        dialog.row + 1
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::panel_bg());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input box
            Constraint::Length(1), // Error
            Constraint::Min(1),    // Instructions
        ])
        .split(inner);

    let unit = dialog.field.unit(language);
    let input = Paragraph::new(Line::from(vec![
        Span::styled(dialog.buffer.clone(), Styles::text()),
        Span::styled(
            if unit.is_empty() {
                String::new()
            } else {
                format!("  {}", unit)
            },
            Styles::text_muted(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if dialog.error.is_some() {
                Styles::error()
            } else {
                Styles::border_active()
            }),
    );
    f.render_widget(input, chunks[0]);

    // Place the terminal cursor inside the input box
    let cursor_x = chunks[0].x + 1 + dialog.cursor as u16;
    if cursor_x < chunks[0].right().saturating_sub(1) {
        f.set_cursor_position(Position::new(cursor_x, chunks[0].y + 1));
    }

    if let Some(error) = &dialog.error {
        f.render_widget(Paragraph::new(error.as_str()).style(Styles::error()), chunks[1]);
    }

    let instructions = match language {
        Language::En => "Enter to save, Esc to cancel, empty clears the field",
        Language::Fr => "Entrée pour valider, Échap pour annuler, vide efface le champ",
    };
    f.render_widget(
        Paragraph::new(instructions).style(Styles::text_muted()),
        chunks[2],
    );
}
