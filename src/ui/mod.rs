//! User interface rendering module
//!
//! Organized into submodules:
//! - `header` - Title bar, navigation bar and help overlay
//! - `table` - Income table, add-row hints, totals and status line
//! - `dialogs` - Cell edit dialog

mod dialogs;
mod header;
mod table;

pub use table::{cell_text, income_type_label, total_lines};

use crate::app::{AppMode, AppState};
use crate::components::keybindings::KeybindingContext;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// UI renderer for the application
///
/// Main entry point for rendering. Delegates to the submodules.
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the complete UI for the current state
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title bar
                Constraint::Min(4),    // Income table
                Constraint::Length(1), // Add-row hints
                Constraint::Length(1), // Focused cell error
                Constraint::Length(4), // Totals
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Navigation bar
            ])
            .split(f.area());

        header::render_title(f, chunks[0], state.language);
        table::render_income_table(f, chunks[1], state);
        table::render_add_hints(f, chunks[2], state.language);
        table::render_field_error(f, chunks[3], state);
        table::render_totals(f, chunks[4], state);
        table::render_status(f, chunks[5], state);
        header::render_nav_bar(f, state, keybinding_ctx, chunks[6]);

        if state.mode == AppMode::Editing {
            dialogs::render_edit_dialog(f, state);
        }

        // Help overlay goes on top of everything
        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}
