//! Title bar and common chrome

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::components::nav_bar::NavBar;
use crate::theme::Styles;
use crate::types::Language;
use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn title_text(language: Language) -> &'static str {
    match language {
        Language::En => "Tax calculator",
        Language::Fr => "Calcul des taxes",
    }
}

/// Render the title bar
pub fn render_title(f: &mut Frame, area: Rect, language: Language) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let title = Paragraph::new(title_text(language))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active()),
        )
        .alignment(Alignment::Center)
        .style(Styles::title());
    f.render_widget(title, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let nav_items = keybinding_ctx.get_nav_items(&state.mode, state.language);
    NavBar::new(nav_items).render(f, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&state.mode, keybinding_ctx, state.language);
    help_overlay.render(f, f.area());
}
