//! Navigation bar component
//!
//! Renders the key hints for the current mode on a single line.

use super::keybindings::NavBarItem;
use crate::theme::Styles;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct NavBar {
    items: Vec<NavBarItem>,
}

impl NavBar {
    pub fn new(items: Vec<NavBarItem>) -> Self {
        Self { items }
    }

    /// Build the styled line: ` Key Label  Key Label ...`
    pub fn line(&self) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::with_capacity(self.items.len() * 3);
        for item in &self.items {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(item.key_display.clone(), Styles::nav_key()));
            spans.push(Span::styled(format!(" {} ", item.action_label), Styles::nav_label()));
        }
        Line::from(spans)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        f.render_widget(Paragraph::new(self.line()), area);
    }
}
