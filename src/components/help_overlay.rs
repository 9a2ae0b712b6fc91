//! Help overlay component
//!
//! Displays context-sensitive help in a floating window.

use super::centered_rect;
use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::AppMode;
use crate::theme::{Colors, Styles};
use crate::types::Language;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Help overlay component
pub struct HelpOverlay {
    block_title: &'static str,
    content: Vec<Line<'static>>,
}

/// Fixed overlay text in one language
struct OverlayText {
    heading: &'static str,
    block_title: &'static str,
    formulas: &'static str,
    footer: &'static str,
}

impl OverlayText {
    fn for_language(language: Language) -> Self {
        match language {
            Language::En => Self {
                heading: "  Tax Calculator Help  ",
                block_title: " Help ",
                formulas: "Monthly rows count salary x 12, freelance rows rate x hours x days.",
                footer: "Press ? or Esc to close",
            },
            Language::Fr => Self {
                heading: "  Aide du calcul des taxes  ",
                block_title: " Aide ",
                formulas: "Un revenu de CDI compte salaire x 12, un freelance taux x heures x jours.",
                footer: "Appuyez sur ? ou Échap pour fermer",
            },
        }
    }
}

impl HelpOverlay {
    /// Create a new help overlay for the given mode
    pub fn new(mode: &AppMode, keybinding_ctx: &KeybindingContext, language: Language) -> Self {
        let sections = keybinding_ctx.get_help_content(mode, language);
        let text = OverlayText::for_language(language);
        Self {
            block_title: text.block_title,
            content: Self::build_content(&sections, &text),
        }
    }

    fn build_content(sections: &[HelpSection], text: &OverlayText) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(text.heading, Styles::title())]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )]));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{:<10}", key), Styles::nav_key()),
                    Span::styled(description.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(
            text.formulas,
            Styles::text_secondary(),
        )]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled(text.footer, Styles::text_muted())]));

        lines
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.content
    }

    /// Render the help overlay
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let area = centered_rect(parent, 60, 70, (50, 15), (80, 35));
        f.render_widget(Clear, area);
        let paragraph = Paragraph::new(self.content.clone())
            .block(
                Block::default()
                    .title(self.block_title)
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active())
                    .style(Styles::panel_bg()),
            )
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }
}
