//! Income table and summary rendering

use crate::app::{AppMode, AppState, StatusKind};
use crate::calculations::{format_amount, Totals};
use crate::income::{IncomeField, IncomeRow};
use crate::theme::Styles;
use crate::types::{IncomeType, Language};
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Label of the type column
pub fn income_type_label(income_type: IncomeType, language: Language) -> &'static str {
    match (income_type, language) {
        (IncomeType::Monthly, Language::En) => "Salaried",
        (IncomeType::Monthly, Language::Fr) => "CDI",
        (IncomeType::Freelance, _) => "Freelance",
        (IncomeType::Unknown, Language::En) => "Unknown",
        (IncomeType::Unknown, Language::Fr) => "Inconnu",
    }
}

/// Text of one table cell; blank when the field does not apply to the row
pub fn cell_text(row: &IncomeRow, field: IncomeField, language: Language) -> String {
    if !field.applies_to(row.income_type) {
        return String::new();
    }
    match row.get(field) {
        None => "____".to_string(),
        // Years show as entered so a fractional year stays visible next to its error
        Some(value) if field == IncomeField::Year => value.to_string(),
        Some(value) => format!("{} {}", format_amount(value), field.unit(language)),
    }
}

/// The two summary lines
pub fn total_lines(totals: &Totals, language: Language) -> [String; 2] {
    let total = format_amount(totals.total);
    let after = format_amount(totals.total_after_taxes);
    match language {
        Language::En => [
            format!("Total: {} €", total),
            format!("Total after taxes: {} €", after),
        ],
        Language::Fr => [
            format!("Total : {} €", total),
            format!("Total après taxes : {} €", after),
        ],
    }
}

/// Render the editable income table
pub fn render_income_table(f: &mut Frame, area: Rect, state: &AppState) {
    let language = state.language;
    let title = match language {
        Language::En => " Income ",
        Language::Fr => " Revenus ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if state.mode == AppMode::Table {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        });

    if state.form.is_empty() {
        let placeholder = match language {
            Language::En => "No income yet. Press M to add a salaried income or F for a freelance one.",
            Language::Fr => "Aucun revenu. Appuyez sur M pour un revenu de CDI ou F pour du freelance.",
        };
        f.render_widget(
            Paragraph::new(placeholder)
                .style(Styles::text_muted())
                .block(block),
            area,
        );
        return;
    }

    let header_cells = IncomeField::ALL
        .iter()
        .map(|field| Cell::from(field.label(language)))
        .chain(std::iter::once(Cell::from(match language {
            Language::En => "Type",
            Language::Fr => "Type de revenu",
        })));
    let header = Row::new(header_cells).style(Styles::header()).height(1);

    let rows = state.form.rows().iter().enumerate().map(|(index, entry)| {
        let focused_row = index == state.cursor.row;
        let cells = IncomeField::ALL
            .iter()
            .map(|field| {
                let style = cell_style(state, index, *field, focused_row);
                Cell::from(cell_text(&entry.row, *field, language)).style(style)
            })
            .chain(std::iter::once(
                Cell::from(income_type_label(entry.row.income_type, language))
                    .style(Styles::text_secondary()),
            ));
        let row_style = if focused_row {
            Styles::row_highlight()
        } else {
            Style::default()
        };
        Row::new(cells).style(row_style).height(1)
    });

    let widths = [
        Constraint::Percentage(18),
        Constraint::Percentage(18),
        Constraint::Percentage(18),
        Constraint::Percentage(18),
        Constraint::Percentage(10),
        Constraint::Percentage(18),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    let mut table_state = TableState::default();
    table_state.select(Some(state.cursor.row));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn cell_style(state: &AppState, row: usize, field: IncomeField, focused_row: bool) -> Style {
    let focused = focused_row && state.cursor.field == field;
    let invalid = state.errors.for_cell(row, field).is_some();
    match (focused, invalid) {
        (true, _) => Styles::selected(),
        (false, true) => Styles::cell_error(),
        (false, false) => Styles::text(),
    }
}

/// Render the two add-row actions
pub fn render_add_hints(f: &mut Frame, area: Rect, language: Language) {
    let (monthly, freelance) = match language {
        Language::En => ("Add salaried income", "Add freelance income"),
        Language::Fr => ("Ajouter un revenu de CDI", "Ajouter un revenu de Freelance"),
    };
    let line = Line::from(vec![
        Span::styled("[M] ", Styles::nav_key()),
        Span::styled(monthly, Styles::text()),
        Span::raw("    "),
        Span::styled("[F] ", Styles::nav_key()),
        Span::styled(freelance, Styles::text()),
    ]);
    f.render_widget(
        Paragraph::new(line).alignment(ratatui::layout::Alignment::Center),
        area,
    );
}

/// Render the validation message of the focused cell, if any
pub fn render_field_error(f: &mut Frame, area: Rect, state: &AppState) {
    if let Some(err) = state.errors.for_cell(state.cursor.row, state.cursor.field) {
        let text = format!(" {}", err.message(state.language));
        f.render_widget(Paragraph::new(text).style(Styles::error()), area);
    }
}

/// Render the summary figures
pub fn render_totals(f: &mut Frame, area: Rect, state: &AppState) {
    let [total, after] = total_lines(&state.totals, state.language);
    let lines = vec![
        Line::from(Span::styled(total, Styles::total())),
        Line::from(Span::styled(after, Styles::total())),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_inactive());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the status line
pub fn render_status(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(status) = &state.status else {
        return;
    };
    let style = match status.kind {
        StatusKind::Info => Styles::text_secondary(),
        StatusKind::Success => Styles::success(),
        StatusKind::Error => Styles::warning(),
    };
    f.render_widget(Paragraph::new(format!(" {}", status.text)).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        let row = IncomeRow::monthly(1000.0, 2021);
        assert_eq!(
            cell_text(&row, IncomeField::MonthlySalary, Language::Fr),
            "1000 €/ mois"
        );
        assert_eq!(cell_text(&row, IncomeField::Year, Language::En), "2021");
        assert_eq!(cell_text(&row, IncomeField::HourlyRate, Language::En), "");

        let mut row = IncomeRow::freelance(50.0, 8.0, 220.0, 2020);
        row.hours_per_day = None;
        assert_eq!(cell_text(&row, IncomeField::HoursPerDay, Language::En), "____");
    }

    #[test]
    fn test_year_is_not_rounded() {
        let mut row = IncomeRow::monthly(1000.0, 2020);
        row.year = Some(2020.004);
        assert_eq!(cell_text(&row, IncomeField::Year, Language::En), "2020.004");
        row.year = Some(2020.5);
        assert_eq!(cell_text(&row, IncomeField::Year, Language::Fr), "2020.5");
    }

    #[test]
    fn test_total_lines() {
        let totals = Totals {
            total: 12000.0,
            total_after_taxes: 2640.0,
        };
        assert_eq!(
            total_lines(&totals, Language::En),
            ["Total: 12000 €".to_string(), "Total after taxes: 2640 €".to_string()]
        );
        assert_eq!(
            total_lines(&totals, Language::Fr),
            [
                "Total : 12000 €".to_string(),
                "Total après taxes : 2640 €".to_string()
            ]
        );
    }
}
