//! Tests for Application State Management
//!
//! These tests drive `App` through key events the way a user would:
//! - Adding and deleting rows
//! - Editing cells through the dialog
//! - Submitting valid and invalid forms
//! - Help overlay and quit handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use taxcalc::app::{AppMode, StatusKind};
use taxcalc::{App, CalculatorConfig, IncomeField, IncomeType, Language};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(key(code))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Open the editor on the focused cell, replace its content and confirm
fn edit_focused(app: &mut App, text: &str) {
    press(app, KeyCode::Enter);
    app.handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
    type_text(app, text);
    press(app, KeyCode::Enter);
}

fn new_app() -> App {
    App::new(&CalculatorConfig::default())
}

// =============================================================================
// Initial State Tests
// =============================================================================

#[test]
fn test_app_starts_with_empty_form() {
    let app = new_app();
    let state = app.state();
    assert_eq!(state.mode, AppMode::Table);
    assert!(state.form.is_empty());
    assert_eq!(state.totals.total, 0.0);
    assert_eq!(state.totals.total_after_taxes, 0.0);
    assert!(!state.help_visible);
    assert!(state.edit_dialog.is_none());
}

#[test]
fn test_app_uses_configured_language() {
    let config = CalculatorConfig {
        language: Language::Fr,
        ..CalculatorConfig::default()
    };
    let app = App::new(&config);
    assert_eq!(app.state().language, Language::Fr);
}

// =============================================================================
// Row Action Tests
// =============================================================================

#[test]
fn test_m_appends_monthly_row_with_defaults() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));

    let state = app.state();
    assert_eq!(state.form.len(), 1);
    let row = state.form.row(0).unwrap();
    assert_eq!(row.income_type, IncomeType::Monthly);
    assert_eq!(row.monthly_salary, Some(0.0));
    assert_eq!(row.year, Some(2020.0));
    assert_eq!(state.cursor.field, IncomeField::MonthlySalary);
}

#[test]
fn test_f_appends_freelance_row_with_defaults() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('f'));

    let row = app.state().form.row(0).unwrap();
    assert_eq!(row.income_type, IncomeType::Freelance);
    assert_eq!(row.hourly_rate, Some(0.0));
    assert_eq!(row.hours_per_day, Some(8.0));
    assert_eq!(row.days_per_year, Some(220.0));
    assert_eq!(row.year, Some(2020.0));
}

#[test]
fn test_uppercase_keys_add_and_quit() {
    let mut app = new_app();
    app.handle_key_event(KeyEvent::new(KeyCode::Char('M'), KeyModifiers::SHIFT));
    app.handle_key_event(KeyEvent::new(KeyCode::Char('F'), KeyModifiers::SHIFT));

    let state = app.state();
    assert_eq!(state.form.len(), 2);
    assert_eq!(state.form.row(0).unwrap().income_type, IncomeType::Monthly);
    assert_eq!(state.form.row(1).unwrap().income_type, IncomeType::Freelance);

    let quit = app.handle_key_event(KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT));
    assert!(quit);
}

#[test]
fn test_add_then_delete_restores_rows() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));
    edit_focused(&mut app, "1500");
    let before = app.state().form.values();

    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.state().form.len(), 2);
    press(&mut app, KeyCode::Char('d'));

    assert_eq!(app.state().form.values(), before);
    assert_eq!(app.state().totals.total, 18000.0);
}

#[test]
fn test_delete_on_empty_form_is_noop() {
    let mut app = new_app();
    press(&mut app, KeyCode::Delete);
    assert!(app.state().form.is_empty());
}

#[test]
fn test_delete_middle_row_keeps_order() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));
    edit_focused(&mut app, "100");
    press(&mut app, KeyCode::Char('m'));
    edit_focused(&mut app, "200");
    press(&mut app, KeyCode::Char('m'));
    edit_focused(&mut app, "300");

    press(&mut app, KeyCode::Up);
    assert_eq!(app.state().cursor.row, 1);
    press(&mut app, KeyCode::Char('d'));

    let salaries: Vec<Option<f64>> = app
        .state()
        .form
        .values()
        .iter()
        .map(|row| row.monthly_salary)
        .collect();
    assert_eq!(salaries, vec![Some(100.0), Some(300.0)]);
    assert_eq!(app.state().cursor.row, 1);
}

// =============================================================================
// Editing Tests
// =============================================================================

#[test]
fn test_editing_monthly_salary_updates_totals() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));
    edit_focused(&mut app, "1000");

    let state = app.state();
    assert_eq!(state.mode, AppMode::Table);
    assert_eq!(state.totals.total, 12000.0);
    assert!((state.totals.total_after_taxes - 2640.0).abs() < 1e-9);
}

#[test]
fn test_freelance_row_totals() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('f'));
    edit_focused(&mut app, "50");

    let state = app.state();
    assert_eq!(state.totals.total, 88000.0);
    assert!((state.totals.total_after_taxes - 70400.0).abs() < 1e-9);
}

#[test]
fn test_editor_rejects_non_numeric_text() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Enter);
    app.handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
    type_text(&mut app, "1.2.3");
    press(&mut app, KeyCode::Enter);

    let state = app.state();
    assert_eq!(state.mode, AppMode::Editing);
    let dialog = state.edit_dialog.as_ref().unwrap();
    assert!(dialog.error.as_ref().unwrap().contains("must be a number"));
    assert_eq!(state.form.row(0).unwrap().monthly_salary, Some(0.0));
}

#[test]
fn test_escape_cancels_edit() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "99");
    press(&mut app, KeyCode::Esc);

    let state = app.state();
    assert_eq!(state.mode, AppMode::Table);
    assert_eq!(state.form.row(0).unwrap().monthly_salary, Some(0.0));
}

#[test]
fn test_quit_key_is_text_while_editing() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Enter);
    assert!(!press(&mut app, KeyCode::Char('q')));
    assert_eq!(app.state().mode, AppMode::Editing);
}

#[test]
fn test_clearing_required_field_marks_it_invalid() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));
    edit_focused(&mut app, "");

    let state = app.state();
    assert_eq!(state.form.row(0).unwrap().monthly_salary, None);
    assert!(state.errors.for_cell(0, IncomeField::MonthlySalary).is_some());
    assert_eq!(state.totals.total, 0.0);
}

// =============================================================================
// Navigation Tests
// =============================================================================

#[test]
fn test_field_navigation_skips_hidden_columns() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Right);
    assert_eq!(app.state().cursor.field, IncomeField::Year);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.state().cursor.field, IncomeField::Year);
    press(&mut app, KeyCode::Left);
    assert_eq!(app.state().cursor.field, IncomeField::MonthlySalary);
}

#[test]
fn test_row_navigation_is_clamped() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Char('f'));
    press(&mut app, KeyCode::Down);
    assert_eq!(app.state().cursor.row, 1);
    press(&mut app, KeyCode::Home);
    assert_eq!(app.state().cursor.row, 0);
    press(&mut app, KeyCode::Up);
    assert_eq!(app.state().cursor.row, 0);
}

// =============================================================================
// Submit Tests
// =============================================================================

#[test]
fn test_submit_valid_form_reports_success() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));
    edit_focused(&mut app, "1000");
    press(&mut app, KeyCode::Char('s'));

    let status = app.state().status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
}

#[test]
fn test_submit_invalid_form_focuses_first_error() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Char('f'));
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);
    edit_focused(&mut app, "400");
    press(&mut app, KeyCode::Home);
    press(&mut app, KeyCode::Char('s'));

    let state = app.state();
    let status = state.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(state.cursor.row, 1);
    assert_eq!(state.cursor.field, IncomeField::DaysPerYear);
    assert!(state.errors.for_cell(1, IncomeField::DaysPerYear).is_some());
}

// =============================================================================
// Help and Quit Tests
// =============================================================================

#[test]
fn test_help_toggle() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.state().help_visible);

    // Keys are swallowed while help is shown
    press(&mut app, KeyCode::Char('m'));
    assert!(app.state().form.is_empty());

    press(&mut app, KeyCode::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_quit_keys() {
    let mut app = new_app();
    assert!(press(&mut app, KeyCode::Char('q')));

    let mut app = new_app();
    assert!(app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}

#[test]
fn test_key_release_is_ignored() {
    let mut app = new_app();
    let mut event = key(KeyCode::Char('m'));
    event.kind = KeyEventKind::Release;
    assert!(!app.handle_key_event(event));
    assert!(app.state().form.is_empty());
}

// =============================================================================
// Memoization Tests
// =============================================================================

#[test]
fn test_totals_not_recomputed_without_changes() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('m'));
    let computed = app.state().totals_computations();

    press(&mut app, KeyCode::Char('?'));
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Right);
    app.state_mut().refresh();

    assert_eq!(app.state().totals_computations(), computed);
}
