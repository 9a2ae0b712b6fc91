//! Application state definitions
//!
//! `AppState` owns the income form and everything the UI derives from it.
//! All operations here are synchronous and terminal-free so they can be
//! driven directly from tests.

use crate::calculations::Totals;
use crate::config_file::CalculatorConfig;
use crate::form::{IncomeForm, MemoizedTotals};
use crate::income::IncomeField;
use crate::input::InputDialog;
use crate::types::{IncomeType, Language};
use crate::validation::ValidationErrors;
use tracing::{debug, info};

/// Application operating modes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Browsing the income table
    Table,
    /// Edit dialog open for one cell
    Editing,
}

/// Focused cell of the income table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub field: IncomeField,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            row: 0,
            field: IncomeField::MonthlySalary,
        }
    }
}

/// Severity of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Feedback shown under the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// The income rows being edited
    pub form: IncomeForm,
    /// Focused cell
    pub cursor: Cursor,
    /// Open edit dialog, present exactly when `mode == Editing`
    pub edit_dialog: Option<InputDialog>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Status message for user feedback
    pub status: Option<StatusMessage>,
    /// Label language
    pub language: Language,
    /// Validation state of the form at the last refresh
    pub errors: ValidationErrors,
    /// Totals at the last refresh
    pub totals: Totals,
    memo: MemoizedTotals,
    validated_revision: Option<u64>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}

impl AppState {
    pub fn new(config: &CalculatorConfig) -> Self {
        let mut state = Self {
            mode: AppMode::Table,
            form: IncomeForm::new(config.row_defaults()),
            cursor: Cursor::default(),
            edit_dialog: None,
            help_visible: false,
            status: None,
            language: config.language,
            errors: ValidationErrors::default(),
            totals: Totals::default(),
            memo: MemoizedTotals::new(config.tax_rates()),
            validated_revision: None,
        };
        state.refresh();
        state
    }

    /// Recompute derived values if the form changed since the last refresh
    pub fn refresh(&mut self) {
        self.totals = self.memo.get(&self.form);
        if self.validated_revision != Some(self.form.revision()) {
            self.errors = self.form.validate().err().unwrap_or_default();
            self.validated_revision = Some(self.form.revision());
        }
    }

    /// Number of times totals were recomputed (exposes memoization)
    pub fn totals_computations(&self) -> u64 {
        self.memo.computations()
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    // ------------------------------------------------------------------
    // Row actions
    // ------------------------------------------------------------------

    /// Append a row and focus its first field
    pub fn add_row(&mut self, income_type: IncomeType) {
        let index = self.form.append(income_type);
        self.cursor.row = index;
        self.cursor.field = self.visible_fields(index)[0];
        info!(%income_type, rows = self.form.len(), "added income row");
        self.status = Some(StatusMessage::info(match (income_type, self.language) {
            (IncomeType::Freelance, Language::En) => "Freelance income added",
            (IncomeType::Freelance, Language::Fr) => "Revenu de freelance ajouté",
            (_, Language::En) => "Salaried income added",
            (_, Language::Fr) => "Revenu de CDI ajouté",
        }));
        self.refresh();
    }

    /// Delete the focused row
    pub fn delete_selected_row(&mut self) {
        if self.form.is_empty() {
            return;
        }
        match self.form.remove(self.cursor.row) {
            Ok(_) => {
                info!(rows = self.form.len(), "deleted income row");
                if self.cursor.row >= self.form.len() {
                    self.cursor.row = self.form.len().saturating_sub(1);
                }
                self.snap_cursor_field();
                self.status = None;
            }
            Err(e) => self.status = Some(StatusMessage::error(e.to_string())),
        }
        self.refresh();
    }

    /// Run validation the way a form submit would
    pub fn submit(&mut self) {
        self.refresh();
        match self.form.submit() {
            Ok(()) => {
                self.status = Some(StatusMessage::success(match self.language {
                    Language::En => "All rows are valid",
                    Language::Fr => "Toutes les lignes sont valides",
                }));
            }
            Err(errors) => {
                let first = errors
                    .iter()
                    .next()
                    .map(|err| format!("row {}: {}", err.row + 1, err.message(self.language)))
                    .unwrap_or_default();
                self.status = Some(StatusMessage::error(format!(
                    "{} invalid field(s), {}",
                    errors.len(),
                    first
                )));
                if let Some(err) = errors.iter().next() {
                    self.cursor.row = err.row;
                    if let Some(field) = err.field {
                        self.cursor.field = field;
                    }
                    self.snap_cursor_field();
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Open the edit dialog on the focused cell
    pub fn open_editor(&mut self) {
        let Some(row) = self.form.row(self.cursor.row) else {
            self.status = Some(StatusMessage::info(match self.language {
                Language::En => "Add an income row first (M or F)",
                Language::Fr => "Ajoutez d'abord un revenu (M ou F)",
            }));
            return;
        };
        let initial = row.get(self.cursor.field);
        debug!(row = self.cursor.row, field = %self.cursor.field, "opening editor");
        self.edit_dialog = Some(InputDialog::new(self.cursor.row, self.cursor.field, initial));
        self.mode = AppMode::Editing;
    }

    /// Apply the dialog text to the form. The dialog stays open on bad input.
    pub fn commit_edit(&mut self, text: &str) {
        let Some(dialog) = self.edit_dialog.as_mut() else {
            self.mode = AppMode::Table;
            return;
        };
        match self.form.set_field(dialog.row, dialog.field, text) {
            Ok(()) => {
                self.edit_dialog = None;
                self.mode = AppMode::Table;
                self.status = None;
                self.refresh();
            }
            Err(_) => {
                let message = match self.language {
                    Language::En => format!("{} must be a number", dialog.field.label(self.language)),
                    Language::Fr => {
                        format!("{} doit être un nombre", dialog.field.label(self.language))
                    }
                };
                dialog.reject(message);
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_dialog = None;
        self.mode = AppMode::Table;
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    fn visible_fields(&self, row: usize) -> Vec<IncomeField> {
        self.form
            .row(row)
            .map(|r| r.visible_fields())
            .unwrap_or_else(|| IncomeField::ALL.to_vec())
    }

    /// Move the focus `delta` rows, clamped to the table
    pub fn move_row(&mut self, delta: isize) {
        if self.form.is_empty() {
            return;
        }
        let last = self.form.len() - 1;
        self.cursor.row = self.cursor.row.saturating_add_signed(delta).min(last);
        self.snap_cursor_field();
    }

    pub fn first_row(&mut self) {
        self.cursor.row = 0;
        self.snap_cursor_field();
    }

    pub fn last_row(&mut self) {
        self.cursor.row = self.form.len().saturating_sub(1);
        self.snap_cursor_field();
    }

    /// Move the focus `delta` fields within the row, clamped
    pub fn move_field(&mut self, delta: isize) {
        let fields = self.visible_fields(self.cursor.row);
        let current = fields
            .iter()
            .position(|f| *f == self.cursor.field)
            .unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(fields.len() - 1);
        self.cursor.field = fields[next];
    }

    /// Keep the focused field on a column shown for the focused row
    fn snap_cursor_field(&mut self) {
        let fields = self.visible_fields(self.cursor.row);
        if fields.contains(&self.cursor.field) {
            return;
        }
        let target = column_of(self.cursor.field);
        if let Some(nearest) = fields
            .iter()
            .min_by_key(|f| column_of(**f).abs_diff(target))
        {
            self.cursor.field = *nearest;
        }
    }
}

fn column_of(field: IncomeField) -> usize {
    IncomeField::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or(0)
}
