//! Input handling module
//!
//! Text input dialog used to edit one numeric cell of the income table.

use crate::income::IncomeField;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of feeding a key to a dialog
#[derive(Debug, Clone, PartialEq)]
pub enum InputResult {
    /// User confirmed the entered text
    Confirm(String),
    /// User cancelled the dialog
    Cancel,
    /// Keep the dialog open
    Continue,
}

/// Edit dialog for a single cell
#[derive(Debug, Clone, PartialEq)]
pub struct InputDialog {
    /// Row being edited
    pub row: usize,
    /// Field being edited
    pub field: IncomeField,
    /// Text typed so far
    pub buffer: String,
    /// Cursor position, in characters
    pub cursor: usize,
    /// Inline error shown under the input, cleared on the next keystroke
    pub error: Option<String>,
}

impl InputDialog {
    /// Open a dialog pre-filled with the current value of the cell
    pub fn new(row: usize, field: IncomeField, initial: Option<f64>) -> Self {
        let buffer = initial.map(|value| value.to_string()).unwrap_or_default();
        let cursor = buffer.chars().count();
        Self {
            row,
            field,
            buffer,
            cursor,
            error: None,
        }
    }

    /// Record a rejected value; the dialog stays open
    pub fn reject(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Handle keyboard input for the dialog
    pub fn handle_input(&mut self, key_event: KeyEvent) -> InputResult {
        match key_event.code {
            KeyCode::Enter => return InputResult::Confirm(self.buffer.clone()),
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_char_at(self.cursor);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.buffer.chars().count() {
                    self.remove_char_at(self.cursor);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.buffer.chars().count(),
            KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.clear();
                self.cursor = 0;
            }
            KeyCode::Char(c) if Self::accepts(c) => {
                let byte_index = self.byte_index(self.cursor);
                self.buffer.insert(byte_index, c);
                self.cursor += 1;
            }
            _ => return InputResult::Continue,
        }
        self.error = None;
        InputResult::Continue
    }

    /// Characters that can appear in a number
    fn accepts(c: char) -> bool {
        c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+' | 'e' | 'E')
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(index, _)| index)
            .unwrap_or(self.buffer.len())
    }

    fn remove_char_at(&mut self, char_index: usize) {
        let byte_index = self.byte_index(char_index);
        if byte_index < self.buffer.len() {
            self.buffer.remove(byte_index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(dialog: &mut InputDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_prefilled_with_current_value() {
        let dialog = InputDialog::new(0, IncomeField::HoursPerDay, Some(8.0));
        assert_eq!(dialog.buffer, "8");
        assert_eq!(dialog.cursor, 1);

        let empty = InputDialog::new(0, IncomeField::Year, None);
        assert_eq!(empty.buffer, "");
    }

    #[test]
    fn test_typing_and_confirm() {
        let mut dialog = InputDialog::new(0, IncomeField::MonthlySalary, None);
        type_text(&mut dialog, "1250.5");
        assert_eq!(
            dialog.handle_input(key(KeyCode::Enter)),
            InputResult::Confirm("1250.5".to_string())
        );
    }

    #[test]
    fn test_letters_are_ignored() {
        let mut dialog = InputDialog::new(0, IncomeField::MonthlySalary, None);
        type_text(&mut dialog, "12a3");
        assert_eq!(dialog.buffer, "123");
    }

    #[test]
    fn test_editing_keys() {
        let mut dialog = InputDialog::new(0, IncomeField::Year, Some(2020.0));
        dialog.handle_input(key(KeyCode::Backspace));
        assert_eq!(dialog.buffer, "202");
        dialog.handle_input(key(KeyCode::Home));
        dialog.handle_input(key(KeyCode::Delete));
        assert_eq!(dialog.buffer, "02");
        type_text(&mut dialog, "1");
        assert_eq!(dialog.buffer, "102");
        dialog.handle_input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(dialog.buffer, "");
    }

    #[test]
    fn test_cancel() {
        let mut dialog = InputDialog::new(0, IncomeField::Year, Some(2020.0));
        assert_eq!(dialog.handle_input(key(KeyCode::Esc)), InputResult::Cancel);
    }

    #[test]
    fn test_error_cleared_on_edit() {
        let mut dialog = InputDialog::new(0, IncomeField::Year, None);
        dialog.reject("Year must be a number");
        assert!(dialog.error.is_some());
        type_text(&mut dialog, "2");
        assert!(dialog.error.is_none());
    }
}
