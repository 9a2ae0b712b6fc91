//! Application module
//!
//! Contains the main application loop and key dispatch.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, Cursor, StatusMessage)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppMode, AppState, Cursor, StatusKind, StatusMessage};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::config_file::CalculatorConfig;
use crate::error::Result;
use crate::input::InputResult;
use crate::types::IncomeType;
use crate::ui::UiRenderer;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tracing::{debug, info};

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Main application struct
pub struct App {
    state: AppState,
    ui_renderer: UiRenderer,
    /// Keybinding context for dispatch and navigation hints
    keybinding_context: KeybindingContext,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &CalculatorConfig) -> Self {
        info!("Creating new App instance");
        Self {
            state: AppState::new(config),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Run the event loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            self.draw(terminal)?;

            if crossterm::event::poll(POLL_INTERVAL)? {
                match crossterm::event::read()? {
                    Event::Key(key_event) => {
                        if self.handle_key_event(key_event) {
                            break;
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "terminal resized");
                    }
                    _ => {}
                }
            }
        }

        info!("Main application loop finished");
        Ok(())
    }

    /// Render one frame
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.state.refresh();
        terminal.draw(|f| {
            self.ui_renderer
                .render(f, &self.state, &self.keybinding_context)
        })?;
        Ok(())
    }

    /// Handle keyboard input events. Returns `true` when the app should exit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if key_event.kind != KeyEventKind::Press {
            return false;
        }

        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            info!("Interrupted, exiting");
            return true;
        }

        if self.state.help_visible {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                self.state.help_visible = false;
            }
            return false;
        }

        let should_quit = match self.state.mode {
            AppMode::Editing => {
                self.handle_editing_key(key_event);
                false
            }
            AppMode::Table => {
                match self
                    .keybinding_context
                    .resolve(&self.state.mode, &key_event)
                {
                    Some(action) => self.apply_action(action),
                    None => false,
                }
            }
        };

        self.state.refresh();
        should_quit
    }

    fn handle_editing_key(&mut self, key_event: KeyEvent) {
        let Some(dialog) = self.state.edit_dialog.as_mut() else {
            self.state.mode = AppMode::Table;
            return;
        };
        match dialog.handle_input(key_event) {
            InputResult::Confirm(text) => self.state.commit_edit(&text),
            InputResult::Cancel => self.state.cancel_edit(),
            InputResult::Continue => {}
        }
    }

    /// Apply a table action. Returns `true` on quit.
    fn apply_action(&mut self, action: KeyAction) -> bool {
        debug!(?action, "table action");
        match action {
            KeyAction::NavigateUp => self.state.move_row(-1),
            KeyAction::NavigateDown => self.state.move_row(1),
            KeyAction::NextField => self.state.move_field(1),
            KeyAction::PreviousField => self.state.move_field(-1),
            KeyAction::FirstRow => self.state.first_row(),
            KeyAction::LastRow => self.state.last_row(),
            KeyAction::Edit => self.state.open_editor(),
            KeyAction::AddMonthly => self.state.add_row(IncomeType::Monthly),
            KeyAction::AddFreelance => self.state.add_row(IncomeType::Freelance),
            KeyAction::DeleteRow => self.state.delete_selected_row(),
            KeyAction::Submit => self.state.submit(),
            KeyAction::Help => self.state.toggle_help(),
            KeyAction::Quit => {
                info!("Quit requested");
                return true;
            }
            KeyAction::Confirm | KeyAction::Cancel => {}
        }
        false
    }
}
