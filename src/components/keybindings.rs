//! Keybinding system for context-aware keyboard shortcuts
//!
//! A registry of keybindings per application mode. The same registry drives
//! key handling (`resolve`), the navigation bar and the help overlay, so what
//! is displayed is always what is handled.

use crate::app::AppMode;
use crate::types::Language;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    NextField,
    PreviousField,
    FirstRow,
    LastRow,
    Edit,
    AddMonthly,
    AddFreelance,
    DeleteRow,
    Submit,
    Confirm,
    Cancel,
    Help,
    Quit,
}

impl KeyAction {
    /// What the action does, as shown in the nav bar and help overlay
    pub fn description(&self, language: Language) -> &'static str {
        match (self, language) {
            (Self::NavigateUp, Language::En) => "Previous row",
            (Self::NavigateUp, Language::Fr) => "Ligne précédente",
            (Self::NavigateDown, Language::En) => "Next row",
            (Self::NavigateDown, Language::Fr) => "Ligne suivante",
            (Self::NextField, Language::En) => "Next field",
            (Self::NextField, Language::Fr) => "Champ suivant",
            (Self::PreviousField, Language::En) => "Previous field",
            (Self::PreviousField, Language::Fr) => "Champ précédent",
            (Self::FirstRow, Language::En) => "First row",
            (Self::FirstRow, Language::Fr) => "Première ligne",
            (Self::LastRow, Language::En) => "Last row",
            (Self::LastRow, Language::Fr) => "Dernière ligne",
            (Self::Edit, Language::En) => "Edit field",
            (Self::Edit, Language::Fr) => "Modifier le champ",
            (Self::AddMonthly, Language::En) => "Add salaried income",
            (Self::AddMonthly, Language::Fr) => "Ajouter un revenu de CDI",
            (Self::AddFreelance, Language::En) => "Add freelance income",
            (Self::AddFreelance, Language::Fr) => "Ajouter un revenu de Freelance",
            (Self::DeleteRow, Language::En) => "Delete row",
            (Self::DeleteRow, Language::Fr) => "Supprimer la ligne",
            (Self::Submit, Language::En) => "Check form",
            (Self::Submit, Language::Fr) => "Vérifier le formulaire",
            (Self::Confirm, Language::En) => "Save value",
            (Self::Confirm, Language::Fr) => "Valider",
            (Self::Cancel, Language::En) => "Cancel",
            (Self::Cancel, Language::Fr) => "Annuler",
            (Self::Help, Language::En) => "Help",
            (Self::Help, Language::Fr) => "Aide",
            (Self::Quit, Language::En) => "Quit",
            (Self::Quit, Language::Fr) => "Quitter",
        }
    }
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
        }
    }

    /// Whether a key event triggers this binding.
    ///
    /// Shift is ignored for character keys since terminals report it
    /// inconsistently (e.g. `?`). Letters match in either case, so `M` with
    /// caps lock on still adds a row.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let same_key = match (event.code, self.key) {
            (KeyCode::Char(pressed), KeyCode::Char(bound)) => pressed.eq_ignore_ascii_case(&bound),
            (pressed, bound) => pressed == bound,
        };
        if !same_key {
            return false;
        }
        let mut modifiers = event.modifiers;
        if matches!(event.code, KeyCode::Char(_) | KeyCode::BackTab) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        modifiers == self.modifiers
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Bindings available while browsing the table
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
            ),
        ];

        self.mode_bindings.insert(
            AppMode::Table,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down"),
                Keybinding::new(KeyCode::Char('k'), KeyAction::NavigateUp, "K"),
                Keybinding::new(KeyCode::Char('j'), KeyAction::NavigateDown, "J"),
                Keybinding::new(KeyCode::Right, KeyAction::NextField, "Right"),
                Keybinding::new(KeyCode::Left, KeyAction::PreviousField, "Left"),
                Keybinding::new(KeyCode::Tab, KeyAction::NextField, "Tab"),
                Keybinding::with_modifiers(
                    KeyCode::BackTab,
                    KeyModifiers::NONE,
                    KeyAction::PreviousField,
                    "S-Tab",
                ),
                Keybinding::new(KeyCode::Home, KeyAction::FirstRow, "Home"),
                Keybinding::new(KeyCode::End, KeyAction::LastRow, "End"),
                Keybinding::new(KeyCode::Enter, KeyAction::Edit, "Enter"),
                Keybinding::new(KeyCode::Char('m'), KeyAction::AddMonthly, "M"),
                Keybinding::new(KeyCode::Char('f'), KeyAction::AddFreelance, "F"),
                Keybinding::new(KeyCode::Char('d'), KeyAction::DeleteRow, "D"),
                Keybinding::new(KeyCode::Delete, KeyAction::DeleteRow, "Del"),
                Keybinding::new(KeyCode::Char('s'), KeyAction::Submit, "S"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Editing,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Confirm, "Enter"),
                Keybinding::new(KeyCode::Esc, KeyAction::Cancel, "Esc"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }

        // The edit dialog takes raw text, so global shortcuts stay off there
        if *mode != AppMode::Editing {
            bindings.extend(self.global_bindings.iter());
        }

        bindings
    }

    /// Map a key event to the action bound to it in `mode`
    pub fn resolve(&self, mode: &AppMode, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(mode)
            .into_iter()
            .find(|binding| binding.matches(event))
            .map(|binding| binding.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode, language: Language) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions = match mode {
            AppMode::Table => vec![
                KeyAction::NavigateUp,
                KeyAction::NextField,
                KeyAction::Edit,
                KeyAction::AddMonthly,
                KeyAction::AddFreelance,
                KeyAction::DeleteRow,
                KeyAction::Submit,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Editing => vec![KeyAction::Confirm, KeyAction::Cancel],
        };

        let (row_label, field_label) = match language {
            Language::En => ("Row", "Field"),
            Language::Fr => ("Ligne", "Champ"),
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            match action {
                KeyAction::NavigateUp | KeyAction::NavigateDown => items.push(NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: row_label.to_string(),
                }),
                KeyAction::NextField | KeyAction::PreviousField => items.push(NavBarItem {
                    key_display: "Lt/Rt".to_string(),
                    action_label: field_label.to_string(),
                }),
                _ => {
                    if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                        items.push(NavBarItem {
                            key_display: binding.display.clone(),
                            action_label: action.description(language).to_string(),
                        });
                    }
                }
            }
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode, language: Language) -> Vec<HelpSection> {
        let (rows_title, general_title) = match language {
            Language::En => ("Rows", "General"),
            Language::Fr => ("Lignes", "Général"),
        };
        let groups: [(&str, &[KeyAction]); 3] = [
            (
                "Navigation",
                &[
                    KeyAction::NavigateUp,
                    KeyAction::NavigateDown,
                    KeyAction::NextField,
                    KeyAction::PreviousField,
                    KeyAction::FirstRow,
                    KeyAction::LastRow,
                ],
            ),
            (
                rows_title,
                &[
                    KeyAction::Edit,
                    KeyAction::AddMonthly,
                    KeyAction::AddFreelance,
                    KeyAction::DeleteRow,
                    KeyAction::Submit,
                    KeyAction::Confirm,
                    KeyAction::Cancel,
                ],
            ),
            (general_title, &[KeyAction::Help, KeyAction::Quit]),
        ];

        let bindings = self.get_bindings(mode);
        groups
            .iter()
            .filter_map(|(title, actions)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| actions.contains(&b.action))
                    .map(|b| (b.display.clone(), b.action.description(language).to_string()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
