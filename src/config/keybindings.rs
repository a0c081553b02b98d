//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings alongside arrow keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };

        // Metric selector
        keys.bind(KeyCode::Char('m'), KeyModifiers::NONE, KeyAction::NextMetric);
        keys.bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::NextMetric);
        keys.bind(KeyCode::Char('M'), KeyModifiers::SHIFT, KeyAction::PrevMetric);
        keys.bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::PrevMetric);

        // Threshold slider. Some terminals report '+' with SHIFT, some without.
        keys.bind(KeyCode::Char('+'), KeyModifiers::NONE, KeyAction::RaiseThreshold);
        keys.bind(KeyCode::Char('+'), KeyModifiers::SHIFT, KeyAction::RaiseThreshold);
        keys.bind(KeyCode::Char('='), KeyModifiers::NONE, KeyAction::RaiseThreshold);
        keys.bind(KeyCode::Right, KeyModifiers::NONE, KeyAction::RaiseThreshold);
        keys.bind(KeyCode::Char('l'), KeyModifiers::NONE, KeyAction::RaiseThreshold);
        keys.bind(KeyCode::Char('-'), KeyModifiers::NONE, KeyAction::LowerThreshold);
        keys.bind(KeyCode::Left, KeyModifiers::NONE, KeyAction::LowerThreshold);
        keys.bind(KeyCode::Char('h'), KeyModifiers::NONE, KeyAction::LowerThreshold);

        // Node slider
        keys.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::NextNode);
        keys.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::NextNode);
        keys.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::PrevNode);
        keys.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::PrevNode);
        keys.bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::SelectWorst);
        keys.bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::SelectWorst);
        keys.bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::ClearSelection);

        // Application controls
        keys.bind(KeyCode::Char('?'), KeyModifiers::NONE, KeyAction::Help);
        keys.bind(KeyCode::Char('?'), KeyModifiers::SHIFT, KeyAction::Help);
        keys.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_map_m_and_tab_to_next_metric() {
        let bindings = KeyBindings::default();
        for code in [KeyCode::Char('m'), KeyCode::Tab] {
            assert_eq!(
                bindings.get(KeyEvent::new(code, KeyModifiers::NONE)),
                Some(KeyAction::NextMetric),
                "{code:?} should cycle the metric"
            );
        }
    }

    #[test]
    fn default_bindings_map_plus_with_or_without_shift() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE)),
            Some(KeyAction::RaiseThreshold)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT)),
            Some(KeyAction::RaiseThreshold)
        );
    }

    #[test]
    fn default_bindings_map_ctrl_c_to_quit() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)),
            None,
            "Plain 'c' is unbound"
        );
    }

    #[test]
    fn default_bindings_map_esc_to_clear_selection() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(KeyAction::ClearSelection)
        );
    }
}
