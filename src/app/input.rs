use std::sync::Arc;

use crossterm::event::KeyEvent;

use super::focus::FocusField;
use super::keymap::{KeymapContext, KeymapStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Submit,
    Reset,
    Quit,
    FieldStep(i32),
    Toggle,
    ConfirmDefault,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum CommandDispatch {
    Action(KeyAction),
    Input(KeyEvent),
}

/// Resolves key presses against the keymap for the focused field.
#[derive(Debug, Clone)]
pub(crate) struct InputRouter {
    store: Arc<KeymapStore>,
}

impl InputRouter {
    pub(crate) fn new(store: Arc<KeymapStore>) -> Self {
        Self { store }
    }

    pub(crate) fn classify(&self, key: &KeyEvent, focus: FocusField) -> CommandDispatch {
        match self.store.classify(key, &KeymapContext::for_focus(focus)) {
            Some(action) => CommandDispatch::Action(action),
            None => CommandDispatch::Input(*key),
        }
    }

    pub(crate) fn help_text(&self, focus: FocusField) -> Option<String> {
        self.store.help_text(&KeymapContext::for_focus(focus))
    }
}
