use std::sync::{Arc, LazyLock};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use super::focus::FocusField;
use super::input::KeyAction;

macro_rules! keymap_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/keymap/default.keymap.json"
        ))
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum KeymapContext {
    Global,
    Toggle,
    DefaultValue,
}

impl KeymapContext {
    fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "global" => Some(KeymapContext::Global),
            "toggle" => Some(KeymapContext::Toggle),
            "defaultValue" => Some(KeymapContext::DefaultValue),
            _ => None,
        }
    }

    /// Contexts active while `focus` holds the cursor, most specific first.
    pub(crate) fn for_focus(focus: FocusField) -> Vec<KeymapContext> {
        let mut contexts = Vec::with_capacity(2);
        if focus.is_toggle() {
            contexts.push(KeymapContext::Toggle);
        }
        if focus == FocusField::DefaultValue {
            contexts.push(KeymapContext::DefaultValue);
        }
        contexts.push(KeymapContext::Global);
        contexts
    }
}

#[derive(Deserialize)]
struct RawEntry {
    id: String,
    description: String,
    contexts: Vec<String>,
    action: RawAction,
    combos: Vec<String>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawAction {
    Submit,
    Reset,
    Quit,
    FieldStep { delta: i32 },
    Toggle,
    ConfirmDefault,
}

impl RawAction {
    fn into_action(self) -> KeyAction {
        match self {
            RawAction::Submit => KeyAction::Submit,
            RawAction::Reset => KeyAction::Reset,
            RawAction::Quit => KeyAction::Quit,
            RawAction::FieldStep { delta } => KeyAction::FieldStep(delta),
            RawAction::Toggle => KeyAction::Toggle,
            RawAction::ConfirmDefault => KeyAction::ConfirmDefault,
        }
    }
}

struct KeyBinding {
    action: KeyAction,
    contexts: Vec<KeymapContext>,
    combos: Vec<KeyPattern>,
    snippet: String,
}

impl KeyBinding {
    fn from_raw(raw: RawEntry) -> Result<Self, String> {
        let contexts = raw
            .contexts
            .iter()
            .filter_map(|ctx| KeymapContext::from_str(ctx))
            .collect::<Vec<_>>();
        if contexts.is_empty() {
            return Err(format!(
                "keymap entry {} must declare at least one context",
                raw.id
            ));
        }
        let combos = raw
            .combos
            .iter()
            .map(|combo| {
                KeyPattern::parse(combo)
                    .map_err(|err| format!("failed to parse combo '{combo}' for {}: {err}", raw.id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if combos.is_empty() {
            return Err(format!("keymap entry {} must declare combos", raw.id));
        }
        let combos_display = combos
            .iter()
            .map(|pattern| pattern.display.clone())
            .collect::<Vec<_>>()
            .join("/");
        Ok(Self {
            action: raw.action.into_action(),
            contexts,
            combos,
            snippet: format!("{combos_display} {}", raw.description),
        })
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        self.combos.iter().any(|pattern| pattern.matches(key))
    }
}

struct KeyPattern {
    matcher: CodeMatcher,
    required: KeyModifiers,
    allow_shift: bool,
    display: String,
}

impl KeyPattern {
    fn parse(spec: &str) -> Result<Self, String> {
        let display = spec.trim().to_string();
        if display.is_empty() {
            return Err("combo cannot be empty".into());
        }
        let mut tokens = display
            .split('+')
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();
        let Some(key_token) = tokens.pop() else {
            return Err("combo must contain key".into());
        };
        let matcher = CodeMatcher::from_token(key_token)?;
        let mut required = KeyModifiers::empty();
        for token in tokens {
            match token.to_lowercase().as_str() {
                "ctrl" | "control" => required |= KeyModifiers::CONTROL,
                "shift" => required |= KeyModifiers::SHIFT,
                "alt" => required |= KeyModifiers::ALT,
                other => {
                    return Err(format!("unsupported modifier '{other}'"));
                }
            }
        }
        let allow_shift = matcher.allows_extra_shift() && !required.contains(KeyModifiers::SHIFT);
        Ok(Self {
            matcher,
            required,
            allow_shift,
            display,
        })
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        if !self.matcher.matches(&key.code) {
            return false;
        }
        if !key.modifiers.contains(self.required) {
            return false;
        }
        let extra = key.modifiers.difference(self.required);
        if self.allow_shift {
            extra.difference(KeyModifiers::SHIFT).is_empty()
        } else {
            extra.is_empty()
        }
    }
}

#[derive(Clone)]
enum CodeMatcher {
    Literal(KeyCode),
    Alpha(char),
}

impl CodeMatcher {
    fn from_token(token: &str) -> Result<Self, String> {
        let normalized = token.to_lowercase();
        let matcher = match normalized.as_str() {
            "tab" => CodeMatcher::Literal(KeyCode::Tab),
            "backtab" => CodeMatcher::Literal(KeyCode::BackTab),
            "enter" => CodeMatcher::Literal(KeyCode::Enter),
            "esc" | "escape" => CodeMatcher::Literal(KeyCode::Esc),
            "space" => CodeMatcher::Literal(KeyCode::Char(' ')),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => CodeMatcher::Alpha(ch),
                    _ => return Err(format!("unsupported key '{token}'")),
                }
            }
        };
        Ok(matcher)
    }

    fn matches(&self, code: &KeyCode) -> bool {
        match (self, code) {
            (CodeMatcher::Literal(expected), actual) => actual == expected,
            (CodeMatcher::Alpha(expected), KeyCode::Char(actual)) => {
                actual.to_ascii_lowercase() == *expected
            }
            _ => false,
        }
    }

    fn allows_extra_shift(&self) -> bool {
        matches!(
            self,
            CodeMatcher::Alpha(_) | CodeMatcher::Literal(KeyCode::BackTab)
        )
    }
}

pub(crate) struct KeymapStore {
    bindings: Vec<KeyBinding>,
}

impl std::fmt::Debug for KeymapStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeymapStore")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

impl KeymapStore {
    pub(crate) fn from_json(source: &str) -> Result<Self, String> {
        let raw_entries: Vec<RawEntry> =
            serde_json::from_str(source).map_err(|err| format!("invalid keymap: {err}"))?;
        let bindings = raw_entries
            .into_iter()
            .map(KeyBinding::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bindings })
    }

    /// First binding matching `key` within the given contexts, in context
    /// order.
    pub(crate) fn classify(&self, key: &KeyEvent, contexts: &[KeymapContext]) -> Option<KeyAction> {
        contexts.iter().find_map(|context| {
            self.bindings
                .iter()
                .filter(|binding| binding.contexts.contains(context))
                .find(|binding| binding.matches(key))
                .map(|binding| binding.action)
        })
    }

    pub(crate) fn help_text(&self, contexts: &[KeymapContext]) -> Option<String> {
        let snippets = contexts
            .iter()
            .flat_map(|context| {
                self.bindings
                    .iter()
                    .filter(move |binding| binding.contexts.contains(context))
                    .map(|binding| binding.snippet.clone())
            })
            .collect::<Vec<_>>();
        if snippets.is_empty() {
            None
        } else {
            Some(snippets.join(" • "))
        }
    }
}

static DEFAULT_STORE: LazyLock<Arc<KeymapStore>> = LazyLock::new(|| {
    Arc::new(KeymapStore::from_json(keymap_source!()).expect("invalid keymap/default.keymap.json"))
});

pub(crate) fn default_store() -> Arc<KeymapStore> {
    Arc::clone(&DEFAULT_STORE)
}
