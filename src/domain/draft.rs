use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Editable definition of a multi-select field.
///
/// The serialized shape doubles as the persisted draft record and the
/// submission payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDraft {
    /// Field label; must be non-empty on submit.
    pub label: String,
    /// Whether a value is required from whoever fills in the field.
    pub required: bool,
    /// Choices in rendered order.
    pub choices: Vec<String>,
    /// Whether consumers render the choices alphabetically.
    pub display_alpha: bool,
    /// Default value; promoted into `choices` once confirmed.
    pub default: String,
}

impl FieldDraft {
    /// Value sent on submit: blank choices dropped, remaining ones trimmed.
    pub fn candidate(&self) -> FieldDraft {
        FieldDraft {
            choices: self
                .choices
                .iter()
                .map(|choice| choice.trim())
                .filter(|choice| !choice.is_empty())
                .map(str::to_string)
                .collect(),
            ..self.clone()
        }
    }

    pub fn has_choice(&self, value: &str) -> bool {
        self.choices.iter().any(|choice| choice == value)
    }
}

/// Flags recomputed on every submit attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationState {
    pub has_no_label: bool,
    pub has_duplicates: bool,
    pub has_too_long: bool,
    pub has_too_many: bool,
}

impl ValidationState {
    pub fn any(&self) -> bool {
        self.has_no_label || self.has_choice_issues()
    }

    /// Issues attributed to the choices input.
    pub fn has_choice_issues(&self) -> bool {
        self.has_duplicates || self.has_too_long || self.has_too_many
    }

    pub fn issue_count(&self) -> usize {
        [
            self.has_no_label,
            self.has_duplicates,
            self.has_too_long,
            self.has_too_many,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count()
    }
}
