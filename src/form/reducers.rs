//! Pure draft transitions. Each takes the current value and returns the next.

use crate::domain::FieldDraft;

pub fn with_label(draft: &FieldDraft, label: String) -> FieldDraft {
    FieldDraft {
        label,
        ..draft.clone()
    }
}

pub fn with_required(draft: &FieldDraft, required: bool) -> FieldDraft {
    FieldDraft {
        required,
        ..draft.clone()
    }
}

pub fn with_default(draft: &FieldDraft, default: String) -> FieldDraft {
    FieldDraft {
        default,
        ..draft.clone()
    }
}

pub fn with_choices(draft: &FieldDraft, choices: Vec<String>) -> FieldDraft {
    FieldDraft {
        choices,
        ..draft.clone()
    }
}

pub fn with_display_alpha(draft: &FieldDraft, display_alpha: bool) -> FieldDraft {
    FieldDraft {
        display_alpha,
        ..draft.clone()
    }
}

/// Appends the default value to the choices when it is set and not yet
/// listed. Returns `None` when nothing changes.
pub fn promote_default(draft: &FieldDraft) -> Option<FieldDraft> {
    if draft.default.is_empty() || draft.has_choice(&draft.default) {
        return None;
    }
    let mut choices = draft.choices.clone();
    choices.push(draft.default.clone());
    Some(with_choices(draft, choices))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(choices: &[&str], default: &str) -> FieldDraft {
        FieldDraft {
            choices: choices.iter().map(|c| c.to_string()).collect(),
            default: default.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn promotes_missing_default_to_the_end() {
        let next = promote_default(&draft(&["No"], "Yes")).expect("promoted");
        assert_eq!(next.choices, vec!["No", "Yes"]);
    }

    #[test]
    fn present_or_empty_default_is_not_promoted() {
        assert!(promote_default(&draft(&["No", "Yes"], "Yes")).is_none());
        assert!(promote_default(&draft(&["No"], "")).is_none());
    }

    #[test]
    fn setters_leave_other_fields_alone() {
        let base = draft(&["a"], "a");
        let next = with_label(&base, "Label".into());
        assert_eq!(next.choices, base.choices);
        assert_eq!(next.default, base.default);
        assert!(with_required(&base, true).required);
        assert!(with_display_alpha(&base, true).display_alpha);
        assert_eq!(with_default(&base, "b".into()).default, "b");
    }
}
