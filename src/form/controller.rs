use crate::domain::{FieldDraft, MAX_CHOICES, ValidationState};
use crate::store::{DraftStore, Slot};
use crate::submit::SubmitOutcome;

use super::{
    actions::{FormAction, FormOutcome},
    choices::{ChoiceEditor, split_lines},
    reducers,
};

/// Owns the draft through its lifecycle: hydrate, edit, submit, reset.
pub struct FormController<S: Slot> {
    draft: FieldDraft,
    validation: ValidationState,
    editor: ChoiceEditor,
    store: DraftStore<S>,
    submitting: bool,
    highlighting: bool,
}

impl<S: Slot> FormController<S> {
    /// Creates a controller and restores any persisted draft.
    pub fn open(store: DraftStore<S>, highlighting: bool) -> Self {
        let mut controller = Self {
            draft: FieldDraft::default(),
            validation: ValidationState::default(),
            editor: ChoiceEditor::new(&[], highlighting),
            store,
            submitting: false,
            highlighting,
        };
        controller.hydrate();
        controller
    }

    pub fn hydrate(&mut self) {
        if let Some(mut draft) = self.store.load() {
            log::debug!("restored draft with {} choice(s)", draft.choices.len());
            if draft.choices.iter().any(|choice| choice.contains('\n')) {
                draft.choices = split_lines(&draft.choices);
            }
            self.editor = ChoiceEditor::new(&draft.choices, self.highlighting);
            self.draft = draft;
        }
    }

    pub fn draft(&self) -> &FieldDraft {
        &self.draft
    }

    pub fn validation(&self) -> ValidationState {
        self.validation
    }

    pub fn editor(&self) -> &ChoiceEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ChoiceEditor {
        &mut self.editor
    }

    pub fn store(&self) -> &DraftStore<S> {
        &self.store
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn dispatch(&mut self, action: FormAction) -> FormOutcome {
        match action {
            FormAction::SetLabel(label) => self.edit(reducers::with_label(&self.draft, label)),
            FormAction::SetRequired(required) => {
                self.edit(reducers::with_required(&self.draft, required))
            }
            FormAction::SetDefault(default) => {
                self.edit(reducers::with_default(&self.draft, default))
            }
            FormAction::SetChoices(choices) => {
                self.edit(reducers::with_choices(&self.draft, choices))
            }
            FormAction::SetDisplayAlpha(display_alpha) => {
                self.edit(reducers::with_display_alpha(&self.draft, display_alpha))
            }
            FormAction::ConfirmDefault => self.confirm_default(),
            FormAction::Submit => self.submit(),
            FormAction::Reset => self.reset(),
            FormAction::SubmissionFinished(outcome) => self.finish_submission(outcome),
        }
    }

    fn edit(&mut self, next: FieldDraft) -> FormOutcome {
        self.draft = next;
        self.store.save(&self.draft);
        FormOutcome::Updated
    }

    fn confirm_default(&mut self) -> FormOutcome {
        let Some(next) = reducers::promote_default(&self.draft) else {
            return FormOutcome::Unchanged;
        };
        self.editor.append_line(&self.draft.default);
        self.edit(next)
    }

    fn submit(&mut self) -> FormOutcome {
        if self.submitting {
            return FormOutcome::Busy;
        }

        let candidate = self.draft.candidate();
        let mut validation = self.editor.validate(self.validation);
        validation.has_no_label = candidate.label.is_empty();
        validation.has_too_many = candidate.choices.len() > MAX_CHOICES;
        self.validation = validation;

        if validation.any() {
            log::info!("form validation failed: {validation:?}");
            return FormOutcome::Blocked(validation);
        }

        log::info!(
            "submitting field '{}' with {} choice(s)",
            candidate.label,
            candidate.choices.len()
        );
        self.submitting = true;
        FormOutcome::Transmit(candidate)
    }

    fn finish_submission(&mut self, outcome: SubmitOutcome) -> FormOutcome {
        self.submitting = false;
        match outcome {
            SubmitOutcome::Delivered(body) => {
                match &body {
                    Some(body) => log::info!("form submitted successfully: {body}"),
                    None => log::info!("form submitted successfully"),
                }
                FormOutcome::Delivered(body)
            }
            SubmitOutcome::Failed(err) => {
                log::error!("error submitting form: {err}");
                FormOutcome::Failed(err.to_string())
            }
        }
    }

    fn reset(&mut self) -> FormOutcome {
        self.draft = FieldDraft::default();
        self.validation = ValidationState::default();
        self.editor = ChoiceEditor::new(&self.draft.choices, self.highlighting);
        self.store.clear();
        FormOutcome::Reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DRAFT_KEY, MAX_CHOICE_LENGTH};
    use crate::store::MemorySlot;
    use crate::submit::SubmitError;
    use serde_json::json;

    fn controller() -> FormController<MemorySlot> {
        FormController::open(DraftStore::new(MemorySlot::new()), true)
    }

    fn set_choices(controller: &mut FormController<MemorySlot>, choices: &[&str]) {
        let owned = choices.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        *controller.editor_mut() = ChoiceEditor::new(&owned, true);
        controller.dispatch(FormAction::SetChoices(owned));
    }

    #[test]
    fn hydrates_from_stored_draft() {
        let slot = MemorySlot::with_entry(
            DRAFT_KEY,
            r#"{"label":"Color","choices":["Red","Blue"]}"#,
        );
        let controller = FormController::open(DraftStore::new(slot), true);
        assert_eq!(controller.draft().label, "Color");
        assert_eq!(controller.editor().lines(), &["Red", "Blue"]);
        assert!(!controller.draft().required);
    }

    #[test]
    fn hydrated_choices_are_split_into_rows() {
        let slot = MemorySlot::with_entry(DRAFT_KEY, r#"{"choices":["Red\nBlue","Green"]}"#);
        let controller = FormController::open(DraftStore::new(slot), true);
        assert_eq!(controller.editor().lines(), &["Red", "Blue", "Green"]);
        assert_eq!(controller.draft().choices, vec!["Red", "Blue", "Green"]);
    }

    #[test]
    fn every_edit_is_persisted() {
        let mut controller = controller();
        controller.dispatch(FormAction::SetLabel("Size".into()));
        controller.dispatch(FormAction::SetRequired(true));
        controller.dispatch(FormAction::SetDisplayAlpha(true));
        let stored = controller.store().load().expect("stored");
        assert_eq!(stored.label, "Size");
        assert!(stored.required);
        assert!(stored.display_alpha);
    }

    #[test]
    fn empty_label_blocks_submission() {
        let mut controller = controller();
        set_choices(&mut controller, &["a", "b"]);
        let outcome = controller.dispatch(FormAction::Submit);
        let FormOutcome::Blocked(state) = outcome else {
            panic!("expected blocked submission");
        };
        assert!(state.has_no_label);
        assert!(!controller.is_submitting());
    }

    #[test]
    fn duplicate_after_normalization_blocks_submission() {
        let mut controller = controller();
        controller.dispatch(FormAction::SetLabel("Color".into()));
        set_choices(&mut controller, &["Red", "Red ", "Blue"]);
        let outcome = controller.dispatch(FormAction::Submit);
        let FormOutcome::Blocked(state) = outcome else {
            panic!("expected blocked submission");
        };
        assert!(state.has_duplicates);
        assert!(!state.has_too_long);
        assert!(!state.has_no_label);
        assert!(!state.has_too_many);
    }

    #[test]
    fn too_many_choices_block_submission() {
        let mut controller = controller();
        controller.dispatch(FormAction::SetLabel("Numbers".into()));
        let choices = (0..=MAX_CHOICES).map(|n| n.to_string()).collect::<Vec<_>>();
        let refs = choices.iter().map(String::as_str).collect::<Vec<_>>();
        set_choices(&mut controller, &refs);
        let FormOutcome::Blocked(state) = controller.dispatch(FormAction::Submit) else {
            panic!("expected blocked submission");
        };
        assert!(state.has_too_many);
    }

    #[test]
    fn too_long_choice_blocks_submission() {
        let mut controller = controller();
        controller.dispatch(FormAction::SetLabel("Notes".into()));
        let long = "x".repeat(MAX_CHOICE_LENGTH + 1);
        set_choices(&mut controller, &[long.as_str()]);
        let FormOutcome::Blocked(state) = controller.dispatch(FormAction::Submit) else {
            panic!("expected blocked submission");
        };
        assert!(state.has_too_long);
    }

    #[test]
    fn valid_form_transmits_cleaned_candidate_once() {
        let mut controller = controller();
        controller.dispatch(FormAction::SetLabel("Color".into()));
        set_choices(&mut controller, &[" Red ", "", "Blue"]);
        let FormOutcome::Transmit(candidate) = controller.dispatch(FormAction::Submit) else {
            panic!("expected transmission");
        };
        assert_eq!(candidate.choices, vec!["Red", "Blue"]);
        assert!(controller.is_submitting());

        assert!(matches!(
            controller.dispatch(FormAction::Submit),
            FormOutcome::Busy
        ));

        controller.dispatch(FormAction::SetLabel("Colour".into()));
        assert_eq!(controller.store().load().unwrap().label, "Colour");

        let outcome = controller.dispatch(FormAction::SubmissionFinished(
            SubmitOutcome::Delivered(Some(json!({"id": 7}))),
        ));
        assert!(matches!(outcome, FormOutcome::Delivered(Some(_))));
        assert!(!controller.is_submitting());
    }

    #[test]
    fn failed_submission_clears_busy_and_keeps_flags() {
        let mut controller = controller();
        controller.dispatch(FormAction::SetLabel("Color".into()));
        set_choices(&mut controller, &["Red"]);
        assert!(matches!(
            controller.dispatch(FormAction::Submit),
            FormOutcome::Transmit(_)
        ));
        let before = controller.validation();
        let outcome = controller.dispatch(FormAction::SubmissionFinished(
            SubmitOutcome::Failed(SubmitError::Status { status: 500 }),
        ));
        assert!(matches!(outcome, FormOutcome::Failed(_)));
        assert!(!controller.is_submitting());
        assert_eq!(controller.validation(), before);
    }

    #[test]
    fn confirm_default_appends_once() {
        let mut controller = controller();
        set_choices(&mut controller, &["No"]);
        controller.dispatch(FormAction::SetDefault("Yes".into()));
        assert!(matches!(
            controller.dispatch(FormAction::ConfirmDefault),
            FormOutcome::Updated
        ));
        assert_eq!(controller.draft().choices, vec!["No", "Yes"]);
        assert_eq!(controller.editor().lines(), &["No", "Yes"]);
        assert_eq!(controller.store().load().unwrap().choices, vec!["No", "Yes"]);

        assert!(matches!(
            controller.dispatch(FormAction::ConfirmDefault),
            FormOutcome::Unchanged
        ));
        assert_eq!(controller.draft().choices, vec!["No", "Yes"]);
    }

    #[test]
    fn reset_restores_defaults_and_erases_draft() {
        let mut controller = controller();
        controller.dispatch(FormAction::SetLabel("Color".into()));
        controller.dispatch(FormAction::SetRequired(true));
        controller.dispatch(FormAction::SetDefault("Red".into()));
        set_choices(&mut controller, &["Red", "red"]);
        controller.dispatch(FormAction::Submit);
        assert!(controller.validation().any());

        assert!(matches!(
            controller.dispatch(FormAction::Reset),
            FormOutcome::Reset
        ));
        assert_eq!(controller.draft(), &FieldDraft::default());
        assert_eq!(controller.validation(), ValidationState::default());
        assert!(controller.editor().is_blank());
        assert!(controller.editor().highlights().is_empty());
        assert!(!controller.store().slot().contains(DRAFT_KEY));
    }
}
