use serde_json::Value;

use crate::domain::{FieldDraft, ValidationState};
use crate::submit::SubmitOutcome;

/// User (or host) events the form reacts to.
#[derive(Debug)]
pub enum FormAction {
    SetLabel(String),
    SetRequired(bool),
    SetDefault(String),
    SetChoices(Vec<String>),
    SetDisplayAlpha(bool),
    /// Default-value field lost focus or the confirm key was pressed.
    ConfirmDefault,
    Submit,
    Reset,
    SubmissionFinished(SubmitOutcome),
}

/// What a dispatched action did, for the host to act on.
#[derive(Debug)]
pub enum FormOutcome {
    Updated,
    Unchanged,
    /// Submission refused; the flags explain why.
    Blocked(ValidationState),
    /// Validation passed; the host must send this value.
    Transmit(FieldDraft),
    /// A submission is already in flight.
    Busy,
    Delivered(Option<Value>),
    Failed(String),
    Reset,
}
