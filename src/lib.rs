#![deny(rust_2018_idioms)]

mod app;
mod domain;
mod form;
mod presentation;
mod store;
mod submit;
mod validation;

pub use app::{BuilderOptions, FieldBuilder, FocusField};
pub use domain::{
    DRAFT_KEY, FieldDraft, MAX_CHOICE_LENGTH, MAX_CHOICES, ValidationState, normalize_text,
};
pub use form::{
    ChoiceEditor, Cursor, FormAction, FormController, FormOutcome, HighlightRegistry,
};
pub use store::{DraftStore, FileSlot, MemorySlot, Slot, default_data_dir};
pub use submit::{
    DEFAULT_ENDPOINT, HttpTransport, SubmissionWorker, SubmitError, SubmitOutcome, Transport,
};
pub use validation::{ChoiceScan, HighlightGroup, RangeMarker, TextRange, highlight, scan_choices};

pub mod prelude {
    pub use super::{BuilderOptions, FieldBuilder, FieldDraft};
}
