mod draft;
mod normalize;

pub use draft::{FieldDraft, ValidationState};
pub use normalize::normalize_text;

/// Normalized length above which a choice is flagged as too long.
pub const MAX_CHOICE_LENGTH: usize = 40;

/// Maximum number of choices a field may carry on submit.
pub const MAX_CHOICES: usize = 50;

/// Key under which the draft is persisted.
pub const DRAFT_KEY: &str = "formValue";
