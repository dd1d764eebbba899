mod actions;
mod choices;
mod controller;
mod highlight;
mod reducers;
pub(crate) mod text;

pub use actions::{FormAction, FormOutcome};
pub use choices::{ChoiceEditor, Cursor};
pub use controller::FormController;
pub use highlight::HighlightRegistry;
