mod builder;
mod focus;
pub(crate) mod input;
pub(crate) mod keymap;
mod options;
mod runtime;
mod status;
mod terminal;

pub use builder::FieldBuilder;
pub use focus::FocusField;
pub use options::BuilderOptions;
