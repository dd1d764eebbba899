mod button;
mod choices;
mod fields;
mod footer;

pub use choices::{legend_height, render_choices, render_legend};
pub use fields::{render_checkbox_row, render_header, render_text_input, render_type_row};
pub use footer::render_footer;
