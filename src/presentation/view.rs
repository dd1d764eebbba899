use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    app::FocusField,
    domain::{FieldDraft, ValidationState},
    form::ChoiceEditor,
};

use super::components::{
    legend_height, render_checkbox_row, render_choices, render_footer, render_header,
    render_legend, render_text_input, render_type_row,
};

pub struct UiContext<'a> {
    pub title: &'a str,
    pub draft: &'a FieldDraft,
    pub validation: ValidationState,
    pub editor: &'a ChoiceEditor,
    pub focus: FocusField,
    pub submitting: bool,
    pub status_message: &'a str,
    pub help: Option<&'a str>,
    /// Frame counter driving the busy indicator.
    pub tick: usize,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let label_height = if ctx.validation.has_no_label { 4 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(label_height),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(legend_height(ctx.validation)),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], ctx.title);
    render_text_input(
        frame,
        chunks[1],
        "Label*",
        &ctx.draft.label,
        ctx.focus == FocusField::Label,
        ctx.validation
            .has_no_label
            .then_some("Label is required"),
    );
    render_type_row(
        frame,
        chunks[2],
        ctx.draft.required,
        ctx.focus == FocusField::Required,
    );
    render_text_input(
        frame,
        chunks[3],
        "Default Value",
        &ctx.draft.default,
        ctx.focus == FocusField::DefaultValue,
        None,
    );
    render_choices(
        frame,
        chunks[4],
        ctx.editor,
        ctx.focus == FocusField::Choices,
        ctx.validation.has_choice_issues(),
    );
    render_legend(frame, chunks[5], ctx.validation);
    render_checkbox_row(
        frame,
        chunks[6],
        "Order",
        "Display choices in alphabetical order",
        ctx.draft.display_alpha,
        ctx.focus == FocusField::DisplayAlpha,
    );
    render_footer(frame, chunks[7], &ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(ctx: UiContext<'_>) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, ctx)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn context<'a>(
        draft: &'a FieldDraft,
        editor: &'a ChoiceEditor,
        validation: ValidationState,
        submitting: bool,
    ) -> UiContext<'a> {
        UiContext {
            title: "Field Builder",
            draft,
            validation,
            editor,
            focus: FocusField::Label,
            submitting,
            status_message: "Ready",
            help: Some("Ctrl+S save changes"),
            tick: 0,
        }
    }

    #[test]
    fn renders_fields_and_messages() {
        let draft = FieldDraft {
            label: "Color".into(),
            required: true,
            choices: vec!["Red".into(), "red".into()],
            ..Default::default()
        };
        let editor = ChoiceEditor::new(&draft.choices, true);
        let validation = ValidationState {
            has_no_label: true,
            has_duplicates: true,
            has_too_many: true,
            ..Default::default()
        };
        let screen = render(context(&draft, &editor, validation, false));
        assert!(screen.contains("Field Builder"));
        assert!(screen.contains("Color"));
        assert!(screen.contains("[x] A value is required"));
        assert!(screen.contains("Label is required"));
        assert!(screen.contains("Duplicate items found"));
        assert!(!screen.contains("Too long items found"));
        assert!(screen.contains("No more than 50 items allowed"));
        assert!(screen.contains("Save changes"));
    }

    #[test]
    fn loading_button_hides_its_label() {
        let draft = FieldDraft::default();
        let editor = ChoiceEditor::new(&[], true);
        let screen = render(context(&draft, &editor, ValidationState::default(), true));
        assert!(!screen.contains("Save changes"));
        assert!(screen.contains("⠋"));
    }
}
