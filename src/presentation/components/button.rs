use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct ButtonProps<'a> {
    pub label: &'a str,
    /// Replaces the label with a busy indicator.
    pub loading: bool,
    pub disabled: bool,
    pub tick: usize,
}

pub fn render_button(frame: &mut Frame<'_>, area: Rect, props: ButtonProps<'_>) {
    let content = if props.loading {
        SPINNER[props.tick % SPINNER.len()].to_string()
    } else {
        props.label.to_string()
    };
    let style = if props.disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };
    let border_style = if props.disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green)
    };
    let widget = Paragraph::new(Span::styled(content, style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    frame.render_widget(widget, area);
}
