use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use textwrap::wrap;

use super::super::view::UiContext;
use super::button::{ButtonProps, render_button};

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(10)])
        .split(area);

    render_button(
        frame,
        columns[0],
        ButtonProps {
            label: "Save changes",
            loading: ctx.submitting,
            disabled: ctx.submitting,
            tick: ctx.tick,
        },
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(columns[1]);

    let issues = ctx.validation.issue_count();
    let badge = if issues > 0 {
        Span::styled(
            format!("[! {issues}]"),
            Style::default().fg(Color::Red).bg(Color::Black),
        )
    } else {
        Span::styled("[ok]", Style::default().fg(Color::Green))
    };
    let status_widget = Paragraph::new(Line::from(vec![
        Span::styled("or Cancel (Ctrl+R)", Style::default().fg(Color::DarkGray)),
        Span::raw(" • "),
        Span::raw(ctx.status_message.to_string()),
        Span::raw(" "),
        badge,
    ]))
    .wrap(Wrap { trim: true });
    frame.render_widget(status_widget, rows[0]);

    let Some(help) = ctx.help else {
        return;
    };
    let actions = help_lines(help, rows[1].width, rows[1].height);
    frame.render_widget(
        Paragraph::new(actions).style(Style::default().fg(Color::Yellow)),
        rows[1],
    );
}

/// Wraps the key hints and keeps only what fits in the area.
fn help_lines(help: &str, width: u16, height: u16) -> Vec<Line<'static>> {
    wrap(help, width.max(4) as usize)
        .into_iter()
        .take(height as usize)
        .map(|segment| Line::from(segment.into_owned()))
        .collect()
}
