use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render_header(frame: &mut Frame<'_>, area: Rect, title: &str) {
    let header = Paragraph::new(Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(header, area);
}

pub(super) fn label_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }
}

/// Bordered single-line input with an optional message underneath.
pub fn render_text_input(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    value: &str,
    focused: bool,
    error: Option<&str>,
) {
    let (input_area, message_area) = match error {
        Some(_) => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Length(1)])
                .split(area);
            (rows[0], Some(rows[1]))
        }
        None => (area, None),
    };

    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title.to_string(), label_style(focused)));

    let inner_width = input_area.width.saturating_sub(2) as usize;
    let visible = tail_fitting(value, inner_width.saturating_sub(1));
    frame.render_widget(Paragraph::new(visible.clone()).block(block), input_area);

    if focused {
        let x = input_area
            .x
            .saturating_add(1)
            .saturating_add(UnicodeWidthStr::width(visible.as_str()) as u16);
        frame.set_cursor_position((x, input_area.y.saturating_add(1)));
    }

    if let (Some(message), Some(message_area)) = (error, message_area) {
        let widget = Paragraph::new(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(widget, message_area);
    }
}

pub fn render_type_row(frame: &mut Frame<'_>, area: Rect, required: bool, focused: bool) {
    let line = Line::from(vec![
        Span::styled("Type ", label_style(false)),
        Span::styled(
            "Multi-select",
            Style::default().add_modifier(Modifier::ITALIC),
        ),
        Span::raw("  "),
        checkbox_span(required, focused),
        Span::styled(" A value is required", checkbox_label_style(focused)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

pub fn render_checkbox_row(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    text: &str,
    checked: bool,
    focused: bool,
) {
    let line = Line::from(vec![
        Span::styled(format!("{title} "), label_style(false)),
        checkbox_span(checked, focused),
        Span::styled(format!(" {text}"), checkbox_label_style(focused)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn checkbox_span(checked: bool, focused: bool) -> Span<'static> {
    let mark = if checked { "[x]" } else { "[ ]" };
    Span::styled(mark, checkbox_label_style(focused))
}

fn checkbox_label_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).bg(Color::DarkGray)
    } else {
        Style::default()
    }
}

/// Longest suffix of `value` that fits in `width` columns.
fn tail_fitting(value: &str, width: usize) -> String {
    if UnicodeWidthStr::width(value) <= width {
        return value.to_string();
    }
    let mut used = 0usize;
    let mut tail = Vec::new();
    for ch in value.chars().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        tail.push(ch);
    }
    tail.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_fitting_keeps_the_end() {
        assert_eq!(tail_fitting("short", 10), "short");
        assert_eq!(tail_fitting("abcdefgh", 3), "fgh");
        assert_eq!(tail_fitting("日本語", 4), "本語");
    }
}
