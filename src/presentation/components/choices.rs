use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    domain::{MAX_CHOICES, ValidationState},
    form::{ChoiceEditor, HighlightRegistry},
    validation::HighlightGroup,
};

use super::fields::label_style;

fn group_style(group: HighlightGroup) -> Style {
    match group {
        HighlightGroup::Duplicate => Style::default().fg(Color::White).bg(Color::Red),
        HighlightGroup::TooLong => Style::default().fg(Color::Black).bg(Color::Yellow),
    }
}

pub fn render_choices(
    frame: &mut Frame<'_>,
    area: Rect,
    editor: &ChoiceEditor,
    focused: bool,
    has_issues: bool,
) {
    let border_style = if has_issues {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled("Choices", label_style(focused)));

    let visible_rows = area.height.saturating_sub(2) as usize;
    let cursor = editor.cursor();
    let offset = if visible_rows == 0 {
        0
    } else {
        (cursor.row + 1).saturating_sub(visible_rows)
    };

    let lines = editor
        .lines()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .map(|(row, text)| highlighted_line(text, row, editor.highlights()))
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if focused && visible_rows > 0 {
        let line = editor
            .lines()
            .get(cursor.row)
            .map(String::as_str)
            .unwrap_or("");
        let before = line.chars().take(cursor.column).collect::<String>();
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(UnicodeWidthStr::width(before.as_str()) as u16);
        let y = area
            .y
            .saturating_add(1)
            .saturating_add((cursor.row - offset) as u16);
        frame.set_cursor_position((x, y));
    }
}

/// Splits a row into spans, one per run of characters sharing a group.
pub(super) fn highlighted_line(
    text: &str,
    row: usize,
    registry: &HighlightRegistry,
) -> Line<'static> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_group = None;
    for (column, ch) in text.chars().enumerate() {
        let group = registry.group_at(row, column);
        if group != run_group && !run.is_empty() {
            spans.push(styled_run(std::mem::take(&mut run), run_group));
        }
        run_group = group;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(styled_run(run, run_group));
    }
    Line::from(spans)
}

fn styled_run(text: String, group: Option<HighlightGroup>) -> Span<'static> {
    match group {
        Some(group) => Span::styled(text, group_style(group)),
        None => Span::raw(text),
    }
}

fn legend_entries(validation: ValidationState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if validation.has_duplicates {
        lines.push(Line::from(vec![
            Span::styled("  ", group_style(HighlightGroup::Duplicate)),
            Span::raw(" Duplicate items found"),
        ]));
    }
    if validation.has_too_long {
        lines.push(Line::from(vec![
            Span::styled("  ", group_style(HighlightGroup::TooLong)),
            Span::raw(" Too long items found"),
        ]));
    }
    if validation.has_too_many {
        lines.push(Line::from(Span::styled(
            format!("No more than {MAX_CHOICES} items allowed"),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

pub fn legend_height(validation: ValidationState) -> u16 {
    legend_entries(validation).len() as u16
}

pub fn render_legend(frame: &mut Frame<'_>, area: Rect, validation: ValidationState) {
    let lines = legend_entries(validation);
    if lines.is_empty() {
        return;
    }
    frame.render_widget(Paragraph::new(lines), area);
}
