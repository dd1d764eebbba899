use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::ValidationState;
use crate::validation::highlight;

use super::highlight::{HighlightRegistry, RowMarker};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub column: usize,
}

/// Line-oriented editing surface for the choice list.
///
/// Every line is a choice. Empty lines carry no text and are not reported as
/// fragments to the validator.
#[derive(Debug, Clone)]
pub struct ChoiceEditor {
    lines: Vec<String>,
    cursor: Cursor,
    highlights: HighlightRegistry,
}

impl ChoiceEditor {
    pub fn new(choices: &[String], highlighting: bool) -> Self {
        let lines = if choices.is_empty() {
            vec![String::new()]
        } else {
            split_lines(choices)
        };
        Self {
            lines,
            cursor: Cursor::default(),
            highlights: HighlightRegistry::new(highlighting),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn highlights(&self) -> &HighlightRegistry {
        &self.highlights
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }

    /// Non-empty lines in document order.
    pub fn fragments(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(String::as_str)
            .collect()
    }

    /// Appends a line without moving the cursor.
    pub fn append_line(&mut self, text: &str) {
        if self.is_blank() && self.lines.len() == 1 {
            self.lines[0] = text.to_string();
        } else {
            self.lines.push(text.to_string());
        }
    }

    /// Runs choice validation over the current fragments and repaints.
    pub fn validate(&mut self, state: ValidationState) -> ValidationState {
        let mut rows = Vec::new();
        let mut indents = Vec::new();
        let mut fragments = Vec::new();
        for (row, line) in self.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            rows.push(row);
            indents.push(line.chars().take_while(|ch| ch.is_whitespace()).count());
            fragments.push(line.as_str());
        }
        let mut marker = RowMarker {
            inner: &mut self.highlights,
            rows: &rows,
            indents: &indents,
        };
        highlight(&mut marker, &fragments, state)
    }

    /// Applies an editing key. Returns `true` when the text changed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch) => {
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    return false;
                }
                self.insert_char(ch);
                true
            }
            KeyCode::Enter => {
                self.insert_newline();
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Up => {
                self.move_vertical(-1);
                false
            }
            KeyCode::Down => {
                self.move_vertical(1);
                false
            }
            KeyCode::Home => {
                self.cursor.column = 0;
                false
            }
            KeyCode::End => {
                self.cursor.column = self.line_len(self.cursor.row);
                false
            }
            _ => false,
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        let Cursor { row, column } = self.clamped_cursor();
        let line = &mut self.lines[row];
        let at = byte_index(line, column);
        line.insert(at, ch);
        self.cursor = Cursor {
            row,
            column: column + 1,
        };
    }

    pub fn insert_newline(&mut self) {
        let Cursor { row, column } = self.clamped_cursor();
        let line = &mut self.lines[row];
        let tail = line.split_off(byte_index(line, column));
        self.lines.insert(row + 1, tail);
        self.cursor = Cursor {
            row: row + 1,
            column: 0,
        };
    }

    pub fn backspace(&mut self) -> bool {
        let Cursor { row, column } = self.clamped_cursor();
        if column > 0 {
            let line = &mut self.lines[row];
            let at = byte_index(line, column - 1);
            line.remove(at);
            self.cursor.column = column - 1;
            return true;
        }
        if row == 0 {
            return false;
        }
        let current = self.lines.remove(row);
        let previous = &mut self.lines[row - 1];
        let joined_at = previous.chars().count();
        previous.push_str(&current);
        self.cursor = Cursor {
            row: row - 1,
            column: joined_at,
        };
        true
    }

    pub fn delete(&mut self) -> bool {
        let Cursor { row, column } = self.clamped_cursor();
        if column < self.line_len(row) {
            let line = &mut self.lines[row];
            let at = byte_index(line, column);
            line.remove(at);
            return true;
        }
        if row + 1 >= self.lines.len() {
            return false;
        }
        let next = self.lines.remove(row + 1);
        self.lines[row].push_str(&next);
        true
    }

    fn move_left(&mut self) {
        let Cursor { row, column } = self.clamped_cursor();
        if column > 0 {
            self.cursor.column = column - 1;
        } else if row > 0 {
            self.cursor = Cursor {
                row: row - 1,
                column: self.line_len(row - 1),
            };
        }
    }

    fn move_right(&mut self) {
        let Cursor { row, column } = self.clamped_cursor();
        if column < self.line_len(row) {
            self.cursor.column = column + 1;
        } else if row + 1 < self.lines.len() {
            self.cursor = Cursor {
                row: row + 1,
                column: 0,
            };
        }
    }

    fn move_vertical(&mut self, delta: i32) {
        let row = self.cursor.row as i64 + delta as i64;
        if row < 0 || row >= self.lines.len() as i64 {
            return;
        }
        self.cursor.row = row as usize;
        self.cursor.column = self.cursor.column.min(self.line_len(self.cursor.row));
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines
            .get(row)
            .map(|line| line.chars().count())
            .unwrap_or(0)
    }

    fn clamped_cursor(&mut self) -> Cursor {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor.row = self.cursor.row.min(self.lines.len() - 1);
        self.cursor.column = self.cursor.column.min(self.line_len(self.cursor.row));
        self.cursor
    }
}

fn byte_index(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

/// One entry per editor row; stored choices may carry embedded line breaks.
pub(crate) fn split_lines(choices: &[String]) -> Vec<String> {
    choices
        .iter()
        .flat_map(|choice| choice.split('\n'))
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{HighlightGroup, TextRange};

    fn type_text(editor: &mut ChoiceEditor, text: &str) {
        for ch in text.chars() {
            let code = if ch == '\n' {
                KeyCode::Enter
            } else {
                KeyCode::Char(ch)
            };
            editor.handle_key(&KeyEvent::new(code, KeyModifiers::NONE));
        }
    }

    #[test]
    fn embedded_line_breaks_become_rows() {
        let editor = ChoiceEditor::new(&["Red\nBlue".to_string(), "Green\r\n".to_string()], true);
        assert_eq!(editor.lines(), &["Red", "Blue", "Green", ""]);
    }

    #[test]
    fn typing_builds_lines() {
        let mut editor = ChoiceEditor::new(&[], true);
        type_text(&mut editor, "Red\nGreen\n\nBlue");
        assert_eq!(editor.lines(), &["Red", "Green", "", "Blue"]);
        assert_eq!(editor.fragments(), vec!["Red", "Green", "Blue"]);
    }

    #[test]
    fn backspace_joins_lines() {
        let mut editor = ChoiceEditor::new(&[], true);
        type_text(&mut editor, "ab\ncd");
        editor.handle_key(&KeyEvent::new(KeyCode::Home, KeyModifiers::NONE));
        assert!(editor.backspace());
        assert_eq!(editor.lines(), &["abcd"]);
        assert_eq!(editor.cursor(), Cursor { row: 0, column: 2 });
    }

    #[test]
    fn editing_handles_multibyte_text() {
        let mut editor = ChoiceEditor::new(&["größe".to_string()], true);
        editor.handle_key(&KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        editor.handle_key(&KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
        assert!(editor.backspace());
        assert_eq!(editor.lines(), &["gröe"]);
        assert!(editor.delete());
        assert_eq!(editor.lines(), &["grö"]);
    }

    #[test]
    fn control_chords_do_not_edit() {
        let mut editor = ChoiceEditor::new(&[], true);
        let changed = editor.handle_key(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!changed);
        assert!(editor.is_blank());
    }

    #[test]
    fn append_line_replaces_blank_editor() {
        let mut editor = ChoiceEditor::new(&[], true);
        editor.append_line("Yes");
        assert_eq!(editor.lines(), &["Yes"]);
        editor.append_line("No");
        assert_eq!(editor.lines(), &["Yes", "No"]);
    }

    #[test]
    fn validation_marks_rows_not_fragments() {
        let mut editor = ChoiceEditor::new(
            &["Red".to_string(), String::new(), "  red".to_string()],
            true,
        );
        let state = editor.validate(ValidationState::default());
        assert!(state.has_duplicates);
        assert_eq!(
            editor.highlights().ranges(HighlightGroup::Duplicate),
            &[
                TextRange {
                    fragment: 0,
                    start: 0,
                    end: 3
                },
                TextRange {
                    fragment: 2,
                    start: 2,
                    end: 5
                },
            ]
        );
    }

    #[test]
    fn disabled_highlighting_skips_validation() {
        let mut editor = ChoiceEditor::new(&["a".to_string(), "a".to_string()], false);
        let state = editor.validate(ValidationState::default());
        assert!(!state.has_duplicates);
        assert!(editor.highlights().is_empty());
    }
}
