use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line editing on an append-only buffer.
pub(crate) fn handle_text_edit(buffer: &mut String, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(ch) => {
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                return false;
            }
            buffer.push(ch);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Delete => {
            if buffer.is_empty() {
                return false;
            }
            buffer.clear();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_buffer() {
        let mut buffer = String::from("Colo");
        assert!(handle_text_edit(
            &mut buffer,
            &KeyEvent::new(KeyCode::Char('r'), KeyModifiers::SHIFT)
        ));
        assert_eq!(buffer, "Color");
        assert!(handle_text_edit(
            &mut buffer,
            &KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)
        ));
        assert_eq!(buffer, "Colo");
        assert!(handle_text_edit(
            &mut buffer,
            &KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE)
        ));
        assert!(buffer.is_empty());
        assert!(!handle_text_edit(
            &mut buffer,
            &KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)
        ));
    }

    #[test]
    fn rejects_control_characters() {
        let mut buffer = String::new();
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert!(!handle_text_edit(&mut buffer, &ctrl_a));
        assert_eq!(buffer, "");
    }
}
