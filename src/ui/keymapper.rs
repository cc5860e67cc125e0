//! Keyboard input mapping
//!
//! Translates crossterm key events into prompt actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the console to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Clear the prompt line (Ctrl+U)
    ClearLine,
    Submit,
    HistoryPrev,
    HistoryNext,
    Complete,
    ScrollUp,
    ScrollDown,
    Quit,
}

/// Key mapper
pub struct KeyMapper;

impl KeyMapper {
    /// Map a key event to an action
    pub fn map(event: &KeyEvent) -> Option<InputAction> {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl {
            return match event.code {
                KeyCode::Char('c') | KeyCode::Char('d') => Some(InputAction::Quit),
                KeyCode::Char('u') => Some(InputAction::ClearLine),
                KeyCode::Char('a') => Some(InputAction::Home),
                KeyCode::Char('e') => Some(InputAction::End),
                KeyCode::Char('p') => Some(InputAction::HistoryPrev),
                KeyCode::Char('n') => Some(InputAction::HistoryNext),
                _ => None,
            };
        }

        match event.code {
            KeyCode::Char(c) => Some(InputAction::Insert(c)),
            KeyCode::Backspace => Some(InputAction::Backspace),
            KeyCode::Delete => Some(InputAction::Delete),
            KeyCode::Left => Some(InputAction::Left),
            KeyCode::Right => Some(InputAction::Right),
            KeyCode::Home => Some(InputAction::Home),
            KeyCode::End => Some(InputAction::End),
            KeyCode::Enter => Some(InputAction::Submit),
            KeyCode::Up => Some(InputAction::HistoryPrev),
            KeyCode::Down => Some(InputAction::HistoryNext),
            KeyCode::Tab => Some(InputAction::Complete),
            KeyCode::PageUp => Some(InputAction::ScrollUp),
            KeyCode::PageDown => Some(InputAction::ScrollDown),
            KeyCode::Esc => Some(InputAction::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn test_char_keys() {
        let event = key_event(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::Insert('a')));

        // Shifted chars arrive already uppercased
        let event = key_event(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::Insert('A')));

        let event = key_event(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::Quit));

        let event = key_event(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::ClearLine));

        let event = key_event(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(KeyMapper::map(&event), None);
    }

    #[test]
    fn test_navigation_keys() {
        let event = key_event(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::Submit));

        let event = key_event(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::HistoryPrev));

        let event = key_event(KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::ScrollDown));

        let event = key_event(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), Some(InputAction::Complete));

        let event = key_event(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(KeyMapper::map(&event), None);
    }
}
