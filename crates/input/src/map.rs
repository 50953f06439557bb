//! Key mapping from terminal events to buttons.

use crate::types::Button;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to one of the six buttons.
pub fn map_key(code: KeyCode) -> Option<Button> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Button::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Button::Right)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Button::Down)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(Button::Rotate),

        // Session
        KeyCode::Enter | KeyCode::Char(' ') => Some(Button::Confirm),
        KeyCode::Tab | KeyCode::Char('t') | KeyCode::Char('T') => Some(Button::Toggle),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyCode::Left), Some(Button::Left));
        assert_eq!(map_key(KeyCode::Right), Some(Button::Right));
        assert_eq!(map_key(KeyCode::Down), Some(Button::Down));

        assert_eq!(map_key(KeyCode::Char('H')), Some(Button::Left));
        assert_eq!(map_key(KeyCode::Char('L')), Some(Button::Right));
        assert_eq!(map_key(KeyCode::Char('J')), Some(Button::Down));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(KeyCode::Up), Some(Button::Rotate));
        assert_eq!(map_key(KeyCode::Char('w')), Some(Button::Rotate));
        assert_eq!(map_key(KeyCode::Char('X')), Some(Button::Rotate));
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(map_key(KeyCode::Enter), Some(Button::Confirm));
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Button::Confirm));
        assert_eq!(map_key(KeyCode::Tab), Some(Button::Toggle));
        assert_eq!(map_key(KeyCode::Char('p')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
