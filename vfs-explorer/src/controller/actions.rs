//! src/controller/actions.rs
//! ============================================================================
//! # Actions: user commands of the directory browser
//!
//! Raw terminal events are mapped onto [`Action`] values before the event
//! loop acts on them, so key bindings live in one place.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveSelectionUp,
    MoveSelectionDown,
    SelectFirst,
    SelectLast,

    /// Open the selected entry if it is a permitted directory.
    ActivateSelected,

    GoToParent,
    ReloadDirectory,

    /// Close the error notification.
    DismissError,

    Resize(u16, u16),
    Quit,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let action = match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => Self::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Self::Quit,

            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Self::MoveSelectionUp,
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
                Self::MoveSelectionDown
            }
            (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => Self::SelectFirst,
            (KeyCode::End, _) | (KeyCode::Char('G'), _) => Self::SelectLast,

            (KeyCode::Enter, _) | (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
                Self::ActivateSelected
            }
            (KeyCode::Backspace, _) | (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
                Self::GoToParent
            }

            (KeyCode::Char('r'), KeyModifiers::NONE) | (KeyCode::F(5), _) => Self::ReloadDirectory,
            (KeyCode::Esc, _) => Self::DismissError,

            _ => return None,
        };

        Some(action)
    }

    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) => Self::from_key(*key),
            Event::Resize(width, height) => Some(Self::Resize(*width, *height)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn vim_and_arrow_keys_move_selection() {
        assert_eq!(Action::from_key(key(KeyCode::Char('j'))), Some(Action::MoveSelectionDown));
        assert_eq!(Action::from_key(key(KeyCode::Down)), Some(Action::MoveSelectionDown));
        assert_eq!(Action::from_key(key(KeyCode::Char('k'))), Some(Action::MoveSelectionUp));
        assert_eq!(Action::from_key(key(KeyCode::Up)), Some(Action::MoveSelectionUp));
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(Action::from_key(key(KeyCode::Enter)), Some(Action::ActivateSelected));
        assert_eq!(Action::from_key(key(KeyCode::Char('l'))), Some(Action::ActivateSelected));
        assert_eq!(Action::from_key(key(KeyCode::Backspace)), Some(Action::GoToParent));
        assert_eq!(Action::from_key(key(KeyCode::Char('h'))), Some(Action::GoToParent));
        assert_eq!(Action::from_key(key(KeyCode::Char('r'))), Some(Action::ReloadDirectory));
        assert_eq!(Action::from_key(key(KeyCode::Esc)), Some(Action::DismissError));
    }

    #[test]
    fn quit_and_unbound_keys() {
        assert_eq!(Action::from_key(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            Action::from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(Action::from_key(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(Action::from_key(release), None);
    }

    #[test]
    fn resize_event_maps_to_action() {
        assert_eq!(Action::from_event(&Event::Resize(80, 24)), Some(Action::Resize(80, 24)));
    }
}
