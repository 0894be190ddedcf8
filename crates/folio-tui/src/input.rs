use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use folio_core::paging::{EventTarget, Gesture, NavKey};

use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    GotoPrompt,
    JumpToTop,
    JumpToBottom,
    JumpToSection(usize),
    OpenContact,
    ScrollLineDown,
    ScrollLineUp,
    PendingG, // first 'g' of "gg"
    // prompt mode
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Paging key for a key event. Any modifier makes it `Other`, so shortcuts
/// such as Ctrl+Down keep their usual meaning.
pub fn nav_key(key: &KeyEvent) -> NavKey {
    if key.modifiers != KeyModifiers::NONE {
        return NavKey::Other;
    }
    match key.code {
        KeyCode::PageDown => NavKey::PageDown,
        KeyCode::PageUp => NavKey::PageUp,
        KeyCode::Down => NavKey::ArrowDown,
        KeyCode::Up => NavKey::ArrowUp,
        KeyCode::Char(' ') => NavKey::Space,
        _ => NavKey::Other,
    }
}

/// Key gesture for the paging controller; `None` for keys it never maps
pub fn key_gesture(key: &KeyEvent, target: EventTarget) -> Option<Gesture> {
    match nav_key(key) {
        NavKey::Other => None,
        nav => Some(Gesture::key(nav).on(target)),
    }
}

/// Wheel gesture for a mouse scroll event.
///
/// One notch reports `step_px`; Ctrl is the zoom modifier.
pub fn wheel_gesture(mouse: &MouseEvent, step_px: f64, target: EventTarget) -> Option<Gesture> {
    let delta = match mouse.kind {
        MouseEventKind::ScrollDown => step_px,
        MouseEventKind::ScrollUp => -step_px,
        _ => return None,
    };

    let gesture = Gesture::wheel(delta).on(target);
    if mouse.modifiers.contains(KeyModifiers::CONTROL) {
        Some(gesture.with_zoom_modifier())
    } else {
        Some(gesture)
    }
}

/// Map a key event to an action.
///
/// `pending_key` carries the first key of a multi-key sequence.
pub fn handle_key_event(
    key: KeyEvent,
    prompt_open: bool,
    pending_key: Option<char>,
    keymap: &Keymap,
) -> Action {
    if prompt_open {
        return handle_prompt_mode(key);
    }

    let binding = KeyBinding::from(&key);
    if keymap.is_g_prefix(&binding) {
        return if pending_key == Some('g') {
            keymap.pending_g_action().cloned().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

fn handle_prompt_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Action::InputChar(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::paging::ControlKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn scroll(kind: MouseEventKind, modifiers: KeyModifiers) -> MouseEvent {
        MouseEvent {
            kind,
            column: 10,
            row: 10,
            modifiers,
        }
    }

    #[test]
    fn test_nav_keys() {
        assert_eq!(nav_key(&press(KeyCode::PageDown)), NavKey::PageDown);
        assert_eq!(nav_key(&press(KeyCode::Char(' '))), NavKey::Space);
        assert_eq!(nav_key(&press(KeyCode::Up)), NavKey::ArrowUp);
        assert_eq!(nav_key(&press(KeyCode::Char('x'))), NavKey::Other);
        assert_eq!(
            nav_key(&KeyEvent::new(KeyCode::Down, KeyModifiers::CONTROL)),
            NavKey::Other
        );
    }

    #[test]
    fn test_key_gesture_carries_target() {
        let target = EventTarget::Control(ControlKind::TextInput);
        let gesture = key_gesture(&press(KeyCode::PageDown), target).unwrap();
        assert_eq!(gesture.target(), target);
        assert!(key_gesture(&press(KeyCode::Char('q')), target).is_none());
    }

    #[test]
    fn test_wheel_gesture() {
        let down = wheel_gesture(
            &scroll(MouseEventKind::ScrollDown, KeyModifiers::NONE),
            100.0,
            EventTarget::Document,
        )
        .unwrap();
        assert_eq!(down, Gesture::wheel(100.0));

        let zoom = wheel_gesture(
            &scroll(MouseEventKind::ScrollUp, KeyModifiers::CONTROL),
            100.0,
            EventTarget::Document,
        )
        .unwrap();
        assert_eq!(zoom, Gesture::wheel(-100.0).with_zoom_modifier());

        assert!(wheel_gesture(
            &scroll(MouseEventKind::Moved, KeyModifiers::NONE),
            100.0,
            EventTarget::Document
        )
        .is_none());
    }

    #[test]
    fn test_gg_sequence() {
        let keymap = Keymap::default();
        let g = press(KeyCode::Char('g'));
        assert_eq!(handle_key_event(g, false, None, &keymap), Action::PendingG);
        assert_eq!(handle_key_event(g, false, Some('g'), &keymap), Action::JumpToTop);
    }

    #[test]
    fn test_prompt_mode_captures_text() {
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(press(KeyCode::Char('q')), true, None, &keymap),
            Action::InputChar('q')
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Enter), true, None, &keymap),
            Action::Confirm
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('q')), false, None, &keymap),
            Action::Quit
        );
    }
}
