use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEventKind};

use super::types::{Action, ControllerState, CycleDirection};
use super::QUIT_KEY;

/// Maps a key press to a controller action for the current state.
///
/// The quit key only quits from the list; in the search box and the edit
/// line it is ordinary text.
#[must_use]
pub fn action_for_key(key_event: KeyEvent, state: &ControllerState) -> Option<Action> {
    let control = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Char('c') if control => Some(Action::Cancel),
        KeyCode::Char('j') if control => Some(Action::FocusList),
        KeyCode::Char('k') if control => Some(Action::FocusSearch),
        KeyCode::Char(_) if control => None,
        KeyCode::Char(QUIT_KEY) if *state == ControllerState::ListFocused => Some(Action::Cancel),
        KeyCode::Char(c) => Some(Action::Type(c)),
        KeyCode::Backspace => Some(Action::DeleteChar),
        KeyCode::Up => Some(Action::Move(CycleDirection::Up)),
        KeyCode::Down => Some(Action::Move(CycleDirection::Down)),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::ToggleFocus),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

/// Mouse wheel scrolls the selection; clicks do nothing.
#[must_use]
pub fn action_for_mouse(kind: MouseEventKind) -> Option<Action> {
    match kind {
        MouseEventKind::ScrollDown => Some(Action::Move(CycleDirection::Down)),
        MouseEventKind::ScrollUp => Some(Action::Move(CycleDirection::Up)),
        _ => None,
    }
}
