mod key_action;

pub use key_action::KeyAction;

use crate::state::{AppState, PAGE_LINES};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Translates terminal events into state changes and [`KeyAction`]s
pub struct EventHandler;

impl EventHandler {
    pub fn handle_event(event: &Event, state: &mut AppState) -> Option<KeyAction> {
        match event {
            Event::Key(key_event) => Self::handle_key_event(*key_event, state),
            Event::Paste(text) => {
                if let Some(session) = state.session_mut()
                    && !session.is_pending()
                {
                    session.draft.insert_str(&text.replace(['\r', '\n'], " "));
                }
                None
            }
            _ => None,
        }
    }

    pub fn handle_key_event(event: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = event.modifiers.contains(KeyModifiers::ALT);

        match event.code {
            KeyCode::Char('c') if ctrl => return Some(KeyAction::Quit),
            KeyCode::Char('o') if ctrl => return Some(KeyAction::TogglePanel),
            _ => {}
        }

        if !state.is_open() {
            return match event.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
                _ => None,
            };
        }

        match event.code {
            KeyCode::Esc => Some(KeyAction::TogglePanel),
            // The sidebar is anchored on the right, so moving its edge left widens it.
            KeyCode::Left if ctrl => Some(KeyAction::Resized { width: state.sidebar.widen() }),
            KeyCode::Right if ctrl => Some(KeyAction::Resized { width: state.sidebar.narrow() }),
            KeyCode::Char('[') if alt => Some(KeyAction::Resized { width: state.sidebar.widen() }),
            KeyCode::Char(']') if alt => Some(KeyAction::Resized { width: state.sidebar.narrow() }),
            KeyCode::PageUp => {
                state.scroll.scroll_up(PAGE_LINES);
                Some(KeyAction::Scrolled)
            }
            KeyCode::PageDown => {
                state.scroll.scroll_down(PAGE_LINES);
                Some(KeyAction::Scrolled)
            }
            KeyCode::Home if ctrl || Self::draft_is_empty(state) => {
                state.scroll.scroll_home();
                Some(KeyAction::Scrolled)
            }
            KeyCode::End if ctrl || Self::draft_is_empty(state) => {
                state.scroll.scroll_end();
                Some(KeyAction::Scrolled)
            }
            KeyCode::Enter => Some(KeyAction::Submit),
            _ => {
                Self::edit_draft(event, state);
                None
            }
        }
    }

    fn draft_is_empty(state: &AppState) -> bool {
        state.session().is_none_or(|session| session.draft.is_empty())
    }

    /// Apply an editing key. The draft is read-only while a query is in flight.
    fn edit_draft(event: KeyEvent, state: &mut AppState) {
        let Some(session) = state.session_mut() else {
            return;
        };
        if session.is_pending() {
            return;
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let draft = &mut session.draft;
        match event.code {
            KeyCode::Char('a') if ctrl => draft.move_home(),
            KeyCode::Char('e') if ctrl => draft.move_end(),
            KeyCode::Char('u') if ctrl => draft.clear(),
            KeyCode::Char(c) if !ctrl => draft.insert_char(c),
            KeyCode::Backspace => draft.backspace(),
            KeyCode::Delete => draft.delete(),
            KeyCode::Left => draft.move_left(),
            KeyCode::Right => draft.move_right(),
            KeyCode::Home => draft.move_home(),
            KeyCode::End => draft.move_end(),
            KeyCode::Up => draft.history_up(),
            KeyCode::Down => draft.history_down(),
            _ => {}
        }
    }
}
