use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::chat::conversation::Job;
use crate::terminal::state::ChatState;

pub enum KeyOutcome {
    Continue,
    Submit(Job),
    Quit,
}

pub fn handle_key(key: KeyEvent, state: &mut ChatState) -> KeyOutcome {
    if key.kind != KeyEventKind::Press {
        return KeyOutcome::Continue;
    }
    match key.code {
        KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyOutcome::Quit;
        }

        KeyCode::Enter => {
            // input is disabled while a command is in flight
            return match state.take_submission() {
                Some(job) => KeyOutcome::Submit(job),
                None => KeyOutcome::Continue,
            };
        }

        KeyCode::Backspace => state.pop_char(),
        KeyCode::Char(c) => state.push_char(c),

        KeyCode::Up => state.scroll(1),
        KeyCode::Down => state.scroll(-1),
        KeyCode::PageUp => state.scroll(10),
        KeyCode::PageDown => state.scroll(-10),
        KeyCode::End => state.scroll_back = 0,
        _ => {}
    }
    KeyOutcome::Continue
}
