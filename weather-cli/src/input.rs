//! Key handling for the interactive screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use weather_core::{Action, ViewState};

/// What a key press means for the app.
#[derive(Debug)]
pub enum Command {
    Dispatch(Action),
    Quit,
}

pub fn map_key(key: KeyEvent, state: &ViewState) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if ctrl => Some(Command::Quit),
        KeyCode::Char('u') if ctrl => Some(Command::Dispatch(Action::QueryChange(String::new()))),
        KeyCode::Enter if state.can_submit() => Some(Command::Dispatch(Action::Submit)),
        KeyCode::Enter => None,
        KeyCode::Backspace => {
            let mut query = state.query.clone();
            query.pop()?;
            Some(Command::Dispatch(Action::QueryChange(query)))
        }
        KeyCode::Char(c) if !ctrl => {
            let mut query = state.query.clone();
            query.push(c);
            Some(Command::Dispatch(Action::QueryChange(query)))
        }
        _ => None,
    }
}
