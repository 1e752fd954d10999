//! Key handling for the terminal front end.
//!
//! The binary puts the terminal in raw mode and feeds each crossterm key
//! event through [`Command::from_key_event`], so a move happens on key press
//! without waiting for Enter.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Restart,
    /// Dismiss the win banner and keep playing.
    Dismiss,
    Help,
    Quit,
}

impl Command {
    /// Map a typed character: WASD/hjkl move, `r` restarts, `c` dismisses a win.
    pub fn from_char(c: char) -> Option<Command> {
        match c {
            'r' | 'R' => Some(Command::Restart),
            'c' | 'C' => Some(Command::Dismiss),
            'q' | 'Q' => Some(Command::Quit),
            '?' => Some(Command::Help),
            c => Move::from_key(c).map(Command::Move),
        }
    }

    /// Map a key press. Releases and repeats are ignored, as are unbound keys.
    pub fn from_key_event(event: &KeyEvent) -> Option<Command> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        match event.code {
            KeyCode::Up => Some(Command::Move(Move::Up)),
            KeyCode::Down => Some(Command::Move(Move::Down)),
            KeyCode::Left => Some(Command::Move(Move::Left)),
            KeyCode::Right => Some(Command::Move(Move::Right)),
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char(c) => Command::from_char(c),
            _ => None,
        }
    }
}
