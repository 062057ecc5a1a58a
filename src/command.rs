use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Pause,
    Enter,
    R,
    Q,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('w' | 'k')) => Some(Command::Up),
            (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('s' | 'j')) => {
                Some(Command::Down)
            }
            (_, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('a' | 'h')) => {
                Some(Command::Left)
            }
            (_, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('d' | 'l')) => {
                Some(Command::Right)
            }
            // With Caps Lock on, uppercase letters arrive without SHIFT.
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('W')) => Some(Command::Up),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('S')) => Some(Command::Down),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('A')) => Some(Command::Left),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('D')) => Some(Command::Right),
            (KeyModifiers::NONE, KeyCode::Char(' ' | 'p'))
            | (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('P')) => {
                Some(Command::Pause)
            }
            (_, KeyCode::Enter) => Some(Command::Enter),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::R),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Q),
            _ => None,
        }
    }
}
