use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in grid cells (y grows downward).
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Everything a key press can mean. Keys without a meaning map to `None`
/// and are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    TogglePause,
    Steer(Direction),
    /// Flap / start / launch.
    Confirm,
    Restart,
    /// Leave the current game for the menu.
    Back,
    NextTab,
    PrevTab,
    /// Pick a game from the menu by number (0-based).
    Select(usize),
}

pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }

    let cmd = match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Pause => Command::TogglePause,
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Steer(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Steer(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::Steer(Direction::Right),
        KeyCode::Char(' ') | KeyCode::Enter => Command::Confirm,
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('c') | KeyCode::Char('C') => Command::Restart,
        KeyCode::Esc => Command::Back,
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Command::PrevTab,
        KeyCode::Tab => Command::NextTab,
        KeyCode::BackTab => Command::PrevTab,
        KeyCode::Char(c @ '1'..='9') => Command::Select(c as usize - '1' as usize),
        _ => return None,
    };
    Some(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_mapping() {
        assert_eq!(command_for(key(KeyCode::Up)), Some(Command::Steer(Direction::Up)));
        assert_eq!(command_for(key(KeyCode::Char(' '))), Some(Command::Confirm));
        assert_eq!(command_for(key(KeyCode::Char('c'))), Some(Command::Restart));
        assert_eq!(command_for(key(KeyCode::Char('2'))), Some(Command::Select(1)));
        assert_eq!(command_for(key(KeyCode::BackTab)), Some(Command::PrevTab));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let k = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(k), Some(Command::Quit));
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(command_for(key(KeyCode::Char('z'))), None);
        assert_eq!(command_for(key(KeyCode::F(5))), None);
        assert_eq!(command_for(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
    }
}
