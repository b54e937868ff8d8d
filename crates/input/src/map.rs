//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(GameAction::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameAction::RotateCcw),

        // Session
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Enter => Some(GameAction::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Reset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        || matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
}

/// Terminals that report releases send two events per key; only presses and
/// auto-repeats count.
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
}
