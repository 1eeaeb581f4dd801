//! Maps crossterm terminal events to frontend [`Action`]s.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use gridstar_core::Coord;

use crate::screen;

/// A user action on the visualizer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Cycle the role of a specific cell (mouse).
    Toggle(Coord),
    /// Cycle the role of the cell under the keyboard cursor.
    ToggleAtCursor,
    /// Move the keyboard cursor by (dr, dc).
    MoveCursor(i32, i32),
    /// Select the next heuristic kind.
    CycleHeuristic,
    /// Trigger a search.
    Run,
    /// Remove all blocked cells, keeping endpoints.
    ClearWalls,
    /// Clear the whole board.
    Reset,
    Quit,
}

/// Map a terminal event to an action, if it is bound to one.
pub fn action_for(ev: &Event) -> Option<Action> {
    match ev {
        Event::Key(KeyEvent {
            code, modifiers, ..
        }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveCursor(-1, 0)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveCursor(1, 0)),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveCursor(0, -1)),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveCursor(0, 1)),
            KeyCode::Char(' ') => Some(Action::ToggleAtCursor),
            KeyCode::Enter | KeyCode::Char('r') => Some(Action::Run),
            KeyCode::Tab => Some(Action::CycleHeuristic),
            KeyCode::Char('c') => Some(Action::ClearWalls),
            KeyCode::Char('R') => Some(Action::Reset),
            _ => None,
        },
        Event::Mouse(me) => match me.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                screen::cell_at(me.column, me.row).map(Action::Toggle)
            }
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::MouseEvent;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn key_bindings() {
        assert_eq!(action_for(&key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action_for(&key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(action_for(&key(KeyCode::Enter)), Some(Action::Run));
        assert_eq!(action_for(&key(KeyCode::Char('r'))), Some(Action::Run));
        assert_eq!(
            action_for(&key(KeyCode::Tab)),
            Some(Action::CycleHeuristic)
        );
        assert_eq!(
            action_for(&key(KeyCode::Char(' '))),
            Some(Action::ToggleAtCursor)
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('R'))),
            Some(Action::Reset)
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('c'))),
            Some(Action::ClearWalls)
        );
        assert_eq!(action_for(&key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn hjkl_and_arrows_move_the_cursor() {
        assert_eq!(
            action_for(&key(KeyCode::Char('h'))),
            Some(Action::MoveCursor(0, -1))
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('j'))),
            Some(Action::MoveCursor(1, 0))
        );
        assert_eq!(action_for(&key(KeyCode::Up)), Some(Action::MoveCursor(-1, 0)));
        assert_eq!(action_for(&key(KeyCode::Right)), Some(Action::MoveCursor(0, 1)));
    }

    #[test]
    fn ctrl_c_quits_instead_of_clearing_walls() {
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(action_for(&ev), Some(Action::Quit));
    }

    #[test]
    fn left_click_toggles_the_cell_under_the_pointer() {
        let ev = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: screen::GRID_ROW0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(action_for(&ev), Some(Action::Toggle(Coord::new(0, 0))));
    }

    #[test]
    fn click_above_the_grid_is_ignored() {
        let ev = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(action_for(&ev), None);
    }
}
