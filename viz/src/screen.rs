//! Terminal lifecycle and rendering.
//!
//! The screen is a pure projection of the [`App`] model: roles come from
//! the board, visited/path overlays from the applied event stream. Nothing
//! here is a source of truth.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, event, execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{self, ClearType},
};

use gridstar_core::{Coord, Role};

use crate::app::{App, Mark};

/// Screen row where the grid starts; row 0 holds the title.
pub const GRID_ROW0: u16 = 1;
/// Width of one rendered cell in terminal columns (wide enough to show a
/// two-decimal f-score).
pub const CELL_W: u16 = 6;

const COL_TITLE: Color = Color::Rgb { r: 200, g: 200, b: 220 };
const COL_FREE: Color = Color::Rgb { r: 28, g: 28, b: 38 };
const COL_BLOCKED: Color = Color::Rgb { r: 70, g: 70, b: 80 };
const COL_START: Color = Color::Rgb { r: 60, g: 170, b: 70 };
const COL_END: Color = Color::Rgb { r: 200, g: 60, b: 60 };
const COL_VISITED: Color = Color::Rgb { r: 45, g: 110, b: 190 };
const COL_PATH: Color = Color::Rgb { r: 230, g: 190, b: 60 };
const COL_CELL_TEXT: Color = Color::Rgb { r: 235, g: 235, b: 235 };
const COL_STATUS: Color = Color::Rgb { r: 180, g: 180, b: 200 };
const COL_HELP: Color = Color::Rgb { r: 120, g: 120, b: 140 };

const HELP_LINE: &str =
    "click/space: toggle | arrows/hjkl: move | enter/r: search | tab: heuristic | c: clear walls | R: reset | q: quit";

/// Map a terminal position to the grid cell underneath it. Positions to
/// the right of or below the grid map to out-of-bounds coordinates, which
/// toggle as no-ops.
pub fn cell_at(column: u16, row: u16) -> Option<Coord> {
    if row < GRID_ROW0 {
        return None;
    }
    Some(Coord::new(
        (row - GRID_ROW0) as i32,
        (column / CELL_W) as i32,
    ))
}

/// Terminal back-end: raw-mode lifecycle plus full-frame drawing.
pub struct Screen {
    out: Stdout,
}

impl Screen {
    /// Enter raw mode, the alternate screen, and mouse capture.
    pub fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { out })
    }

    /// Restore the terminal. Safe to call on any exit path.
    pub fn close(&mut self) {
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }

    /// Redraw the whole frame. The grid is small, so no diffing is done.
    pub fn draw(&mut self, app: &App) -> io::Result<()> {
        let dims = app.board().dims();

        queue!(
            self.out,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            SetForegroundColor(COL_TITLE),
            Print(format!("gridstar - A* visualizer ({dims})")),
            ResetColor
        )?;

        for c in dims.iter() {
            let (text, fg, bg) = cell_appearance(app, c);
            let x = (c.col as u16) * CELL_W;
            let y = GRID_ROW0 + c.row as u16;
            queue!(self.out, cursor::MoveTo(x, y))?;
            if c == app.cursor() {
                queue!(self.out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(
                self.out,
                SetForegroundColor(fg),
                SetBackgroundColor(bg),
                Print(text),
                ResetColor,
                SetAttribute(Attribute::Reset)
            )?;
        }

        let status_y = GRID_ROW0 + dims.height() as u16;
        queue!(
            self.out,
            cursor::MoveTo(0, status_y),
            SetForegroundColor(COL_STATUS),
            Print(format!("heuristic: {:<10} {}", app.heuristic(), app.status())),
            cursor::MoveTo(0, status_y + 1),
            SetForegroundColor(COL_HELP),
            Print(HELP_LINE),
            ResetColor
        )?;

        self.out.flush()
    }
}

/// Text and colors for one cell: role first, then overlay marks.
fn cell_appearance(app: &App, c: Coord) -> (String, Color, Color) {
    let blank = " ".repeat(CELL_W as usize);
    match app.board().role(c) {
        Role::Start => (center("S"), COL_CELL_TEXT, COL_START),
        Role::End => (center("E"), COL_CELL_TEXT, COL_END),
        Role::Blocked => (blank, COL_CELL_TEXT, COL_BLOCKED),
        Role::Free => match app.mark(c) {
            Some(Mark::Path) => (center("*"), COL_CELL_TEXT, COL_PATH),
            Some(Mark::Visited(f)) => (center(&format!("{f:.2}")), COL_CELL_TEXT, COL_VISITED),
            None => (blank, COL_CELL_TEXT, COL_FREE),
        },
    }
}

/// Center `s` within a cell-width field, truncating if it overflows.
fn center(s: &str) -> String {
    let w = CELL_W as usize;
    let len = s.chars().count();
    if len >= w {
        return s.chars().take(w).collect();
    }
    let left = (w - len) / 2;
    let right = w - len - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}
