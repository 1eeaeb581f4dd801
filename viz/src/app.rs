//! The frontend model: board editing, heuristic selection, and the
//! animation state of the current search.

use std::collections::HashMap;

use gridstar_core::{Board, Coord, Dims, Heuristic, Outcome, VizEvent};
use gridstar_engine::{Search, SearchError, Step};

use crate::input::Action;

/// Per-cell overlay mark, mirroring the applied event stream.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Mark {
    /// The search frontier touched this cell; carries the rounded f-score.
    Visited(f64),
    /// The cell lies on the reconstructed path.
    Path,
}

/// The interactive visualizer model. Pure of terminal concerns: the main
/// loop feeds it [`Action`]s and ticks, the screen projects it.
pub struct App {
    board: Board,
    heuristic: Heuristic,
    cursor: Coord,
    marks: HashMap<Coord, Mark>,
    status: String,
    search: Option<Search>,
    outcome: Option<Outcome>,
    quit: bool,
}

impl App {
    pub fn new(dims: Dims) -> Self {
        Self {
            board: Board::new(dims),
            heuristic: Heuristic::default(),
            cursor: Coord::new(0, 0),
            marks: HashMap::new(),
            status: "Toggle cells to place start, end and walls; Enter runs the search.".into(),
            search: None,
            outcome: None,
            quit: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn mark(&self, c: Coord) -> Option<Mark> {
        self.marks.get(&c).copied()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Whether a search animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.search.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply one user action to the model.
    ///
    /// Any board edit or new run request while an animation is in flight
    /// cancels the in-flight search first; only one search may be active
    /// at a time.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit = true,
            Action::Toggle(c) => {
                self.cancel_animation();
                if self.board.dims().contains(c) {
                    self.cursor = c;
                }
                self.board.toggle(c);
            }
            Action::ToggleAtCursor => {
                self.cancel_animation();
                self.board.toggle(self.cursor);
            }
            Action::MoveCursor(dr, dc) => {
                let dims = self.board.dims();
                let moved = self.cursor.shift(dr, dc);
                if dims.contains(moved) {
                    self.cursor = moved;
                }
            }
            Action::CycleHeuristic => {
                self.cancel_animation();
                self.heuristic = self.heuristic.cycle();
                self.status = format!("Heuristic: {}", self.heuristic);
            }
            Action::Run => self.start_search(),
            Action::ClearWalls => {
                self.cancel_animation();
                self.board.clear_walls();
                self.marks.clear();
                self.outcome = None;
                self.status = "Walls cleared.".into();
            }
            Action::Reset => {
                self.cancel_animation();
                self.board.reset();
                self.marks.clear();
                self.outcome = None;
                self.status = "Board reset.".into();
            }
        }
    }

    /// Advance the in-flight search by one animation quantum, applying its
    /// events in emission order. No-op when idle.
    pub fn tick(&mut self) {
        let Some(search) = self.search.as_mut() else {
            return;
        };
        match search.step() {
            Step::Expanded(events) => {
                for e in events {
                    self.apply_event(e);
                }
            }
            Step::PathCell(e) => self.apply_event(e),
            Step::Done(outcome) => {
                self.status = match &outcome {
                    Outcome::Found { path } => {
                        format!("Path found: {} steps.", path.len().saturating_sub(1))
                    }
                    // Visited marks stay visible as a trace of the attempt.
                    Outcome::NoPath => "No path found.".into(),
                };
                self.outcome = Some(outcome);
                self.search = None;
            }
        }
    }

    fn start_search(&mut self) {
        self.cancel_animation();
        // Reset-on-rerun: residual marks from the previous attempt clear
        // before any new events arrive.
        self.marks.clear();
        self.outcome = None;
        match Search::new(&self.board, self.heuristic) {
            Ok(search) => {
                self.status = format!("Searching ({})...", self.heuristic);
                self.search = Some(search);
            }
            Err(SearchError::MissingEndpoint) => {
                self.status = "Select both start and end cells first.".into();
            }
        }
    }

    fn cancel_animation(&mut self) {
        if self.search.take().is_some() {
            log::debug!("in-flight search cancelled by user action");
            self.status = "Search cancelled.".into();
        }
    }

    fn apply_event(&mut self, e: VizEvent) {
        match e {
            VizEvent::Visited { at, f_display } => {
                self.marks.insert(at, Mark::Visited(f_display));
            }
            VizEvent::Path { at } => {
                self.marks.insert(at, Mark::Path);
            }
        }
    }
}
