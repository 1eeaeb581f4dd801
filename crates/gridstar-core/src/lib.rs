//! **gridstar-core** — grid model for the gridstar pathfinding visualizer.
//!
//! This crate holds the model half of the visualizer: cell coordinates and
//! grid dimensions ([`Coord`], [`Dims`]), the role state machine and
//! adjacency queries ([`Board`]), the selectable distance heuristics
//! ([`Heuristic`]), and the visualization event vocabulary the search
//! engine emits toward renderers ([`VizEvent`], [`Outcome`]).
//!
//! The board is the single source of truth for cell roles; frontends
//! project it onto a screen and feed toggle actions back in.

pub mod board;
pub mod events;
pub mod geom;
pub mod heuristic;

pub use board::{Board, Role};
pub use events::{Outcome, VizEvent, round2};
pub use geom::{Coord, Dims};
pub use heuristic::{Heuristic, euclidean, manhattan};
