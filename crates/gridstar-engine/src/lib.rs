//! **gridstar-engine** — incremental A* search for the gridstar visualizer.
//!
//! The engine computes shortest paths (by hop count) over a
//! [`Board`](gridstar_core::Board) snapshot and exposes execution as a
//! sequence of observable quanta:
//!
//! - [`Search::step`] advances exactly one quantum (one frontier
//!   expansion, or one path cell during reconstruction) and returns the
//!   visualization events it produced before any further state is
//!   computed.
//! - [`run`] drives a search to completion under a caller-chosen
//!   [`Pacer`] (animation pacing is never baked into the algorithm) with
//!   cooperative cancellation via [`Context`].
//!
//! The open set is a binary heap keyed by f-score with insertion-order
//! tie-break, so equal-score expansion is deterministic and test-stable.

mod error;
mod runner;
mod search;

pub use error::SearchError;
pub use runner::{Context, DEFAULT_DELAY, FixedDelay, NoDelay, Pacer, run, run_collect};
pub use search::{Search, Step};
