//! Visualization events and terminal outcomes — the core→renderer contract.
//!
//! Events are delivered in emission order and consumers must apply them in
//! order without dropping any: downstream rendering (marking cells visited
//! or on the path) depends on monotonic, in-order application.

use crate::geom::Coord;

/// Round a score to two decimals for display.
#[inline]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// A single per-cell visualization event emitted during a search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VizEvent {
    /// Frontier expansion touched `at`; `f_display` is the cell's fScore
    /// rounded to two decimals.
    Visited { at: Coord, f_display: f64 },
    /// `at` lies on the reconstructed path (endpoints excluded).
    Path { at: Coord },
}

impl VizEvent {
    /// The cell this event refers to.
    pub fn at(&self) -> Coord {
        match *self {
            Self::Visited { at, .. } | Self::Path { at } => at,
        }
    }
}

/// The terminal result of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// A shortest path was found, ordered start→end, endpoints included.
    Found { path: Vec<Coord> },
    /// The open set was exhausted without reaching the end cell. A normal,
    /// reportable outcome, not an error.
    NoPath,
}

impl Outcome {
    /// Whether a path was found.
    pub fn found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Coord]> {
        match self {
            Self::Found { path } => Some(path),
            Self::NoPath => None,
        }
    }
}
