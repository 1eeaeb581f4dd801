//! Distance heuristics guiding the search order.

use std::fmt;

use rand::{Rng, RngExt};

use crate::geom::Coord;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// Euclidean (L2) distance between two cells, at full precision.
#[inline]
pub fn euclidean(a: Coord, b: Coord) -> f64 {
    let dr = (a.row - b.row) as f64;
    let dc = (a.col - b.col) as f64;
    (dr * dr + dc * dc).sqrt()
}

/// The selectable heuristic kinds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
    /// Uniformly random estimate in `[0, bound)`. Intentionally
    /// inadmissible: it breaks the shortest-path guarantee and is kept for
    /// demonstration of how the estimate shapes the frontier.
    Random,
}

impl Heuristic {
    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
            Self::Random => "random",
        }
    }

    /// Rotate to the next heuristic kind (selector UI).
    pub fn cycle(self) -> Self {
        match self {
            Self::Manhattan => Self::Euclidean,
            Self::Euclidean => Self::Random,
            Self::Random => Self::Manhattan,
        }
    }

    /// Whether the estimate never overestimates the true remaining cost.
    pub fn is_admissible(self) -> bool {
        !matches!(self, Self::Random)
    }

    /// Estimated remaining cost from `a` to `b`.
    ///
    /// `bound` is the exclusive upper limit for [`Heuristic::Random`]
    /// (conventionally the grid width); the other kinds ignore it along
    /// with the entropy source.
    pub fn estimate<R: Rng>(self, a: Coord, b: Coord, bound: i32, rng: &mut R) -> f64 {
        match self {
            Self::Manhattan => manhattan(a, b) as f64,
            Self::Euclidean => euclidean(a, b),
            Self::Random => rng.random_range(0.0..bound.max(1) as f64),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
