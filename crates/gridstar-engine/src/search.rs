//! The incremental A* search: [`Search`] and [`Step`].

use std::collections::BinaryHeap;

use gridstar_core::{Board, Coord, Dims, Heuristic, Outcome, VizEvent, round2};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::SearchError;

const NO_PARENT: usize = usize::MAX;
const INF: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Node / OpenRef
// ---------------------------------------------------------------------------

/// Per-cell search state. `g` is the best known cost from the start cell,
/// `f` adds the heuristic estimate to the end cell.
#[derive(Clone)]
struct Node {
    g: i32,
    f: f64,
    parent: usize,
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: INF,
            f: f64::INFINITY,
            parent: NO_PARENT,
            open: false,
        }
    }
}

/// Open-set heap entry, ordered by `f` with insertion-order (FIFO)
/// tie-break: among equal scores the first-discovered cell wins, which
/// keeps equal-score expansion deterministic and test-stable.
#[derive(Clone, Copy)]
struct OpenRef {
    f: f64,
    seq: u64,
    idx: usize,
}

impl PartialEq for OpenRef {
    fn eq(&self, other: &Self) -> bool {
        // seq is unique per entry.
        self.seq == other.seq
    }
}

impl Eq for OpenRef {}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so BinaryHeap (max-heap) pops the smallest f first;
        // at equal f the smaller seq (earlier insertion) pops first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Step / Phase
// ---------------------------------------------------------------------------

/// One observable quantum of search progress.
///
/// Every state mutation is returned to the caller before any further state
/// is computed; the step boundaries are exactly the points where the
/// animation suspends.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// One node was expanded; the batch of `Visited` events it produced
    /// (possibly empty when no neighbor improved).
    Expanded(Vec<VizEvent>),
    /// One interior path cell was marked during reconstruction.
    PathCell(VizEvent),
    /// The search terminated. Repeated calls keep returning this.
    Done(Outcome),
}

enum Phase {
    Expanding,
    Walking { path: Vec<Coord>, next: usize },
    Done(Outcome),
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A single in-flight A* search over a snapshot of the board.
///
/// All search state (open set, parent links, g/f scores) is owned by this
/// value, initialized fresh at construction and discarded when it is
/// dropped; nothing survives between searches except the board's roles.
/// The board is cloned at construction, so live edits to the original
/// cannot race a search in progress.
pub struct Search {
    board: Board,
    dims: Dims,
    end: Coord,
    heuristic: Heuristic,
    rng: StdRng,
    nodes: Vec<Node>,
    open: BinaryHeap<OpenRef>,
    seq: u64,
    nbuf: Vec<Coord>,
    phase: Phase,
}

impl Search {
    /// Begin a search over `board` with the given heuristic, seeding the
    /// entropy source (used by [`Heuristic::Random`]) from the OS.
    ///
    /// Fails with [`SearchError::MissingEndpoint`] unless both start and
    /// end cells are assigned; no work is done and no events are emitted
    /// in that case.
    pub fn new(board: &Board, heuristic: Heuristic) -> Result<Self, SearchError> {
        Self::with_rng(board, heuristic, StdRng::from_rng(&mut rand::rng()))
    }

    /// Like [`Search::new`] but with a caller-supplied entropy source, for
    /// deterministic runs and replay.
    pub fn with_rng(board: &Board, heuristic: Heuristic, rng: StdRng) -> Result<Self, SearchError> {
        let (Some(start), Some(end)) = (board.start(), board.end()) else {
            return Err(SearchError::MissingEndpoint);
        };
        let dims = board.dims();
        let (si, _) = match (dims.index(start), dims.index(end)) {
            (Some(si), Some(ei)) => (si, ei),
            // Board invariants keep endpoints in bounds.
            _ => return Err(SearchError::MissingEndpoint),
        };

        log::debug!("search start={start} end={end} heuristic={heuristic} dims={dims}");

        let mut search = Self {
            board: board.clone(),
            dims,
            end,
            heuristic,
            rng,
            nodes: vec![Node::default(); dims.len()],
            open: BinaryHeap::new(),
            seq: 0,
            nbuf: Vec::with_capacity(4),
            phase: Phase::Expanding,
        };

        let f0 = search.estimate(start);
        let node = &mut search.nodes[si];
        node.g = 0;
        node.f = f0;
        node.open = true;
        search.open.push(OpenRef {
            f: f0,
            seq: 0,
            idx: si,
        });
        Ok(search)
    }

    /// The dimensions of the board snapshot.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// The heuristic in effect for this search.
    #[inline]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Whether the search has terminated.
    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done(_))
    }

    /// Best known cost from the start cell to `c`, if `c` has been reached.
    pub fn g_at(&self, c: Coord) -> Option<i32> {
        let i = self.dims.index(c)?;
        let g = self.nodes[i].g;
        (g != INF).then_some(g)
    }

    /// Advance the search by one observable quantum.
    pub fn step(&mut self) -> Step {
        if let Phase::Done(outcome) = &self.phase {
            return Step::Done(outcome.clone());
        }
        if matches!(self.phase, Phase::Walking { .. }) {
            return self.walk();
        }
        self.expand()
    }

    fn estimate(&mut self, from: Coord) -> f64 {
        self.heuristic
            .estimate(from, self.end, self.dims.width(), &mut self.rng)
    }

    /// Pop and expand the best open node. Stale heap entries (already
    /// expanded under a better score) are skipped without being observed.
    fn expand(&mut self) -> Step {
        loop {
            let Some(current) = self.open.pop() else {
                self.phase = Phase::Done(Outcome::NoPath);
                return Step::Done(Outcome::NoPath);
            };

            let ci = current.idx;
            if !self.nodes[ci].open {
                continue;
            }
            self.nodes[ci].open = false;

            let cur = self.dims.coord(ci);
            if cur == self.end {
                let path = self.reconstruct(ci);
                self.phase = Phase::Walking { path, next: 1 };
                return self.walk();
            }

            let current_g = self.nodes[ci].g;
            let mut nbuf = std::mem::take(&mut self.nbuf);
            nbuf.clear();
            self.board.neighbors(cur, &mut nbuf);

            let mut events = Vec::new();
            for &nc in nbuf.iter() {
                let Some(ni) = self.dims.index(nc) else {
                    continue;
                };
                let tentative = current_g + 1;
                if tentative >= self.nodes[ni].g {
                    continue;
                }
                let f = tentative as f64 + self.estimate(nc);
                let node = &mut self.nodes[ni];
                node.g = tentative;
                node.f = f;
                node.parent = ci;
                node.open = true;
                self.seq += 1;
                self.open.push(OpenRef {
                    f,
                    seq: self.seq,
                    idx: ni,
                });
                if nc != self.end {
                    events.push(VizEvent::Visited {
                        at: nc,
                        f_display: round2(f),
                    });
                }
            }

            self.nbuf = nbuf;
            return Step::Expanded(events);
        }
    }

    /// Emit one interior path cell per call, then the terminal outcome.
    fn walk(&mut self) -> Step {
        let Phase::Walking { path, next } = &mut self.phase else {
            unreachable!("walk is only entered in the walking phase");
        };
        if *next + 1 < path.len() {
            let at = path[*next];
            *next += 1;
            return Step::PathCell(VizEvent::Path { at });
        }
        let path = std::mem::take(path);
        let outcome = Outcome::Found { path };
        self.phase = Phase::Done(outcome.clone());
        Step::Done(outcome)
    }

    /// Follow parent links back from the goal and reverse into start→end
    /// order.
    fn reconstruct(&self, goal: usize) -> Vec<Coord> {
        let mut path = Vec::new();
        let mut ci = goal;
        while ci != NO_PARENT {
            path.push(self.dims.coord(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_collect;
    use gridstar_core::manhattan;

    fn board_with(dims: Dims, start: Coord, end: Coord, blocked: &[Coord]) -> Board {
        let mut b = Board::new(dims);
        b.toggle(start);
        b.toggle(end);
        for &w in blocked {
            b.toggle(w);
        }
        b
    }

    fn seeded(board: &Board, h: Heuristic) -> Search {
        Search::with_rng(board, h, StdRng::seed_from_u64(42)).unwrap()
    }

    fn assert_valid_path(path: &[Coord], start: Coord, end: Coord) {
        assert!(path.len() >= 2);
        assert_eq!(path[0], start);
        assert_eq!(*path.last().unwrap(), end);
        for pair in path.windows(2) {
            assert_eq!(manhattan(pair[0], pair[1]), 1, "non-orthogonal step");
        }
    }

    #[test]
    fn three_by_three_open_grid_shortest_path() {
        let start = Coord::new(0, 0);
        let end = Coord::new(2, 2);
        let b = board_with(Dims::new(3, 3), start, end, &[]);
        let (_, outcome) = run_collect(seeded(&b, Heuristic::Manhattan));

        let path = outcome.path().expect("path expected");
        assert_eq!(path.len(), 5); // length 4, five cells with endpoints
        assert_valid_path(path, start, end);
    }

    #[test]
    fn path_length_matches_manhattan_on_open_grid() {
        let pairs = [
            (Coord::new(0, 0), Coord::new(7, 7)),
            (Coord::new(2, 1), Coord::new(5, 6)),
            (Coord::new(7, 0), Coord::new(0, 7)),
        ];
        for h in [Heuristic::Manhattan, Heuristic::Euclidean] {
            for (start, end) in pairs {
                let b = board_with(Dims::default(), start, end, &[]);
                let (_, outcome) = run_collect(seeded(&b, h));
                let path = outcome.path().expect("path expected");
                assert_eq!(path.len() as i32, manhattan(start, end) + 1);
                assert_valid_path(path, start, end);
            }
        }
    }

    #[test]
    fn blocked_column_reports_no_path() {
        let b = board_with(
            Dims::new(3, 3),
            Coord::new(0, 0),
            Coord::new(2, 2),
            &[Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 1)],
        );
        let (events, outcome) = run_collect(seeded(&b, Heuristic::Manhattan));
        assert_eq!(outcome, Outcome::NoPath);
        // The start side of the wall still gets explored...
        assert!(!events.is_empty());
        // ...but no path events are emitted.
        assert!(!events.iter().any(|e| matches!(e, VizEvent::Path { .. })));
    }

    #[test]
    fn enclosed_start_reports_no_path() {
        let b = board_with(
            Dims::new(5, 5),
            Coord::new(2, 2),
            Coord::new(0, 0),
            &[
                Coord::new(1, 2),
                Coord::new(3, 2),
                Coord::new(2, 1),
                Coord::new(2, 3),
            ],
        );
        let (_, outcome) = run_collect(seeded(&b, Heuristic::Manhattan));
        assert_eq!(outcome, Outcome::NoPath);
    }

    #[test]
    fn missing_endpoint_rejected_before_any_work() {
        let mut b = Board::new(Dims::new(3, 3));
        assert_eq!(
            Search::new(&b, Heuristic::Manhattan).err(),
            Some(SearchError::MissingEndpoint)
        );
        b.toggle(Coord::new(0, 0)); // start only
        assert_eq!(
            Search::new(&b, Heuristic::Manhattan).err(),
            Some(SearchError::MissingEndpoint)
        );
    }

    #[test]
    fn visited_events_never_carry_endpoints() {
        let start = Coord::new(0, 0);
        let end = Coord::new(2, 2);
        let b = board_with(Dims::new(4, 4), start, end, &[]);
        let (events, _) = run_collect(seeded(&b, Heuristic::Euclidean));
        for e in &events {
            if let VizEvent::Visited { at, .. } = e {
                assert_ne!(*at, start);
                assert_ne!(*at, end);
            }
        }
    }

    #[test]
    fn path_events_are_interior_cells_in_order() {
        let start = Coord::new(0, 0);
        let end = Coord::new(3, 3);
        let b = board_with(Dims::new(4, 4), start, end, &[]);
        let (events, outcome) = run_collect(seeded(&b, Heuristic::Manhattan));

        let path = outcome.path().expect("path expected");
        let walked: Vec<Coord> = events
            .iter()
            .filter_map(|e| match e {
                VizEvent::Path { at } => Some(*at),
                _ => None,
            })
            .collect();
        assert_eq!(walked, path[1..path.len() - 1].to_vec());
    }

    #[test]
    fn rerun_on_unchanged_board_is_identical() {
        let b = board_with(
            Dims::default(),
            Coord::new(1, 1),
            Coord::new(6, 5),
            &[Coord::new(3, 3), Coord::new(4, 3), Coord::new(3, 4)],
        );
        let (ev1, out1) = run_collect(seeded(&b, Heuristic::Manhattan));
        let (ev2, out2) = run_collect(seeded(&b, Heuristic::Manhattan));
        assert_eq!(ev1, ev2);
        assert_eq!(out1, out2);
    }

    #[test]
    fn random_heuristic_is_deterministic_under_a_fixed_seed() {
        let start = Coord::new(0, 0);
        let end = Coord::new(7, 7);
        let b = board_with(Dims::default(), start, end, &[]);

        let (ev1, out1) = run_collect(seeded(&b, Heuristic::Random));
        let (ev2, out2) = run_collect(seeded(&b, Heuristic::Random));
        assert_eq!(ev1, ev2);
        assert_eq!(out1, out2);

        // Inadmissible, but still complete: a path is found on an open grid.
        let path = out1.path().expect("path expected");
        assert_valid_path(path, start, end);
    }

    #[test]
    fn adjacent_endpoints_emit_no_path_events() {
        let b = board_with(Dims::new(2, 2), Coord::new(0, 0), Coord::new(0, 1), &[]);
        let (events, outcome) = run_collect(seeded(&b, Heuristic::Manhattan));
        let path = outcome.path().expect("path expected");
        assert_eq!(path.len(), 2);
        assert!(!events.iter().any(|e| matches!(e, VizEvent::Path { .. })));
    }

    #[test]
    fn g_scores_only_strictly_decrease() {
        let b = board_with(
            Dims::new(6, 6),
            Coord::new(5, 0),
            Coord::new(0, 5),
            &[Coord::new(2, 2), Coord::new(2, 3), Coord::new(3, 2)],
        );
        let mut s = seeded(&b, Heuristic::Euclidean);
        let dims = s.dims();
        let mut prev: Vec<Option<i32>> = dims.iter().map(|c| s.g_at(c)).collect();

        loop {
            let step = s.step();
            for (i, c) in dims.iter().enumerate() {
                let now = s.g_at(c);
                match (prev[i], now) {
                    (Some(a), Some(b)) => assert!(b <= a, "g increased at {c}"),
                    (Some(_), None) => panic!("g erased at {c}"),
                    (None, _) => {}
                }
                prev[i] = now;
            }
            if matches!(step, Step::Done(_)) {
                break;
            }
        }
    }

    #[test]
    fn first_step_expands_the_start_cell() {
        let start = Coord::new(3, 3);
        let b = board_with(Dims::default(), start, Coord::new(0, 0), &[]);
        let mut s = seeded(&b, Heuristic::Manhattan);
        match s.step() {
            Step::Expanded(events) => {
                assert!(!events.is_empty());
                for e in &events {
                    assert_eq!(manhattan(e.at(), start), 1);
                }
            }
            other => panic!("expected expansion, got {other:?}"),
        }
    }

    #[test]
    fn done_is_sticky() {
        let b = board_with(Dims::new(2, 2), Coord::new(0, 0), Coord::new(1, 1), &[]);
        let mut s = seeded(&b, Heuristic::Manhattan);
        let outcome = loop {
            if let Step::Done(o) = s.step() {
                break o;
            }
        };
        assert!(s.is_done());
        assert_eq!(s.step(), Step::Done(outcome.clone()));
        assert_eq!(s.step(), Step::Done(outcome));
    }

    #[test]
    fn visited_scores_are_rounded_to_two_decimals() {
        let b = board_with(Dims::new(5, 5), Coord::new(0, 0), Coord::new(4, 3), &[]);
        let (events, _) = run_collect(seeded(&b, Heuristic::Euclidean));
        for e in &events {
            if let VizEvent::Visited { f_display, .. } = e {
                assert_eq!(*f_display, round2(*f_display));
            }
        }
    }

    #[test]
    fn search_snapshots_the_board() {
        let start = Coord::new(0, 0);
        let end = Coord::new(2, 2);
        let mut b = board_with(Dims::new(3, 3), start, end, &[]);
        let s = seeded(&b, Heuristic::Manhattan);

        // Wall off the board after the search has begun: the snapshot
        // keeps the in-flight search on the old topology.
        for w in [Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 1)] {
            b.toggle(w);
        }
        let (_, outcome) = run_collect(s);
        assert!(outcome.found());
    }
}
