//! Driving a [`Search`] to completion: pacing policies and cooperative
//! cancellation.
//!
//! The engine never sleeps on its own; animation timing is a caller-chosen
//! [`Pacer`] invoked between steps, so tests and headless runs pay no
//! wall-clock cost.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use gridstar_core::{Outcome, VizEvent};

use crate::search::{Search, Step};

/// The animation delay the visualizer uses by default.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// Pacer
// ---------------------------------------------------------------------------

/// Caller-controlled pacing policy, invoked once between successive steps.
pub trait Pacer {
    fn pause(&mut self);
}

/// No pacing at all. For tests and headless runs.
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&mut self) {}
}

/// Sleep a fixed duration between steps.
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl Pacer for FixedDelay {
    fn pause(&mut self) {
        thread::sleep(self.delay);
    }
}

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Only one search may be in flight at a time: a new search request must
/// cancel the previous run's context (or be rejected) before constructing
/// the next [`Search`].
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Drive loops
// ---------------------------------------------------------------------------

/// Drive `search` to completion, delivering every event to `sink` in
/// emission order and pausing after each step.
///
/// Returns `None` if `ctx` was cancelled before termination; the search
/// state is discarded and no terminal outcome is reported.
pub fn run<F>(mut search: Search, ctx: &Context, mut sink: F, pacer: &mut impl Pacer) -> Option<Outcome>
where
    F: FnMut(VizEvent),
{
    loop {
        if ctx.is_done() {
            log::debug!("search cancelled");
            return None;
        }
        match search.step() {
            Step::Expanded(events) => {
                for e in events {
                    sink(e);
                }
            }
            Step::PathCell(e) => sink(e),
            Step::Done(outcome) => {
                match &outcome {
                    Outcome::Found { path } => log::debug!("path found, {} cells", path.len()),
                    Outcome::NoPath => log::debug!("no path found"),
                }
                return Some(outcome);
            }
        }
        pacer.pause();
    }
}

/// Zero-delay convenience: drive `search` to completion and collect every
/// event alongside the outcome.
pub fn run_collect(mut search: Search) -> (Vec<VizEvent>, Outcome) {
    let mut events = Vec::new();
    loop {
        match search.step() {
            Step::Expanded(batch) => events.extend(batch),
            Step::PathCell(e) => events.push(e),
            Step::Done(outcome) => return (events, outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstar_core::{Board, Coord, Dims, Heuristic};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small_search() -> Search {
        let mut b = Board::new(Dims::new(4, 4));
        b.toggle(Coord::new(0, 0));
        b.toggle(Coord::new(3, 3));
        Search::with_rng(&b, Heuristic::Manhattan, StdRng::seed_from_u64(1)).unwrap()
    }

    #[test]
    fn run_reports_outcome_and_events_in_order() {
        let ctx = Context::new();
        let mut events = Vec::new();
        let outcome = run(small_search(), &ctx, |e| events.push(e), &mut NoDelay);

        let outcome = outcome.expect("not cancelled");
        assert!(outcome.found());
        let (collected, collected_outcome) = run_collect(small_search());
        assert_eq!(events, collected);
        assert_eq!(outcome, collected_outcome);
    }

    #[test]
    fn cancelled_before_start_runs_nothing() {
        let ctx = Context::new();
        ctx.cancel();
        let mut events = Vec::new();
        let outcome = run(small_search(), &ctx, |e| events.push(e), &mut NoDelay);
        assert_eq!(outcome, None);
        assert!(events.is_empty());
    }

    #[test]
    fn cancellation_mid_run_discards_the_outcome() {
        let ctx = Context::new();
        let cancel_from_sink = ctx.clone();
        let mut seen = 0u32;
        let outcome = run(
            small_search(),
            &ctx,
            |_| {
                seen += 1;
                if seen == 2 {
                    cancel_from_sink.cancel();
                }
            },
            &mut NoDelay,
        );
        assert_eq!(outcome, None);
        assert!(seen >= 2);
    }

    #[test]
    fn context_is_shared_between_clones() {
        let ctx = Context::new();
        let other = ctx.clone();
        assert!(!other.is_done());
        ctx.cancel();
        assert!(other.is_done());
    }
}
