use std::error::Error;
use std::fmt;

/// Failure to start a search. The only recognized error condition: absence
/// of a path is a normal [`Outcome`](gridstar_core::Outcome), not an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// Start or end cell (or both) is not assigned. No search is performed
    /// and no events are emitted; the user can correct the board and retry.
    MissingEndpoint,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoint => f.write_str("start and end cells must both be selected"),
        }
    }
}

impl Error for SearchError {}
