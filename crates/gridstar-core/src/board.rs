//! The [`Board`] — canonical source of truth for cell roles and adjacency.
//!
//! Rendering is a projection of this model; nothing outside the board holds
//! role state. The only mutators are [`Board::toggle`] and the bulk reset
//! operations, which together maintain the invariants: at most one start
//! cell, at most one end cell, and a blocked set disjoint from both.

use crate::geom::{Coord, Dims};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The role a cell currently holds. Exactly one per cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Free,
    Start,
    End,
    Blocked,
}

impl Role {
    /// Whether a search may enter a cell with this role.
    #[inline]
    pub fn is_passable(self) -> bool {
        self != Role::Blocked
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A fixed-size grid of cell roles with unique start/end references.
#[derive(Clone, Debug)]
pub struct Board {
    dims: Dims,
    roles: Vec<Role>,
    start: Option<Coord>,
    end: Option<Coord>,
}

impl Board {
    /// Create a board with every cell free and no endpoints assigned.
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            roles: vec![Role::Free; dims.len()],
            start: None,
            end: None,
        }
    }

    /// The board dimensions.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// The designated start cell, if any.
    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    /// The designated end cell, if any.
    #[inline]
    pub fn end(&self) -> Option<Coord> {
        self.end
    }

    /// The role of the cell at `c`. Out-of-bounds reads as [`Role::Blocked`]
    /// (never traversable).
    pub fn role(&self, c: Coord) -> Role {
        match self.dims.index(c) {
            Some(i) => self.roles[i],
            None => Role::Blocked,
        }
    }

    /// Cycle the role of the cell at `c`.
    ///
    /// A start cell clears to free (releasing the start reference), an end
    /// cell clears to free (releasing the end reference), a blocked cell
    /// clears to free. A free cell becomes the start if none is assigned,
    /// else the end if none is assigned, else blocked. Exactly one cell's
    /// role changes; out-of-bounds toggles are no-ops. There are no error
    /// conditions.
    pub fn toggle(&mut self, c: Coord) {
        let Some(i) = self.dims.index(c) else {
            return;
        };
        match self.roles[i] {
            Role::Start => {
                self.roles[i] = Role::Free;
                self.start = None;
            }
            Role::End => {
                self.roles[i] = Role::Free;
                self.end = None;
            }
            Role::Blocked => {
                self.roles[i] = Role::Free;
            }
            Role::Free => {
                if self.start.is_none() {
                    self.roles[i] = Role::Start;
                    self.start = Some(c);
                } else if self.end.is_none() {
                    self.roles[i] = Role::End;
                    self.end = Some(c);
                } else {
                    self.roles[i] = Role::Blocked;
                }
            }
        }
    }

    /// Append the orthogonal neighbours of `c` that are in bounds and not
    /// blocked, in the fixed up/down/left/right order. The caller clears
    /// `buf` beforehand.
    pub fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        for n in c.neighbors_4() {
            // Out-of-bounds reads as blocked, so one check covers both.
            if self.role(n).is_passable() {
                buf.push(n);
            }
        }
    }

    /// Reset every blocked cell to free. Endpoints are preserved.
    pub fn clear_walls(&mut self) {
        for r in &mut self.roles {
            if *r == Role::Blocked {
                *r = Role::Free;
            }
        }
    }

    /// Reset the whole board: all cells free, both endpoint references
    /// cleared.
    pub fn reset(&mut self) {
        self.roles.fill(Role::Free);
        self.start = None;
        self.end = None;
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.roles.iter().filter(|r| **r == Role::Blocked).count()
    }
}
