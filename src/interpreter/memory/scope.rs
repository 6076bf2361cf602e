use std::fmt;

use crate::interpreter::memory::strip::Strip;

/// A tape of numeric cells.
pub type Tape = Strip<f64>;

/// Selects one of the two tracks of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    /// Track 0: read and written by most commands.
    Active,
    /// Track 1: the second operand of arithmetic and comparisons.
    Inactive,
}

/// One memory scope: an active and an inactive tape, each with its own
/// pointer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    active:   Tape,
    inactive: Tape,
}

impl Scope {
    /// Creates a scope whose tapes each hold one zero cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the selected tape.
    #[must_use]
    pub const fn tape(&self, track: Track) -> &Tape {
        match track {
            Track::Active => &self.active,
            Track::Inactive => &self.inactive,
        }
    }

    /// Gets the selected tape mutably.
    pub fn tape_mut(&mut self, track: Track) -> &mut Tape {
        match track {
            Track::Active => &mut self.active,
            Track::Inactive => &mut self.inactive,
        }
    }

    /// Reads the cell under the selected tape's pointer.
    #[must_use]
    pub fn cell(&self, track: Track) -> f64 {
        *self.tape(track).get()
    }

    /// Swaps the active and inactive tapes, pointers included.
    pub fn switch_tracks(&mut self) {
        std::mem::swap(&mut self.active, &mut self.inactive);
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "active {} inactive {}", self.active, self.inactive)
    }
}
