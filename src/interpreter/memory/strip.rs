use std::{collections::VecDeque, fmt};

/// A growable sequence of cells addressed by a movable pointer.
///
/// The strip is conceptually infinite in both directions. Physically it
/// holds only the cells the pointer has visited; moving past either end
/// appends default cells there. Growth at the front shifts every index, so
/// after a leftward growth the pointer is `0`.
///
/// The pointer always addresses an existing cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Strip<T> {
    cells:   VecDeque<T>,
    pointer: usize,
}

/// Describes how a pointer move changed a strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Growth {
    /// Cells inserted before the old first cell.
    pub front: usize,
    /// Cells appended after the old last cell.
    pub back:  usize,
}

impl<T: Clone + Default> Strip<T> {
    /// Creates a strip holding a single default cell under the pointer.
    #[must_use]
    pub fn new() -> Self {
        Self { cells:   VecDeque::from([T::default()]),
               pointer: 0, }
    }

    /// Moves the pointer by `delta` cells, growing the strip as needed.
    ///
    /// # Returns
    /// - `Some(Growth)`: How many cells were added at each end.
    /// - `None`: If the target index cannot be represented on this machine,
    ///   or the cells needed to reach it cannot be allocated. The strip is
    ///   left unchanged.
    ///
    /// # Example
    /// ```
    /// use maumivu::interpreter::memory::strip::Strip;
    ///
    /// let mut tape: Strip<f64> = Strip::new();
    /// tape.set(5.0);
    ///
    /// let growth = tape.shift(-2).unwrap();
    /// assert_eq!((growth.front, tape.pointer(), tape.len()), (2, 0, 3));
    ///
    /// tape.shift(2).unwrap();
    /// assert_eq!((tape.pointer(), *tape.get()), (2, 5.0));
    /// ```
    pub fn shift(&mut self, delta: i64) -> Option<Growth> {
        let target = i128::try_from(self.pointer).ok()? + i128::from(delta);

        if target < 0 {
            let front = usize::try_from(-target).ok()?;
            self.cells.try_reserve(front).ok()?;
            for _ in 0..front {
                self.cells.push_front(T::default());
            }
            self.pointer = 0;
            return Some(Growth { front,
                                 back: 0 });
        }

        let target = usize::try_from(target).ok()?;
        let needed = target.checked_add(1)?;
        let back = needed.saturating_sub(self.cells.len());
        if back > 0 {
            self.cells.try_reserve(back).ok()?;
            self.cells.resize(needed, T::default());
        }
        self.pointer = target;

        Some(Growth { front: 0, back })
    }
}

impl<T: Clone + Default> Default for Strip<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Strip<T> {
    /// Gets the cell under the pointer.
    #[must_use]
    pub fn get(&self) -> &T {
        &self.cells[self.pointer]
    }

    /// Replaces the cell under the pointer.
    pub fn set(&mut self, value: T) {
        self.cells[self.pointer] = value;
    }

    /// The physical index of the pointer.
    #[must_use]
    pub const fn pointer(&self) -> usize {
        self.pointer
    }

    /// Number of cells currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A strip is never empty; provided for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates the cells from the front.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }
}

impl<T: fmt::Debug> fmt::Display for Strip<T> {
    /// Writes the cells in brackets, with the pointed cell marked by `*`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if i == self.pointer {
                write!(f, "*{cell:?}")?;
            } else {
                write!(f, "{cell:?}")?;
            }
        }
        f.write_str("]")
    }
}
