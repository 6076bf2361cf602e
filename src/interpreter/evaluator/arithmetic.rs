use rand::Rng;

use crate::{
    interpreter::{
        console::Console,
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        memory::scope::Track,
    },
    util::num::i64_to_f64,
};

/// Binary operators combining the active cell with the inactive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl Operator {
    /// Applies the operator. Division follows IEEE 754, so dividing by zero
    /// yields an infinity or NaN.
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
        }
    }
}

impl<C: Console> Context<C> {
    /// Adds the repeat count to the active cell, or subtracts it when
    /// `negate` is set.
    pub fn add_repeat(&mut self,
                      position: &Position,
                      local: bool,
                      repeat: i64,
                      negate: bool)
                      -> EvalResult<()> {
        let amount = if negate { -i64_to_f64(repeat) } else { i64_to_f64(repeat) };
        let value = self.cell(local, Track::Active, position)? + amount;
        self.set_cell(value, local, Track::Active, position)
    }

    /// Combines the active cell with the inactive cell scaled by the repeat
    /// count: `active = active <op> (inactive * repeat)`.
    ///
    /// # Example
    /// ```
    /// use maumivu::get_output;
    ///
    /// // active = 6, inactive = 3, then active = 6 / (3 * 2)
    /// let output = get_output("|3|!^|6|!|2|/\\.", "").unwrap();
    /// assert_eq!(output, "1.0");
    /// ```
    pub fn combine(&mut self,
                   operator: Operator,
                   position: &Position,
                   local: bool,
                   repeat: i64)
                   -> EvalResult<()> {
        let active = self.cell(local, Track::Active, position)?;
        let inactive = self.cell(local, Track::Inactive, position)?;
        let value = operator.apply(active, inactive * i64_to_f64(repeat));
        self.set_cell(value, local, Track::Active, position)
    }

    /// Stores a uniformly distributed number in `[0, 1)`. The repeat count is
    /// ignored.
    pub fn randomize(&mut self, position: &Position, local: bool) -> EvalResult<()> {
        let value = self.rng.gen_range(0.0..1.0);
        self.set_cell(value, local, Track::Active, position)
    }

    /// Rounds the active cell in place with `rounding`, e.g. `f64::floor`.
    pub fn round(&mut self,
                 position: &Position,
                 local: bool,
                 rounding: fn(f64) -> f64)
                 -> EvalResult<()> {
        let value = rounding(self.cell(local, Track::Active, position)?);
        self.set_cell(value, local, Track::Active, position)
    }
}
