use std::{cmp::Ordering, rc::Rc};

use tracing::debug;

use crate::{
    ast::Command,
    interpreter::{
        console::Console,
        evaluator::{
            core::{Context, EvalResult, Function, Signal},
            utils::{require_non_negative, require_single},
        },
        lexer::Position,
        memory::scope::{Scope, Track},
    },
};

impl<C: Console> Context<C> {
    /// Executes a `[ ... ]` loop.
    ///
    /// The targeted scope's active cell is checked before every iteration and
    /// the loop ends when it is zero. A break from the body ends the loop
    /// without checking the cell again.
    ///
    /// # Errors
    /// - `CannotRepeat` unless `repeat` is 1.
    /// - Propagates errors from the body.
    pub fn exec_while(&mut self,
                      body: &[Command],
                      position: &Position,
                      local: bool,
                      repeat: i64)
                      -> EvalResult<Signal> {
        require_single(repeat, "loops", position)?;

        while self.cell(local, Track::Active, position)? != 0.0 {
            if self.exec_block(body, position)? == Signal::Break {
                break;
            }
        }
        Ok(Signal::Completed)
    }

    /// Executes a `[@ ... @]` loop: the body once, then as `[ ... ]`.
    ///
    /// # Errors
    /// - `CannotRepeat` unless `repeat` is 1.
    /// - Propagates errors from the body.
    pub fn exec_do_while(&mut self,
                         body: &[Command],
                         position: &Position,
                         local: bool,
                         repeat: i64)
                         -> EvalResult<Signal> {
        require_single(repeat, "loops", position)?;

        loop {
            if self.exec_block(body, position)? == Signal::Break {
                break;
            }
            if self.cell(local, Track::Active, position)? == 0.0 {
                break;
            }
        }
        Ok(Signal::Completed)
    }

    /// Stores a function body in the slot under the function pointer,
    /// replacing whatever was there.
    ///
    /// # Errors
    /// `CannotRepeat` unless `repeat` is 1.
    pub fn define_function(&mut self,
                           body: &Function,
                           position: &Position,
                           repeat: i64)
                           -> EvalResult<()> {
        require_single(repeat, "function definition", position)?;

        debug!(slot = self.functions.pointer(), %position, "function defined");
        self.functions.set(Some(Rc::clone(body)));
        Ok(())
    }

    /// Calls the function under the function pointer `repeat` times.
    ///
    /// Every invocation gets a fresh local scope that is discarded when it
    /// returns, so nothing leaks from one invocation into the next. Calling
    /// an empty slot does nothing. A break inside the body ends that
    /// invocation only.
    ///
    /// # Errors
    /// - `NegativeRepeat` if `repeat` is negative; the body never runs.
    /// - Propagates errors from the body.
    pub fn call_function(&mut self, position: &Position, repeat: i64) -> EvalResult<()> {
        let count = require_non_negative(repeat, "function calls", position)?;

        let Some(body) = self.functions.get().clone() else {
            debug!(slot = self.functions.pointer(), %position, "called an empty function slot");
            return Ok(());
        };

        debug!(slot = self.functions.pointer(), count, %position, "function called");
        for _ in 0..count {
            self.locals.push(Scope::new());
            let result = self.exec_block(&body, position);
            self.locals.pop();
            result?;
        }
        Ok(())
    }

    /// Compares the active cell with the inactive cell and requests a break
    /// when the comparison yields `expected`.
    ///
    /// Comparisons involving NaN never break.
    ///
    /// # Errors
    /// `CannotRepeat` unless `repeat` is 1.
    pub fn conditional_break(&mut self,
                             expected: Ordering,
                             position: &Position,
                             local: bool,
                             repeat: i64)
                             -> EvalResult<Signal> {
        require_single(repeat, "conditional breaks", position)?;

        let active = self.cell(local, Track::Active, position)?;
        let inactive = self.cell(local, Track::Inactive, position)?;

        if active.partial_cmp(&inactive) == Some(expected) {
            Ok(Signal::Break)
        } else {
            Ok(Signal::Completed)
        }
    }
}
