use tracing::warn;

use crate::{
    error::RuntimeError,
    interpreter::{
        console::Console,
        evaluator::{
            core::{Context, EvalResult},
            utils::{is_odd, require_single},
        },
        lexer::Position,
        memory::scope::Track,
    },
    util::num::usize_to_f64,
};

impl<C: Console> Context<C> {
    /// Moves the active tape pointer of the targeted scope by `repeat` cells,
    /// to the left when `left` is set. The tape grows with zero cells at
    /// whichever end the pointer passes.
    ///
    /// # Errors
    /// - `RepeatOverflow` if the distance cannot be negated.
    /// - `PointerOutOfRange` if the target index is not addressable.
    pub fn move_pointer(&mut self,
                        position: &Position,
                        local: bool,
                        repeat: i64,
                        left: bool)
                        -> EvalResult<()> {
        let delta = signed_distance(repeat, left, position)?;
        let growth = self.scope_mut(local, position)?
                         .tape_mut(Track::Active)
                         .shift(delta)
                         .ok_or_else(|| RuntimeError::PointerOutOfRange { position: position.clone() })?;

        if growth.front > 0 && self.settings().warn_left_growth {
            warn!(%position, cells = growth.front, local, "tape pointer moved left of the first cell");
        }
        Ok(())
    }

    /// Moves the function pointer by `repeat` slots, growing the table with
    /// empty slots.
    pub fn move_function_pointer(&mut self,
                                 position: &Position,
                                 repeat: i64,
                                 left: bool)
                                 -> EvalResult<()> {
        let delta = signed_distance(repeat, left, position)?;
        self.functions
            .shift(delta)
            .ok_or_else(|| RuntimeError::PointerOutOfRange { position: position.clone() })?;
        Ok(())
    }

    /// Swaps the active and inactive tracks of the targeted scope. An even
    /// repeat count leaves them untouched.
    pub fn switch_track(&mut self, position: &Position, local: bool, repeat: i64) -> EvalResult<()> {
        if is_odd(repeat) {
            self.scope_mut(local, position)?.switch_tracks();
        }
        Ok(())
    }

    /// Exchanges the active cell of the global scope with the active cell of
    /// the innermost local scope. An even repeat count is a no-op, even when
    /// the command is marked local.
    ///
    /// # Errors
    /// - `LocalScopeSwap` if the command is marked local and the repeat
    ///   count is odd.
    /// - `NoLocalScope` if no local scope exists.
    pub fn swap_scopes(&mut self, position: &Position, local: bool, repeat: i64) -> EvalResult<()> {
        if !is_odd(repeat) {
            return Ok(());
        }
        if local {
            return Err(RuntimeError::LocalScopeSwap { position: position.clone() });
        }

        let scope = self.locals
                        .last_mut()
                        .ok_or_else(|| RuntimeError::NoLocalScope { position: position.clone() })?;
        let local_tape = scope.tape_mut(Track::Active);
        let global_tape = self.global.tape_mut(Track::Active);

        let global_value = *global_tape.get();
        global_tape.set(*local_tape.get());
        local_tape.set(global_value);
        Ok(())
    }

    /// Stores the active pointer's index in the active cell.
    ///
    /// # Errors
    /// `CannotRepeat` unless `repeat` is 1.
    pub fn set_to_index(&mut self, position: &Position, local: bool, repeat: i64) -> EvalResult<()> {
        require_single(repeat, "'set to index'", position)?;

        let index = self.scope(local, position)?.tape(Track::Active).pointer();
        self.set_cell(usize_to_f64(index), local, Track::Active, position)
    }
}

fn signed_distance(repeat: i64, left: bool, position: &Position) -> EvalResult<i64> {
    if !left {
        return Ok(repeat);
    }
    repeat.checked_neg()
          .ok_or_else(|| RuntimeError::RepeatOverflow { position: position.clone() })
}
