use crate::{error::RuntimeError, interpreter::{evaluator::core::EvalResult, lexer::Position}};

/// Multiplies the incoming repeat count by a modifier's count.
///
/// # Errors
/// Returns `RepeatOverflow` if the product does not fit in an `i64`.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use maumivu::interpreter::{evaluator::utils::compose_repeat, lexer::Position};
///
/// let position = Position { line:   1,
///                           column: 1,
///                           source: Rc::from("demo"), };
///
/// assert_eq!(compose_repeat(3, -2, &position).unwrap(), -6);
/// assert!(compose_repeat(i64::MAX, 2, &position).is_err());
/// ```
pub fn compose_repeat(repeat: i64, count: i64, position: &Position) -> EvalResult<i64> {
    repeat.checked_mul(count)
          .ok_or_else(|| RuntimeError::RepeatOverflow { position: position.clone() })
}

/// Rejects any repeat count other than 1.
///
/// # Parameters
/// - `repeat`: The composed repeat count.
/// - `what`: Plural description of the command for the diagnostic.
/// - `position`: The command's source position.
pub fn require_single(repeat: i64, what: &'static str, position: &Position) -> EvalResult<()> {
    if repeat == 1 {
        return Ok(());
    }
    Err(RuntimeError::CannotRepeat { what,
                                     repeat,
                                     position: position.clone() })
}

/// Rejects negative repeat counts.
///
/// # Returns
/// The repeat count as an unsigned iteration count.
pub fn require_non_negative(repeat: i64,
                            what: &'static str,
                            position: &Position)
                            -> EvalResult<u64> {
    u64::try_from(repeat).map_err(|_| RuntimeError::NegativeRepeat { what,
                                                                     repeat,
                                                                     position: position.clone() })
}

/// Returns `true` if applying a self-inverse command `repeat` times changes
/// anything.
#[must_use]
pub const fn is_odd(repeat: i64) -> bool {
    repeat % 2 != 0
}
