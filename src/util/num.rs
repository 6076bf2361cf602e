use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::Position},
};

/// Magnitude from which integral values print in exponent form.
const EXPONENT_THRESHOLD: f64 = 1e16;

/// Converts a cell value used as a repeat count to an `i64`.
///
/// ## Errors
/// Returns `InvalidRepeatCount` for non-finite, out-of-range, or fractional
/// values.
///
/// ## Example
/// ```
/// use std::rc::Rc;
///
/// use maumivu::{error::RuntimeError, interpreter::lexer::Position, util::num::f64_to_i64_checked};
///
/// let position = Position { line:   2,
///                           column: 4,
///                           source: Rc::from("demo"), };
///
/// assert_eq!(f64_to_i64_checked(-3.0, &position).unwrap(), -3);
///
/// let err = f64_to_i64_checked(1.5, &position).unwrap_err();
/// assert!(matches!(err, RuntimeError::InvalidRepeatCount { value, .. } if value == 1.5));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64, position: &Position) -> EvalResult<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if !value.is_finite()
       || value < i64::MIN as f64
       || value >= i64::MAX as f64
       || value.fract() != 0.0
    {
        return Err(RuntimeError::InvalidRepeatCount { value,
                                                      position: position.clone() });
    }
    Ok(value as i64)
}

/// Converts an `i64` to the nearest `f64`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a pointer index to the nearest `f64`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Converts a cell value to the character with that code point, truncating
/// toward zero first.
///
/// ## Errors
/// Returns `InvalidCharacter` if the truncated value is not a Unicode scalar
/// value.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_char(value: f64, position: &Position) -> EvalResult<char> {
    let code = value.trunc();
    if code.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&code)
       && let Some(character) = char::from_u32(code as u32)
    {
        return Ok(character);
    }
    Err(RuntimeError::InvalidCharacter { value,
                                         position: position.clone() })
}

/// Renders a cell value for numeric output.
///
/// Integral values print with one decimal place, other values in their
/// shortest exact form, non-finite values as `inf`, `-inf` and `nan`.
///
/// ## Example
/// ```
/// use maumivu::util::num::format_number;
///
/// assert_eq!(format_number(3.0), "3.0");
/// assert_eq!(format_number(-0.5), "-0.5");
/// assert_eq!(format_number(1e20), "1e20");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
/// assert_eq!(format_number(f64::NAN), "nan");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "inf" } else { "-inf" });
    }
    if value.fract() == 0.0 && value.abs() < EXPONENT_THRESHOLD {
        return format!("{value:.1}");
    }
    format!("{value:?}")
}
