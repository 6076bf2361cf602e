/// Numeric conversion and formatting helpers.
///
/// Cells are `f64`, while repeat counts and pointer indexes are integers.
/// These helpers convert between them, reporting a runtime error wherever a
/// conversion would lose information, and render cell values as text.
pub mod num;
