/// Core parsing entry points.
///
/// Parses whole programs and bracketed command sequences.
pub mod core;

/// Single command parsing.
///
/// Builds leaf, prefixed and block nodes from the token at the head of the
/// stream.
pub mod command;
