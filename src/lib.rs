//! # maumivu
//!
//! maumivu is a tree-walking interpreter for a small tape-based esoteric
//! language. Programs move pointers over two tracks of growable numeric
//! memory, compose repeat counts with prefix modifiers, loop, define and call
//! functions with private local memory, and talk to the console one number
//! or character at a time.
//!
//! ```
//! use maumivu::get_output;
//!
//! // Print 3, then the character 'A' (code 65) twice.
//! let output = get_output("!!!\\.>|65|!|2|\\,", "").unwrap();
//! assert_eq!(output, "3.0AA");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Command,
    error::{Error, ParseError},
    interpreter::{
        console::{Console, StreamConsole},
        evaluator::core::Context,
        lexer::tokenize,
        parser::core::parse_program,
    },
};

/// Defines the structure of parsed programs.
///
/// This module declares the `Command` tree built by the parser and walked by
/// the evaluator: leaves, modifier-prefixed commands, and bracketed blocks.
/// Every node keeps its source token for diagnostics.
///
/// # Responsibilities
/// - Defines the instruction, modifier and block kinds of the language.
/// - Renders trees back to source form or as an indented dump.
pub mod ast;
/// Provides unified error types for parsing and execution.
///
/// This module defines all errors that can be raised while tokenizing,
/// parsing or executing a program. Every error carries the source position
/// it refers to and displays as a one-line diagnostic.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Formats diagnostics as `<class> at <line>:<column> in <source> - <msg>`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, memory, the console seam and
/// evaluation to provide a complete runtime for programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, memory and evaluator.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numeric conversion and formatting.
pub mod util;

pub use crate::interpreter::{
    evaluator::core::{Settings, Signal},
    memory::scope::Track,
};

/// Source name used for programs that do not come from a file.
pub const INLINE_SOURCE_NAME: &str = "<input_main>";

/// Tokenizes and parses a program.
///
/// # Parameters
/// - `source`: The program text.
/// - `name`: The source name reported in diagnostics.
///
/// # Returns
/// The program's top-level commands.
pub fn parse_source(source: &str, name: &str) -> Result<Vec<Command>, ParseError> {
    let tokens = tokenize(source, name)?;
    parse_program(&tokens)
}

/// Parses and runs a program on an existing context, then flushes the
/// console.
///
/// # Errors
/// Returns the first lexical, parse or runtime error. Nothing runs if the
/// program does not parse.
pub fn run_source<C: Console>(context: &mut Context<C>,
                              source: &str,
                              name: &str)
                              -> Result<(), Error> {
    let program = parse_source(source, name)?;
    let result = context.run(&program);
    context.console_mut().flush()?;
    result.map_err(Error::from)
}

/// Runs a program against scripted input and returns everything it printed.
///
/// The program runs with default [`Settings`] and the source name
/// [`INLINE_SOURCE_NAME`].
///
/// # Errors
/// Returns the first lexical, parse or runtime error.
///
/// # Examples
/// ```
/// use maumivu::get_output;
///
/// // Read a number, double it, print it.
/// let output = get_output("$.^!^*|2|*\\.", "21\n").unwrap();
/// assert_eq!(output, "42.0");
///
/// // Loops may not be repeated.
/// assert!(get_output("|2|[~]", "").is_err());
/// ```
pub fn get_output(source: &str, input: &str) -> Result<String, Error> {
    let mut context = Context::new(StreamConsole::new(input.as_bytes(), Vec::new()));
    run_source(&mut context, source, INLINE_SOURCE_NAME)?;

    let output = context.into_console().into_writer();
    Ok(String::from_utf8_lossy(&output).into_owned())
}
