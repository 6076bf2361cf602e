use std::fmt;

/// Lexical and parse errors.
///
/// Defines all error types that can occur while tokenizing or parsing source
/// code: unrecognized character sequences, mismatched or missing block
/// closers, and modifiers with nothing left to wrap.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing a command
/// tree, such as forbidden repeat counts, malformed input, or exceeding the
/// recursion bound.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error that can end a run.
///
/// Parse and runtime errors carry a source position and display as a single
/// diagnostic line of the form
/// `<class> at <line>:<column> in <source> - <message>`.
#[derive(Debug)]
pub enum Error {
    /// The program could not be tokenized or parsed.
    Parse(ParseError),
    /// The program failed while executing.
    Runtime(RuntimeError),
    /// Output could not be flushed after the program finished.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => e.fmt(f),
            Self::Runtime(e) => e.fmt(f),
            Self::Io(e) => write!(f, "I/O error - {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}
