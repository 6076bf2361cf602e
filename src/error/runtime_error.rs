use crate::interpreter::lexer::Position;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while executing a program.
pub enum RuntimeError {
    /// A command that only runs once was given a repeat count other than 1.
    CannotRepeat {
        /// What was repeated, e.g. `loops`.
        what:     &'static str,
        /// The composed repeat count.
        repeat:   i64,
        /// The source position of the command.
        position: Position,
    },
    /// A command was repeated a negative number of times.
    NegativeRepeat {
        /// What was repeated, e.g. `function calls`.
        what:     &'static str,
        /// The composed repeat count.
        repeat:   i64,
        /// The source position of the command.
        position: Position,
    },
    /// The local-global swap was marked local.
    LocalScopeSwap {
        /// The source position of the swap.
        position: Position,
    },
    /// A cell used as a repeat count was not a finite integer.
    InvalidRepeatCount {
        /// The cell value.
        value:    f64,
        /// The source position of the modifier.
        position: Position,
    },
    /// Composing nested repeat modifiers overflowed.
    RepeatOverflow {
        /// The source position of the modifier.
        position: Position,
    },
    /// A pointer move went beyond what the machine can address or allocate.
    PointerOutOfRange {
        /// The source position of the move.
        position: Position,
    },
    /// Numeric input could not be parsed.
    InvalidNumber {
        /// The line that was read.
        input:    String,
        /// The source position of the input command.
        position: Position,
    },
    /// Input ran out while a read was pending.
    EndOfInput {
        /// The source position of the input command.
        position: Position,
    },
    /// A cell does not hold a printable character code.
    InvalidCharacter {
        /// The cell value.
        value:    f64,
        /// The source position of the output command.
        position: Position,
    },
    /// Local memory was addressed while no local scope exists.
    ///
    /// `Context::run` always provides a program-level local scope, so only
    /// callers driving `Context::exec_command` directly can see this.
    NoLocalScope {
        /// The source position of the command.
        position: Position,
    },
    /// Blocks and calls are nested deeper than the configured limit.
    DepthExceeded {
        /// The configured limit.
        limit:    usize,
        /// The source position of the command that went past it.
        position: Position,
    },
    /// Reading input or writing output failed.
    Io {
        /// The underlying error message.
        message:  String,
        /// The source position of the I/O command.
        position: Position,
    },
}

impl RuntimeError {
    /// Gets the source position the error points at.
    #[must_use]
    pub const fn position(&self) -> &Position {
        match self {
            Self::CannotRepeat { position, .. }
            | Self::NegativeRepeat { position, .. }
            | Self::LocalScopeSwap { position }
            | Self::InvalidRepeatCount { position, .. }
            | Self::RepeatOverflow { position }
            | Self::PointerOutOfRange { position }
            | Self::InvalidNumber { position, .. }
            | Self::EndOfInput { position }
            | Self::InvalidCharacter { position, .. }
            | Self::NoLocalScope { position }
            | Self::DepthExceeded { position, .. }
            | Self::Io { position, .. } => position,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Runtime error at {} - ", self.position())?;

        match self {
            Self::CannotRepeat { what, repeat, .. } => {
                write!(f, "can't repeat {what} (repeat count is {repeat})")
            },
            Self::NegativeRepeat { what, repeat, .. } => {
                write!(f, "can't repeat {what} negative number of times ({repeat})")
            },
            Self::LocalScopeSwap { .. } => write!(f, "local-global value switch can't be local"),
            Self::InvalidRepeatCount { value, .. } => write!(f, "invalid repeat count {value}"),
            Self::RepeatOverflow { .. } => write!(f, "repeat count overflow"),
            Self::PointerOutOfRange { .. } => write!(f, "pointer moved out of addressable range"),
            Self::InvalidNumber { input, .. } => write!(f, "invalid number input {input:?}"),
            Self::EndOfInput { .. } => write!(f, "unexpected end of input"),
            Self::InvalidCharacter { value, .. } => write!(f, "invalid character code {value}"),
            Self::NoLocalScope { .. } => write!(f, "no local memory outside of a call"),
            Self::DepthExceeded { limit, .. } => {
                write!(f, "maximum nesting depth exceeded ({limit})")
            },
            Self::Io { message, .. } => write!(f, "I/O failure: {message}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
