use crate::interpreter::lexer::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during tokenizing or parsing.
pub enum ParseError {
    /// No lexical pattern accepts the text at this position.
    UnrecognizedToken {
        /// The offending text.
        lexeme:   String,
        /// Where the text starts.
        position: Position,
    },
    /// A modifier or the end of the program left a command slot empty.
    ExpectedCommand {
        /// Where a command was expected.
        position: Position,
    },
    /// A block closer appeared outside of any block.
    UnexpectedCloser {
        /// The closer found.
        lexeme:   String,
        /// The source position of the closer.
        position: Position,
    },
    /// A block was closed by the closer of a different block kind.
    MismatchedCloser {
        /// The closer the opener requires.
        expected: &'static str,
        /// The closer found.
        found:    String,
        /// The source position of the closer.
        position: Position,
    },
    /// The source ended inside a block.
    UnclosedBlock {
        /// The closer the opener requires.
        expected: &'static str,
        /// The end of the source.
        position: Position,
    },
    /// Modifiers and blocks are nested deeper than the parser allows.
    NestingTooDeep {
        /// The deepest nesting level allowed.
        limit:    usize,
        /// The token that went past the limit.
        position: Position,
    },
}

impl ParseError {
    /// Gets the source position the error points at.
    #[must_use]
    pub const fn position(&self) -> &Position {
        match self {
            Self::UnrecognizedToken { position, .. }
            | Self::ExpectedCommand { position }
            | Self::UnexpectedCloser { position, .. }
            | Self::MismatchedCloser { position, .. }
            | Self::UnclosedBlock { position, .. }
            | Self::NestingTooDeep { position, .. } => position,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at {} - ", self.position())?;

        match self {
            Self::UnrecognizedToken { lexeme, .. } if lexeme == ":" => {
                write!(f, "':' must end a line")
            },
            Self::UnrecognizedToken { lexeme, .. } if matches!(lexeme.as_str(), "\n" | "\r") => {
                write!(f, "line break without a preceding ':'")
            },
            Self::UnrecognizedToken { lexeme, .. } => write!(f, "unrecognized {lexeme:?}"),
            Self::ExpectedCommand { .. } => write!(f, "expected a command"),
            Self::UnexpectedCloser { lexeme, .. } => write!(f, "unexpected '{lexeme}'"),
            Self::MismatchedCloser { expected, found, .. } => {
                write!(f, "expected '{expected}' but found '{found}'")
            },
            Self::UnclosedBlock { expected, .. } => write!(f, "expected '{expected}'"),
            Self::NestingTooDeep { limit, .. } => {
                write!(f, "commands are nested deeper than {limit} levels")
            },
        }
    }
}

impl std::error::Error for ParseError {}
