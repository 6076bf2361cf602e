use std::iter::Peekable;

use crate::{
    ast::Command,
    error::ParseError,
    interpreter::{
        lexer::{Position, Token, Tokens},
        parser::command::parse_command,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting of modifiers and blocks the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 1000;

/// Parses a whole token stream into the program's top-level commands.
///
/// The program is an implicit block that only ends at the end of the stream,
/// so a closer found at top level is an error.
///
/// # Parameters
/// - `tokens`: The tokenizer output.
///
/// # Returns
/// The top-level command sequence.
///
/// # Errors
/// - `UnexpectedCloser` if `]`, `@]` or `)` appears outside a block.
/// - Propagates any error from parsing nested commands.
pub fn parse_program(tokens: &Tokens) -> ParseResult<Vec<Command>> {
    let mut iter = tokens.tokens.iter().peekable();
    let program = parse_block(&mut iter, &tokens.end, 0)?;

    match iter.next() {
        Some(token) => Err(ParseError::UnexpectedCloser { lexeme:   token.lexeme.clone(),
                                                          position: token.position.clone(), }),
        None => Ok(program),
    }
}

/// Parses commands until a block closer or the end of the stream.
///
/// The closer is left in the stream for the caller to check against its
/// opener. Trivia between commands is skipped.
///
/// Grammar: `block := command*`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first command of the block.
/// - `end`: Position of the end of the source.
/// - `depth`: Current nesting depth.
///
/// # Returns
/// The commands of the block in source order.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>,
                          end: &Position,
                          depth: usize)
                          -> ParseResult<Vec<Command>>
    where I: Iterator<Item = &'a Token>
{
    let mut commands = Vec::new();

    loop {
        while tokens.next_if(|t| t.kind.is_trivia()).is_some() {}

        match tokens.peek() {
            None => break,
            Some(token) if token.kind.is_closer() => break,
            Some(_) => commands.push(parse_command(tokens, end, depth)?),
        }
    }

    Ok(commands)
}
