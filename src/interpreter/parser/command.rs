use std::iter::Peekable;

use crate::{
    ast::{BlockKind, Command, Instruction, Modifier},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::core::{MAX_NESTING_DEPTH, ParseResult, parse_block},
    },
};

/// Parses one command from the head of the stream.
///
/// Trivia before the command is skipped. Then:
/// - a modifier (`'`, `||`, `|N|`) becomes a [`Command::Prefixed`] wrapping
///   the next command, parsed recursively;
/// - an opener (`[`, `[@`, `(`) becomes a [`Command::Block`] whose body runs
///   up to the matching closer;
/// - any other token becomes a [`Command::Leaf`].
///
/// # Parameters
/// - `tokens`: Token stream positioned at or before the command.
/// - `end`: Position of the end of the source.
/// - `depth`: Current nesting depth.
///
/// # Errors
/// - `ExpectedCommand` if the stream ends, or a closer follows a modifier.
/// - `MismatchedCloser` if a block is closed by another block's closer.
/// - `UnclosedBlock` if the stream ends inside a block.
/// - `NestingTooDeep` past [`MAX_NESTING_DEPTH`].
pub fn parse_command<'a, I>(tokens: &mut Peekable<I>,
                            end: &Position,
                            depth: usize)
                            -> ParseResult<Command>
    where I: Iterator<Item = &'a Token>
{
    while tokens.next_if(|t| t.kind.is_trivia()).is_some() {}

    let Some(token) = tokens.next() else {
        return Err(ParseError::ExpectedCommand { position: end.clone() });
    };

    if depth >= MAX_NESTING_DEPTH {
        return Err(ParseError::NestingTooDeep { limit:    MAX_NESTING_DEPTH,
                                                position: token.position.clone(), });
    }

    if let Some(modifier) = Modifier::from_kind(token.kind) {
        let command = parse_command(tokens, end, depth + 1)?;
        return Ok(Command::Prefixed { modifier,
                                      token: token.clone(),
                                      command: Box::new(command) });
    }

    if let Some(kind) = BlockKind::from_kind(token.kind) {
        return parse_block_command(tokens, token, kind, end, depth);
    }

    match Instruction::from_kind(token.kind) {
        Some(instruction) => Ok(Command::Leaf { instruction,
                                                token: token.clone() }),
        None => Err(ParseError::ExpectedCommand { position: token.position.clone() }),
    }
}

/// Parses the body and closer of a block whose opener was just consumed.
fn parse_block_command<'a, I>(tokens: &mut Peekable<I>,
                              open: &Token,
                              kind: BlockKind,
                              end: &Position,
                              depth: usize)
                              -> ParseResult<Command>
    where I: Iterator<Item = &'a Token>
{
    let body = parse_block(tokens, end, depth + 1)?;

    match tokens.next() {
        Some(close) if close.kind == kind.closer() => Ok(Command::Block { kind,
                                                                          open: open.clone(),
                                                                          body: body.into(),
                                                                          close: close.clone() }),
        Some(close) => Err(ParseError::MismatchedCloser { expected: kind.closer_text(),
                                                          found:    close.lexeme.clone(),
                                                          position: close.position.clone(), }),
        None => Err(ParseError::UnclosedBlock { expected: kind.closer_text(),
                                                position: end.clone(), }),
    }
}
