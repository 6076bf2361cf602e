use std::{fmt, rc::Rc};

use logos::Logos;

use crate::error::ParseError;

/// Represents the kind of a lexical token in the source input.
///
/// Every command of the language is a fixed character sequence, except the
/// constant repeat modifier `|N|` which carries its integer literal. Because
/// no fixed sequence is a prefix of another sequence of the same length, the
/// lexer's longest-match rule picks the same token as trying the patterns in
/// their documented precedence order.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    /// `'`
    #[token("'")]
    Local,
    /// `||`
    #[token("||")]
    ValueRepeat,
    /// Constant repeat modifier, such as `|3|` or `|-2|`.
    #[regex(r"\|-?[0-9]+\|", parse_repeat)]
    ConstantRepeat(i64),
    /// `!`
    #[token("!")]
    Increment,
    /// `~`
    #[token("~")]
    Decrement,
    /// `+`
    #[token("+")]
    Add,
    /// `-`
    #[token("-")]
    Subtract,
    /// `*`
    #[token("*")]
    Multiply,
    /// `/`
    #[token("/")]
    Divide,
    /// `` ` ``
    #[token("`")]
    Random,
    /// `>`
    #[token(">")]
    MoveRight,
    /// `<`
    #[token("<")]
    MoveLeft,
    /// `_`
    #[token("_")]
    Floor,
    /// `&`
    #[token("&")]
    Ceil,
    /// `^`
    #[token("^")]
    SwitchTrack,
    /// `[@`
    #[token("[@")]
    DoWhileStart,
    /// `@]`
    #[token("@]")]
    DoWhileEnd,
    /// `[`
    #[token("[")]
    WhileStart,
    /// `]`
    #[token("]")]
    WhileEnd,
    /// `{`
    #[token("{")]
    FunctionLeft,
    /// `}`
    #[token("}")]
    FunctionRight,
    /// `(`
    #[token("(")]
    FunctionStart,
    /// `)`
    #[token(")")]
    FunctionEnd,
    /// `%`
    #[token("%")]
    Call,
    /// `$.`
    #[token("$.")]
    InputNumber,
    /// `$,`
    #[token("$,")]
    InputCharacter,
    /// `\.`
    #[token("\\.")]
    OutputNumber,
    /// `\,`
    #[token("\\,")]
    OutputCharacter,
    /// `??`
    #[token("??")]
    SetToIndex,
    /// `?=`
    #[token("?=")]
    BreakIfEqual,
    /// `?<`
    #[token("?<")]
    BreakIfLess,
    /// `?>`
    #[token("?>")]
    BreakIfGreater,
    /// `;`
    #[token(";")]
    SwapScope,
    /// `:` followed by a line break, or `:` as the very last character.
    #[regex(r":\r?\n")]
    #[token(":", |lex| lex.remainder().is_empty())]
    EndOfLine,
    /// `"Quoted comments."` An unterminated comment runs to the end of the
    /// source.
    #[token("\"", skip_comment)]
    Comment,
    /// A single space, tab, vertical tab or form feed.
    #[regex(r"[ \t\x0B\x0C]", logos::skip)]
    Whitespace,
}

impl TokenKind {
    /// Returns `true` for tokens that close a block.
    #[must_use]
    pub const fn is_closer(self) -> bool {
        matches!(self, Self::WhileEnd | Self::DoWhileEnd | Self::FunctionEnd)
    }

    /// Returns `true` for tokens the parser steps over without producing a
    /// command.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::EndOfLine | Self::Comment | Self::Whitespace)
    }
}

/// Parses the integer literal between the pipes of a constant repeat.
///
/// # Returns
/// - `Some(i64)`: The repeat count.
/// - `None`: If the literal does not fit in an `i64`, which the lexer
///   reports as an unrecognized token.
fn parse_repeat(lex: &logos::Lexer<TokenKind>) -> Option<i64> {
    let slice = lex.slice();
    slice[1..slice.len() - 1].parse().ok()
}

/// Consumes a comment body up to and including the closing quote.
fn skip_comment(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    let rest = lex.remainder();
    let length = rest.find('"').map_or(rest.len(), |end| end + 1);
    lex.bump(length);
    logos::Skip
}

/// A location in a named source, used by every diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number.
    pub line:   usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// Name of the source the position points into.
    pub source: Rc<str>,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} in {}", self.line, self.column, self.source)
    }
}

/// A token together with its source text and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the token is.
    pub kind:     TokenKind,
    /// The exact source text that produced the token.
    pub lexeme:   String,
    /// Where the token starts.
    pub position: Position,
}

/// The full output of the tokenizer.
#[derive(Debug, Clone)]
pub struct Tokens {
    /// Tokens in source order. Comments and whitespace are already dropped.
    pub tokens: Vec<Token>,
    /// Position just past the last character, used for end-of-input
    /// diagnostics.
    pub end:    Position,
}

/// Maps byte offsets to line and column numbers.
struct LineIndex<'s> {
    source:      &'s str,
    line_starts: Vec<usize>,
    name:        Rc<str>,
}

impl<'s> LineIndex<'s> {
    fn new(source: &'s str, name: &str) -> Self {
        let line_starts = std::iter::once(0).chain(source.match_indices('\n').map(|(i, _)| i + 1))
                                            .collect();
        Self { source,
               line_starts,
               name: Rc::from(name) }
    }

    fn position(&self, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let start = self.line_starts[line - 1];
        let column = self.source[start..offset].chars().count() + 1;

        Position { line,
                   column,
                   source: Rc::clone(&self.name) }
    }
}

/// Converts source text into a token stream.
///
/// # Parameters
/// - `source`: The program text.
/// - `name`: The source name reported in diagnostics, usually a file path.
///
/// # Errors
/// Returns [`ParseError::UnrecognizedToken`] at the first character sequence
/// no pattern accepts, including a bare line break without a preceding `:`.
///
/// # Example
/// ```
/// use maumivu::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("|3|! \"add three\" \\.:", "demo").unwrap();
/// let kinds: Vec<_> = tokens.tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::ConstantRepeat(3),
///             TokenKind::Increment,
///             TokenKind::OutputNumber,
///             TokenKind::EndOfLine]);
/// ```
pub fn tokenize(source: &str, name: &str) -> Result<Tokens, ParseError> {
    let index = LineIndex::new(source, name);
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let position = index.position(lexer.span().start);
        let lexeme = lexer.slice().to_string();

        match kind {
            Ok(kind) => tokens.push(Token { kind,
                                            lexeme,
                                            position }),
            Err(()) => return Err(ParseError::UnrecognizedToken { lexeme, position }),
        }
    }

    Ok(Tokens { tokens,
                end: index.position(source.len()) })
}
