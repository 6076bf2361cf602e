use std::{fmt, rc::Rc};

use crate::interpreter::lexer::{Position, Token, TokenKind};

/// A terminal command: one that wraps nothing and acts on memory, the
/// function table, or the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `!` adds the repeat count to the active cell.
    Increment,
    /// `~` subtracts the repeat count from the active cell.
    Decrement,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `` ` `` stores a random number in `[0, 1)`.
    Random,
    /// `>`
    MoveRight,
    /// `<`
    MoveLeft,
    /// `_`
    Floor,
    /// `&`
    Ceil,
    /// `^` swaps the active and inactive tracks.
    SwitchTrack,
    /// `{` moves the function pointer left.
    FunctionLeft,
    /// `}` moves the function pointer right.
    FunctionRight,
    /// `%` calls the function under the function pointer.
    Call,
    /// `$.`
    InputNumber,
    /// `$,`
    InputCharacter,
    /// `\.`
    OutputNumber,
    /// `\,`
    OutputCharacter,
    /// `??` stores the pointer index in the active cell.
    SetToIndex,
    /// `?=`
    BreakIfEqual,
    /// `?<`
    BreakIfLess,
    /// `?>`
    BreakIfGreater,
    /// `;` swaps the active cells of the global and local scopes.
    SwapScope,
}

impl Instruction {
    /// Maps a token kind to the instruction it denotes.
    ///
    /// Returns `None` for modifiers, block delimiters and trivia.
    #[must_use]
    pub const fn from_kind(kind: TokenKind) -> Option<Self> {
        let instruction = match kind {
            TokenKind::Increment => Self::Increment,
            TokenKind::Decrement => Self::Decrement,
            TokenKind::Add => Self::Add,
            TokenKind::Subtract => Self::Subtract,
            TokenKind::Multiply => Self::Multiply,
            TokenKind::Divide => Self::Divide,
            TokenKind::Random => Self::Random,
            TokenKind::MoveRight => Self::MoveRight,
            TokenKind::MoveLeft => Self::MoveLeft,
            TokenKind::Floor => Self::Floor,
            TokenKind::Ceil => Self::Ceil,
            TokenKind::SwitchTrack => Self::SwitchTrack,
            TokenKind::FunctionLeft => Self::FunctionLeft,
            TokenKind::FunctionRight => Self::FunctionRight,
            TokenKind::Call => Self::Call,
            TokenKind::InputNumber => Self::InputNumber,
            TokenKind::InputCharacter => Self::InputCharacter,
            TokenKind::OutputNumber => Self::OutputNumber,
            TokenKind::OutputCharacter => Self::OutputCharacter,
            TokenKind::SetToIndex => Self::SetToIndex,
            TokenKind::BreakIfEqual => Self::BreakIfEqual,
            TokenKind::BreakIfLess => Self::BreakIfLess,
            TokenKind::BreakIfGreater => Self::BreakIfGreater,
            TokenKind::SwapScope => Self::SwapScope,
            _ => return None,
        };
        Some(instruction)
    }
}

/// A prefix that changes how the command it wraps executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `'` targets the innermost local scope instead of the global one.
    Local,
    /// `||` multiplies the repeat count by the value of the targeted cell.
    ValueRepeat,
    /// `|N|` multiplies the repeat count by `N`.
    ConstantRepeat(i64),
}

impl Modifier {
    /// Maps a token kind to the modifier it denotes, if any.
    #[must_use]
    pub const fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Local => Some(Self::Local),
            TokenKind::ValueRepeat => Some(Self::ValueRepeat),
            TokenKind::ConstantRepeat(n) => Some(Self::ConstantRepeat(n)),
            _ => None,
        }
    }
}

/// The three bracketed constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `[ ... ]`
    While,
    /// `[@ ... @]`
    DoWhile,
    /// `( ... )`
    Function,
}

impl BlockKind {
    /// Maps an opening token kind to its block kind, if any.
    #[must_use]
    pub const fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::WhileStart => Some(Self::While),
            TokenKind::DoWhileStart => Some(Self::DoWhile),
            TokenKind::FunctionStart => Some(Self::Function),
            _ => None,
        }
    }

    /// The token kind that must close this block.
    #[must_use]
    pub const fn closer(self) -> TokenKind {
        match self {
            Self::While => TokenKind::WhileEnd,
            Self::DoWhile => TokenKind::DoWhileEnd,
            Self::Function => TokenKind::FunctionEnd,
        }
    }

    /// Source text of the closer, for diagnostics.
    #[must_use]
    pub const fn closer_text(self) -> &'static str {
        match self {
            Self::While => "]",
            Self::DoWhile => "@]",
            Self::Function => ")",
        }
    }
}

/// A node of the command tree.
///
/// The parser produces a sequence of these for the whole program. Function
/// bodies are reference counted so that defining a function stores a handle
/// to the parsed subtree instead of copying it.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A command with no children, such as `!` or `$.`.
    Leaf {
        /// What the command does.
        instruction: Instruction,
        /// The source token.
        token:       Token,
    },
    /// A modifier wrapping exactly one command, such as `'!` or `|3|>`.
    Prefixed {
        /// The modifier.
        modifier: Modifier,
        /// The modifier's token.
        token:    Token,
        /// The wrapped command, possibly prefixed itself.
        command:  Box<Self>,
    },
    /// A bracketed sequence of commands.
    Block {
        /// Which construct the brackets form.
        kind:  BlockKind,
        /// The opening token.
        open:  Token,
        /// The commands between the brackets.
        body:  Rc<[Self]>,
        /// The closing token.
        close: Token,
    },
}

impl Command {
    /// Gets the token that starts this command.
    #[must_use]
    pub const fn token(&self) -> &Token {
        match self {
            Self::Leaf { token, .. } | Self::Prefixed { token, .. } => token,
            Self::Block { open, .. } => open,
        }
    }

    /// Gets the source position of this command.
    ///
    /// ## Example
    /// ```
    /// use maumivu::parse_source;
    ///
    /// let program = parse_source("! >:\n  \\.:", "demo").unwrap();
    ///
    /// assert_eq!(program[2].position().line, 2);
    /// assert_eq!(program[2].position().column, 3);
    /// ```
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.token().position
    }
}

impl fmt::Display for Command {
    /// Writes the command back in source form, without trivia.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf { token, .. } => f.write_str(&token.lexeme),
            Self::Prefixed { token, command, .. } => write!(f, "{}{command}", token.lexeme),
            Self::Block { open, body, close, .. } => {
                f.write_str(&open.lexeme)?;
                for command in body.iter() {
                    write!(f, "{command}")?;
                }
                f.write_str(&close.lexeme)
            },
        }
    }
}

/// Renders a command tree, one node per line, indented by nesting depth.
///
/// Leaves and modifiers show their lexeme and source position; blocks show
/// their opener, their body one level deeper, and their closer.
///
/// # Example
/// ```
/// use maumivu::{ast::dump_tree, parse_source};
///
/// let program = parse_source("'[~]", "demo").unwrap();
///
/// assert_eq!(dump_tree(&program),
///            "' @1:1\n  [ @1:2\n    ~ @1:3\n  ]\n");
/// ```
#[must_use]
pub fn dump_tree(commands: &[Command]) -> String {
    let mut out = String::new();
    for command in commands {
        write_node(&mut out, command, 0);
    }
    out
}

fn write_node(out: &mut String, command: &Command, depth: usize) {
    let indent = "  ".repeat(depth);
    let token = command.token();
    out.push_str(&format!("{indent}{} @{}:{}\n",
                          token.lexeme, token.position.line, token.position.column));

    match command {
        Command::Leaf { .. } => {},
        Command::Prefixed { command, .. } => write_node(out, command, depth + 1),
        Command::Block { body, close, .. } => {
            for child in body.iter() {
                write_node(out, child, depth + 1);
            }
            out.push_str(&format!("{indent}{}\n", close.lexeme));
        },
    }
}
