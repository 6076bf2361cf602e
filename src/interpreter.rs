/// The console module connects the interpreter to input and output.
///
/// Input commands block on the console until it supplies a line or a
/// character; output commands hand it text. Any reader and writer pair can
/// serve as a console, which lets tests script input and capture output.
pub mod console;
/// The evaluator module executes the command tree.
///
/// The evaluator walks the parsed commands depth-first, left to right,
/// against the interpreter state: the global and local memory scopes, the
/// function table and its pointer. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Composes modifiers into a local flag and a repeat count.
/// - Executes loops, function definitions and calls, and break signals.
/// - Reports runtime errors such as forbidden repeat counts or bad input.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to one command, modifier, block delimiter or line end.
/// Comments and whitespace are dropped here.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source locations.
/// - Reports lexical errors for text no pattern accepts.
pub mod lexer;
/// The memory module defines the interpreter's storage.
///
/// Memory is made of strips: sequences that grow in both directions as a
/// pointer moves over them. Tapes hold numbers, the function table holds
/// function bodies.
pub mod memory;
/// The parser module builds the command tree from tokens.
///
/// The parser is a recursive descent over the token stream. It wraps
/// modifiers around the command that follows them and collects bracketed
/// sequences into blocks, checking that every block is closed by its own
/// closer.
pub mod parser;
