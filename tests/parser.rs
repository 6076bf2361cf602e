use maumivu::{
    ast::{BlockKind, Command, Instruction, Modifier, dump_tree},
    error::ParseError,
    interpreter::lexer::{TokenKind, tokenize},
    parse_source,
};

fn kinds(src: &str) -> Vec<TokenKind> {
    tokenize(src, "test").unwrap().tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn two_character_tokens_win_over_their_prefixes() {
    assert_eq!(kinds("[@!@]"),
               [TokenKind::DoWhileStart, TokenKind::Increment, TokenKind::DoWhileEnd]);
    assert_eq!(kinds("[!]"), [TokenKind::WhileStart, TokenKind::Increment, TokenKind::WhileEnd]);
    assert_eq!(kinds("??"), [TokenKind::SetToIndex]);
    assert_eq!(kinds("$.$,\\.\\,"),
               [TokenKind::InputNumber,
                TokenKind::InputCharacter,
                TokenKind::OutputNumber,
                TokenKind::OutputCharacter]);
}

#[test]
fn repeat_modifiers() {
    assert_eq!(kinds("||!"), [TokenKind::ValueRepeat, TokenKind::Increment]);
    assert_eq!(kinds("|-3|>"), [TokenKind::ConstantRepeat(-3), TokenKind::MoveRight]);
    assert_eq!(kinds("|0||12|"), [TokenKind::ConstantRepeat(0), TokenKind::ConstantRepeat(12)]);
}

#[test]
fn repeat_literal_out_of_range_is_rejected() {
    let err = tokenize("|99999999999999999999|!", "test").unwrap_err();
    assert!(matches!(err, ParseError::UnrecognizedToken { .. }));
}

#[test]
fn comments_and_spaces_produce_no_tokens() {
    assert!(kinds("\"nothing to see\"").is_empty());
    assert!(kinds(" \t ").is_empty());
    assert!(kinds("\"never closed !").is_empty());
}

#[test]
fn positions_are_line_and_character_column() {
    let tokens = tokenize("! ~:\n  \\.", "file.au").unwrap();
    let places: Vec<_> =
        tokens.tokens.iter().map(|t| (t.position.line, t.position.column)).collect();

    assert_eq!(places, [(1, 1), (1, 3), (1, 4), (2, 3)]);
    assert_eq!(&*tokens.tokens[0].position.source, "file.au");
    assert_eq!((tokens.end.line, tokens.end.column), (2, 5));
}

#[test]
fn columns_count_characters_not_bytes() {
    let tokens = tokenize("\"é\"!", "test").unwrap();
    assert_eq!(tokens.tokens[0].position.column, 4);
}

#[test]
fn colon_must_end_a_line() {
    assert_eq!(kinds("!:"), [TokenKind::Increment, TokenKind::EndOfLine]);

    let err = tokenize("!:!", "t").unwrap_err();
    assert_eq!(err.to_string(), "Syntax error at 1:2 in t - ':' must end a line");
}

#[test]
fn modifiers_nest_around_one_command() {
    let program = parse_source("'|2|[@!@]", "test").unwrap();
    assert_eq!(program.len(), 1);

    let Command::Prefixed { modifier: Modifier::Local,
                            command: outer,
                            .. } = &program[0]
    else {
        panic!("expected a local modifier, got {:?}", program[0]);
    };
    let Command::Prefixed { modifier: Modifier::ConstantRepeat(2),
                            command: inner,
                            .. } = outer.as_ref()
    else {
        panic!("expected a constant repeat, got {outer:?}");
    };
    let Command::Block { kind: BlockKind::DoWhile,
                         body,
                         .. } = inner.as_ref()
    else {
        panic!("expected a do-while block, got {inner:?}");
    };

    assert!(matches!(body.as_ref(),
                     [Command::Leaf { instruction: Instruction::Increment,
                                      .. }]));
}

#[test]
fn display_writes_source_without_trivia() {
    let program = parse_source("'|2|[@! \"inc\" ~:\n@] (%)", "test").unwrap();
    let text: String = program.iter().map(ToString::to_string).collect();
    assert_eq!(text, "'|2|[@!~@](%)");
}

#[test]
fn tree_dump_indents_children() {
    let program = parse_source("(|3|!)%", "test").unwrap();
    assert_eq!(dump_tree(&program), "( @1:1\n  |3| @1:2\n    ! @1:5\n)\n% @1:7\n");
}

#[test]
fn empty_program_parses() {
    assert!(parse_source("", "test").unwrap().is_empty());
    assert!(parse_source("\"only a comment\":\n", "test").unwrap().is_empty());
}

#[test]
fn closers_report_what_was_expected() {
    let err = parse_source("[!)", "t").unwrap_err();
    assert_eq!(err.to_string(), "Syntax error at 1:3 in t - expected ']' but found ')'");

    let err = parse_source("(!", "t").unwrap_err();
    assert_eq!(err.to_string(), "Syntax error at 1:3 in t - expected ')'");

    let err = parse_source("!@]", "t").unwrap_err();
    assert_eq!(err.to_string(), "Syntax error at 1:2 in t - unexpected '@]'");
}

#[test]
fn dangling_modifier_is_an_error() {
    let err = parse_source("!|2|", "t").unwrap_err();
    assert!(matches!(err, ParseError::ExpectedCommand { .. }));
    assert_eq!(err.to_string(), "Syntax error at 1:5 in t - expected a command");
}

#[test]
fn nesting_is_bounded() {
    let src = format!("{}!", "'".repeat(1001));
    let err = parse_source(&src, "t").unwrap_err();
    assert!(matches!(err, ParseError::NestingTooDeep { limit: 1000, .. }));
}
