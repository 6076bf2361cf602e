use std::fs;

use maumivu::{
    Settings, Track,
    error::{Error, ParseError, RuntimeError},
    get_output,
    interpreter::{console::StreamConsole, evaluator::core::Context},
    parse_source,
};
use walkdir::WalkDir;

type TestContext = Context<StreamConsole<&'static [u8], Vec<u8>>>;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = get_output(&code, "") {
                panic!("Example {} in {:?} failed:\n{}\nError: {}", i + 1, path, code, e);
            }
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

fn extract_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```maumivu") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_output(src: &str, expected: &str) {
    match get_output(src, "") {
        Ok(output) => assert_eq!(output, expected, "program: {src}"),
        Err(e) => panic!("Program {src:?} failed: {e}"),
    }
}

fn assert_output_with_input(src: &str, input: &str, expected: &str) {
    match get_output(src, input) {
        Ok(output) => assert_eq!(output, expected, "program: {src}"),
        Err(e) => panic!("Program {src:?} failed: {e}"),
    }
}

fn runtime_error(src: &str, input: &str) -> RuntimeError {
    match get_output(src, input) {
        Err(Error::Runtime(e)) => e,
        other => panic!("Expected a runtime error from {src:?}, got {other:?}"),
    }
}

fn parse_error(src: &str) -> ParseError {
    match get_output(src, "") {
        Err(Error::Parse(e)) => e,
        other => panic!("Expected a parse error from {src:?}, got {other:?}"),
    }
}

fn run_with(src: &str, settings: Settings) -> (TestContext, Result<(), RuntimeError>) {
    let program = parse_source(src, "test").unwrap();
    let mut context = Context::with_settings(StreamConsole::new(&b""[..], Vec::new()), settings);
    let result = context.run(&program);
    (context, result)
}

#[test]
fn increments_and_numeric_output() {
    assert_output("!!!\\.", "3.0");
    assert_output("~~\\.", "-2.0");
    assert_output("\\.", "0.0");
}

#[test]
fn constant_and_value_repeats() {
    assert_output("|5|!\\.", "5.0");
    assert_output("|-2|!\\.", "-2.0");
    assert_output("|2||3|!\\.", "6.0");
    assert_output("|3|!||\\.", "3.03.03.0");
    assert_output("|0|!\\.", "0.0");
}

#[test]
fn value_repeat_requires_an_integral_cell() {
    let err = runtime_error("^|2|!^!/||!", "");
    assert!(matches!(err, RuntimeError::InvalidRepeatCount { value, .. } if value == 0.5));
}

#[test]
fn repeat_overflow_is_reported() {
    let err = runtime_error("|9223372036854775807||2|!", "");
    assert!(matches!(err, RuntimeError::RepeatOverflow { .. }));
}

#[test]
fn binary_operators_use_the_inactive_track() {
    assert_output("^|3|!^|4|!+\\.", "7.0");
    assert_output("^|3|!^|4|!-\\.", "1.0");
    assert_output("^|3|!^|4|!*\\.", "12.0");
    assert_output("^|2|!^|4|!/\\.", "2.0");
    assert_output("^|3|!^|4|!|2|+\\.", "10.0");
    assert_output("^|2|!^|8|!|2|/\\.", "2.0");
}

#[test]
fn division_by_zero_follows_floating_point() {
    assert_output("!/\\.", "inf");
    assert_output("~/\\.", "-inf");
    assert_output("/\\.", "nan");
}

#[test]
fn floor_and_ceil() {
    assert_output("^|2|!^|3|!/_\\.", "1.0");
    assert_output("^|2|!^|3|!/&\\.", "2.0");
    assert_output("^|2|!^~/_\\.", "-1.0");
    assert_output("^|2|!^~/\\.", "-0.5");
}

#[test]
fn random_numbers_are_in_unit_interval() {
    let settings = Settings { seed: Some(7),
                              ..Settings::default() };
    let (context, result) = run_with("`>|5|`", settings.clone());
    result.unwrap();

    for &cell in context.global().tape(Track::Active).iter() {
        assert!((0.0..1.0).contains(&cell), "{cell} out of range");
    }

    let (again, _) = run_with("`>|5|`", settings);
    assert_eq!(context.global(), again.global());
}

#[test]
fn tape_grows_in_both_directions() {
    assert_output("<<<??\\.", "0.0");
    assert_output(">>>??\\.", "3.0");
    assert_output("|5|!<>\\.", "5.0");

    let (context, result) = run_with("|9|!|3|<|3|>", Settings::default());
    result.unwrap();
    let tape = context.global().tape(Track::Active);
    assert_eq!(tape.len(), 4);
    assert_eq!(tape.pointer(), 3);
    assert_eq!(tape.iter().copied().collect::<Vec<_>>(), [0.0, 0.0, 0.0, 9.0]);
}

#[test]
fn set_to_index_cannot_repeat() {
    let err = runtime_error("|2|??", "");
    assert!(matches!(err, RuntimeError::CannotRepeat { repeat: 2, .. }));
}

#[test]
fn track_switching() {
    assert_output("|5|!^\\.^\\.", "0.05.0");
    assert_output("|5|!|2|^\\.", "5.0");
    assert_output("|5|!|-1|^\\.", "0.0");
}

#[test]
fn even_track_switch_leaves_memory_untouched() {
    let (before, _) = run_with("|3|!>|4|!^<|2|!", Settings::default());
    let (after, _) = run_with("|3|!>|4|!^<|2|!|4|^", Settings::default());
    assert_eq!(before.global(), after.global());
}

#[test]
fn while_loops() {
    assert_output("|3|![\\.~]", "3.02.01.0");
    assert_output("[\\.]", "");
}

#[test]
fn do_while_runs_its_body_first() {
    assert_output("[@\\.@]", "0.0");
    assert_output("|5|![@|5|~\\.@]", "0.0");
    assert_output("|2|![@\\.~@]", "2.01.0");
}

#[test]
fn do_while_with_immediate_break_runs_once() {
    assert_output("^!^[@!\\.?=@]", "1.0");
}

#[test]
fn loops_cannot_repeat() {
    assert!(matches!(runtime_error("|2|[~]", ""), RuntimeError::CannotRepeat { what: "loops", .. }));
    assert!(matches!(runtime_error("|0|[@~@]", ""), RuntimeError::CannotRepeat { .. }));
}

#[test]
fn break_leaves_only_the_nearest_loop() {
    assert_output("|2|![>![\\.?>]<~]", "1.02.0");
}

#[test]
fn break_ends_a_function_body_but_not_its_caller() {
    assert_output("(\\.?=|9|!)%\\.", "0.00.0");
    assert_output("(?>)|3|![%\\.~]", "3.02.01.0");
}

#[test]
fn break_at_top_level_ends_the_program() {
    assert_output("?=\\.", "");
    assert_output("!?=\\.", "1.0");
}

#[test]
fn conditional_breaks_cannot_repeat() {
    let err = runtime_error("[@|2|?<@]", "");
    assert!(matches!(err, RuntimeError::CannotRepeat { what: "conditional breaks", .. }));
}

#[test]
fn calls_get_fresh_local_memory() {
    assert_output("('!'\\.)|3|%", "1.01.01.0");
    assert_output("(!\\.)|3|%", "1.02.03.0");
}

#[test]
fn local_scope_is_discarded_after_a_call() {
    let (context, result) = run_with("('|4|!)%", Settings::default());
    result.unwrap();
    assert!(context.locals().is_empty());
    assert_eq!(context.global().cell(Track::Active), 0.0);
}

#[test]
fn negative_call_repeat_never_runs_the_body() {
    let (context, result) = run_with("(|9|!)|-1|%", Settings::default());
    assert!(matches!(result, Err(RuntimeError::NegativeRepeat { repeat: -1, .. })));
    assert_eq!(context.global().cell(Track::Active), 0.0);
}

#[test]
fn zero_calls_and_empty_slots_do_nothing() {
    assert_output("(!)|0|%\\.", "0.0");
    assert_output("%\\.", "0.0");
    assert_output("(!){%\\.}%\\.", "0.01.0");
}

#[test]
fn function_pointer_selects_slots() {
    assert_output("(|2|!)}(|3|!)%{%\\.", "5.0");
    assert_output("(!)(|5|!)%\\.", "5.0");
}

#[test]
fn function_definition_cannot_repeat() {
    let err = runtime_error("|2|(!)", "");
    assert!(matches!(err, RuntimeError::CannotRepeat { what: "function definition", .. }));
}

#[test]
fn runaway_recursion_is_bounded() {
    let settings = Settings { max_depth: 50,
                              ..Settings::default() };
    let (_, result) = run_with("(%)%", settings);
    assert!(matches!(result, Err(RuntimeError::DepthExceeded { limit: 50, .. })));
}

#[test]
fn default_depth_bound_fits_a_test_thread() {
    let err = runtime_error("(%)%", "");
    assert!(matches!(err, RuntimeError::DepthExceeded { .. }));

    let err = runtime_error("(!||%)!%", "");
    assert!(matches!(err, RuntimeError::DepthExceeded { .. }));
}

#[test]
fn huge_pointer_moves_are_errors() {
    for src in ["|9223372036854775807|>", "|9223372036854775807|<", "|9223372036854775807|}",
                "|-9223372036854775807|{", ">|9223372036854775807|>"]
    {
        let err = runtime_error(src, "");
        assert!(matches!(err, RuntimeError::PointerOutOfRange { .. }), "{src}: {err:?}");
    }
}

#[test]
fn local_modifier() {
    assert_output("'|2|!'\\.\\.", "2.00.0");
    assert_output("|2|'!'\\.", "2.0");
    assert_output("'|3|!'||\\.", "3.03.03.0");
    assert_output("'!'[\\.'~]", "0.0");
}

#[test]
fn local_global_swap() {
    assert_output("|7|!;'\\.\\.", "7.00.0");
    assert_output("|7|!|2|;\\.", "7.0");
    assert!(matches!(runtime_error("';", ""), RuntimeError::LocalScopeSwap { .. }));
    assert!(matches!(runtime_error("'|3|;", ""), RuntimeError::LocalScopeSwap { .. }));
}

#[test]
fn even_local_swap_is_a_no_op() {
    assert_output(r"|2|';\.", "0.0");
    assert_output(r"|7|!'|2|;\.'\.", "7.00.0");
    assert_output(r"|7|!|0|';\.", "7.0");
}

#[test]
fn local_memory_requires_a_local_scope() {
    let program = parse_source("'!", "test").unwrap();
    let mut context = Context::new(StreamConsole::new(&b""[..], Vec::new()));

    let err = context.exec_command(&program[0], false, 1).unwrap_err();
    assert!(matches!(err, RuntimeError::NoLocalScope { .. }));
}

#[test]
fn numeric_input() {
    assert_output_with_input("$.\\.", "2.5\n", "2.5");
    assert_output_with_input("$.>$.+\\.", " 4 \n-1\n", "-1.0");
    assert!(matches!(runtime_error("$.", "abc\n"), RuntimeError::InvalidNumber { .. }));
    assert!(matches!(runtime_error("$.", ""), RuntimeError::EndOfInput { .. }));
    assert!(matches!(runtime_error("|2|$.", "1\n"), RuntimeError::CannotRepeat { .. }));
}

#[test]
fn character_input() {
    assert_output_with_input("$,\\.", "A", "65.0");
    assert_output_with_input("$,>$,<\\,>\\,", "hi", "hi");
    assert_output_with_input("$,\\.", "é", "233.0");
    assert!(matches!(runtime_error("$,", ""), RuntimeError::EndOfInput { .. }));
    assert!(matches!(runtime_error("|0|$,", "x"), RuntimeError::CannotRepeat { .. }));
}

#[test]
fn character_output() {
    assert_output("|72|!\\,>|105|!\\,", "Hi");
    assert_output("^|2|!^|131|!/\\,", "A");
    assert_output("|65|!|3|\\,", "AAA");
    assert!(matches!(runtime_error("~\\,", ""), RuntimeError::InvalidCharacter { .. }));
}

#[test]
fn output_repeat_counts() {
    assert_output("!|0|\\.", "");
    assert!(matches!(runtime_error("|-1|\\.", ""), RuntimeError::NegativeRepeat { .. }));
    assert!(matches!(runtime_error("|-1|\\,", ""), RuntimeError::NegativeRepeat { .. }));
}

#[test]
fn comments_and_whitespace() {
    assert_output("\"anything ! here\"\\.", "0.0");
    assert_output("!\\.\"!!!", "1.0");
    assert_output(" ! \t!\\.", "2.0");
    assert_output("!:\n\\.:\n", "1.0");
    assert_output("!:\r\n\\.:", "1.0");
}

#[test]
fn lexical_errors() {
    let err = parse_error("!\n\\.");
    assert!(matches!(&err, ParseError::UnrecognizedToken { position, .. } if position.line == 1 && position.column == 2));
    assert!(matches!(parse_error("!:!"), ParseError::UnrecognizedToken { .. }));
    assert!(matches!(parse_error("a"), ParseError::UnrecognizedToken { .. }));
    assert!(matches!(parse_error("$"), ParseError::UnrecognizedToken { .. }));
}

#[test]
fn parse_errors() {
    assert!(matches!(parse_error("[!"), ParseError::UnclosedBlock { expected: "]", .. }));
    assert!(matches!(parse_error("[!)"), ParseError::MismatchedCloser { expected: "]", .. }));
    assert!(matches!(parse_error("[@!]"), ParseError::MismatchedCloser { expected: "@]", .. }));
    assert!(matches!(parse_error("]"), ParseError::UnexpectedCloser { .. }));
    assert!(matches!(parse_error("'"), ParseError::ExpectedCommand { .. }));
    assert!(matches!(parse_error("(|2|)"), ParseError::ExpectedCommand { .. }));
}

#[test]
fn errors_stop_the_program_before_anything_runs() {
    assert!(get_output("!\\.[", "").is_err());
}

#[test]
fn diagnostics_name_class_position_and_source() {
    let err = get_output("!:\n \n", "").unwrap_err();
    assert_eq!(err.to_string(),
               "Syntax error at 2:2 in <input_main> - line break without a preceding ':'");

    let err = get_output("|2|[]", "").unwrap_err();
    assert_eq!(err.to_string(),
               "Runtime error at 1:4 in <input_main> - can't repeat loops (repeat count is 2)");
}
