use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process, thread,
};

use clap::Parser;
use maumivu::{
    INLINE_SOURCE_NAME, Settings,
    ast::dump_tree,
    error::Error,
    interpreter::{
        console::{Console, StreamConsole},
        evaluator::core::Context,
    },
    parse_source,
};
use tracing::Level;

/// File looked up when the given path is a directory.
const DEFAULT_FILE_NAME: &str = "maumivu.au";

/// Native stack for the interpreter thread, sized for [`CLI_MAX_DEPTH`].
const INTERPRETER_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Depth bound used by the binary. Far above the library default, since the
/// interpreter thread gets [`INTERPRETER_STACK_SIZE`] of stack.
const CLI_MAX_DEPTH: usize = 10_000;

/// maumivu runs programs written in a tape-based esoteric language with two
/// memory tracks, repeat modifiers and functions with local memory.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Program file, or a directory containing `maumivu.au`. Defaults to
    /// the current directory.
    #[arg(conflicts_with = "code")]
    path: Option<PathBuf>,

    /// Runs the given code instead of a file.
    #[arg(short, long)]
    code: Option<String>,

    /// Prints the source, the parsed command tree, and the final memory to
    /// stderr.
    #[arg(long)]
    debug: bool,

    /// Like `--debug`, and also traces every executed command.
    #[arg(long)]
    debug_heavy: bool,

    /// Silences all warnings.
    #[arg(long)]
    disable_warnings: bool,

    /// Silences the warning logged when a tape grows to the left.
    #[arg(long)]
    disable_too_left_pointer_warning: bool,

    /// Seeds the random number generator for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Deepest nesting of loop bodies and function calls.
    #[arg(long, default_value_t = CLI_MAX_DEPTH)]
    max_depth: usize,
}

fn main() {
    let args = Args::parse();

    let level = if args.debug_heavy {
        Level::TRACE
    } else if args.disable_warnings {
        Level::ERROR
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level)
                             .with_writer(io::stderr)
                             .without_time()
                             .init();

    let (source, name) = if let Some(code) = args.code {
        (code, INLINE_SOURCE_NAME.to_string())
    } else {
        load(args.path.as_deref().unwrap_or_else(|| Path::new(".")))
    };

    let settings = Settings { max_depth:        args.max_depth,
                              seed:             args.seed,
                              warn_left_growth: !args.disable_too_left_pointer_warning, };
    let debug = args.debug || args.debug_heavy;

    let interpreter = spawn_interpreter(source, name, settings, debug);

    let status = match interpreter.map(thread::JoinHandle::join) {
        Ok(Ok(Ok(()))) => 0,
        Ok(Ok(Err(message))) => {
            if let Err(e) = io::stdout().flush() {
                eprintln!("Failed to flush the output: {e}");
            }
            eprintln!("{message}");
            1
        },
        Ok(Err(_)) => 101,
        Err(e) => {
            eprintln!("Failed to start the interpreter thread: {e}");
            1
        },
    };
    process::exit(status);
}

/// Reads a program file, resolving directories to their `maumivu.au`.
fn load(path: &Path) -> (String, String) {
    let path = if path.is_dir() { path.join(DEFAULT_FILE_NAME) } else { path.to_path_buf() };

    match fs::read_to_string(&path) {
        Ok(source) => (source, path.display().to_string()),
        Err(e) => {
            eprintln!("Failed to read the program file '{}': {e}", path.display());
            process::exit(1);
        },
    }
}

/// Runs a program on a thread with [`INTERPRETER_STACK_SIZE`] of stack.
///
/// Errors hold reference-counted source names that cannot leave the thread,
/// so the thread hands back the rendered diagnostic instead.
fn spawn_interpreter(source: String,
                     name: String,
                     settings: Settings,
                     debug: bool)
                     -> io::Result<thread::JoinHandle<Result<(), String>>> {
    thread::Builder::new().name("interpreter".to_string())
                          .stack_size(INTERPRETER_STACK_SIZE)
                          .spawn(move || {
                              execute(&source, &name, settings, debug).map_err(|e| e.to_string())
                          })
}

fn execute(source: &str, name: &str, settings: Settings, debug: bool) -> Result<(), Error> {
    let program = parse_source(source, name)?;

    if debug {
        eprintln!("Program:\n{source:?}\nCommands:\n{}", dump_tree(&program));
    }

    let console = StreamConsole::new(io::stdin().lock(), io::stdout().lock());
    let mut context = Context::with_settings(console, settings);

    if debug {
        dump_memory("before", &context);
    }

    let result = context.run(&program);
    context.console_mut().flush()?;

    if debug {
        dump_memory("after", &context);
    }

    result.map_err(Error::from)
}

fn dump_memory<C: Console>(label: &str, context: &Context<C>) {
    let locals: Vec<String> = context.locals().iter().map(ToString::to_string).collect();
    eprintln!("\nMemory {label} the run:");
    eprintln!("Main memory:\n{}\nLocal memory:\n{locals:?}\nFunction pointer: {}",
              context.global(),
              context.functions().pointer());
}
