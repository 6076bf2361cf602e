use std::{cmp::Ordering, rc::Rc};

use rand::{SeedableRng, rngs::StdRng};
use tracing::trace;

use crate::{
    ast::{BlockKind, Command, Instruction, Modifier},
    error::RuntimeError,
    interpreter::{
        console::Console,
        evaluator::{arithmetic::Operator, utils::compose_repeat},
        lexer::Position,
        memory::{
            scope::{Scope, Track},
            strip::Strip,
        },
    },
    util::num::f64_to_i64_checked,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A function body stored in the function table.
pub type Function = Rc<[Command]>;

/// The function table: a strip of optional function bodies.
pub type FunctionTable = Strip<Option<Function>>;

/// Default bound on nested block executions and calls.
///
/// Fits the default 2 MiB stack of a spawned thread. Callers that run the
/// interpreter on a larger stack can raise [`Settings::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Tunable behavior of a [`Context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Deepest nesting of loop bodies and function calls before execution
    /// fails. Each level uses native stack, so the thread running the
    /// interpreter needs a stack sized for this bound.
    pub max_depth:        usize,
    /// Seed for the random number command. `None` seeds from entropy.
    pub seed:             Option<u64>,
    /// Log a warning whenever a tape grows to the left of its first cell.
    pub warn_left_growth: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { max_depth:        DEFAULT_MAX_DEPTH,
               seed:             None,
               warn_left_growth: true, }
    }
}

/// Outcome of executing a command or a command sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Execution ran to the end.
    Completed,
    /// A conditional break fired; the nearest enclosing loop must stop.
    Break,
}

/// Stores the runtime state of the interpreter.
///
/// The context exclusively owns the global scope, the stack of local scopes
/// (one per active call), the function table with its pointer, and the
/// console. Every command executes against it.
///
/// ## Usage
///
/// Create one context per program run, then pass the parsed program to
/// [`Context::run`]. The state stays readable afterwards for inspection.
///
/// ```
/// use maumivu::{
///     interpreter::{console::StreamConsole, evaluator::core::Context},
///     parse_source,
/// };
///
/// let program = parse_source("!!!>|5|!", "demo").unwrap();
/// let mut context = Context::new(StreamConsole::new(&b""[..], Vec::new()));
/// context.run(&program).unwrap();
///
/// let cells: Vec<f64> = context.global().tape(maumivu::Track::Active).iter().copied().collect();
/// assert_eq!(cells, [3.0, 5.0]);
/// ```
pub struct Context<C> {
    pub(super) global:    Scope,
    pub(super) locals:    Vec<Scope>,
    pub(super) functions: FunctionTable,
    pub(super) console:   C,
    pub(super) rng:       StdRng,
    settings:             Settings,
    depth:                usize,
}

impl<C: Console> Context<C> {
    /// Creates a context with default [`Settings`].
    pub fn new(console: C) -> Self {
        Self::with_settings(console, Settings::default())
    }

    /// Creates a context with fresh memory, an empty function table, and the
    /// given settings.
    pub fn with_settings(console: C, settings: Settings) -> Self {
        let rng = settings.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        Self { global: Scope::new(),
               locals: Vec::new(),
               functions: Strip::new(),
               console,
               rng,
               settings,
               depth: 0 }
    }

    /// Runs a program.
    ///
    /// The program body executes like a function call: it gets its own local
    /// scope, discarded when the program ends. A break at top level ends the
    /// program normally.
    ///
    /// # Errors
    /// Returns the first runtime error; execution stops there.
    pub fn run(&mut self, program: &[Command]) -> EvalResult<()> {
        self.locals.push(Scope::new());
        let result = self.exec_sequence(program);
        self.locals.pop();
        result.map(|_| ())
    }

    /// Executes a nested command sequence, such as a loop body or a function
    /// body, counting it against the depth bound.
    ///
    /// # Parameters
    /// - `block`: The commands to execute.
    /// - `position`: Position of the construct that owns the block.
    ///
    /// # Returns
    /// `Signal::Break` if a command of the sequence requested a break; the
    /// remaining commands are skipped.
    pub fn exec_block(&mut self, block: &[Command], position: &Position) -> EvalResult<Signal> {
        if self.depth >= self.settings.max_depth {
            return Err(RuntimeError::DepthExceeded { limit:    self.settings.max_depth,
                                                     position: position.clone(), });
        }

        self.depth += 1;
        let result = self.exec_sequence(block);
        self.depth -= 1;
        result
    }

    fn exec_sequence(&mut self, block: &[Command]) -> EvalResult<Signal> {
        for command in block {
            trace!(command = %command, position = %command.position(), "executing");

            let signal = self.exec_command(command, false, 1)?;

            trace!(global = %self.global,
                   local = %self.locals.last().map(ToString::to_string).unwrap_or_default(),
                   function_pointer = self.functions.pointer(),
                   "memory");

            if signal == Signal::Break {
                return Ok(Signal::Break);
            }
        }
        Ok(Signal::Completed)
    }

    /// Executes one command with a composed local flag and repeat count.
    ///
    /// Modifiers fold into the flag and count on the way down: `'` sets the
    /// local flag, `||` and `|N|` multiply the repeat count. The terminal
    /// command validates the final count.
    ///
    /// # Parameters
    /// - `command`: The command to execute.
    /// - `local`: Target the innermost local scope instead of the global one.
    /// - `repeat`: The repeat count composed so far; 1 for a bare command.
    pub fn exec_command(&mut self,
                        command: &Command,
                        local: bool,
                        repeat: i64)
                        -> EvalResult<Signal> {
        match command {
            Command::Leaf { instruction, token } => {
                self.exec_instruction(*instruction, &token.position, local, repeat)
            },
            Command::Prefixed { modifier,
                                token,
                                command, } => {
                let position = &token.position;
                match modifier {
                    Modifier::Local => self.exec_command(command, true, repeat),
                    Modifier::ValueRepeat => {
                        let count = f64_to_i64_checked(self.cell(local, Track::Active, position)?,
                                                       position)?;
                        self.exec_command(command, local, compose_repeat(repeat, count, position)?)
                    },
                    Modifier::ConstantRepeat(count) => {
                        self.exec_command(command, local, compose_repeat(repeat, *count, position)?)
                    },
                }
            },
            Command::Block { kind, open, body, .. } => {
                let position = &open.position;
                match kind {
                    BlockKind::While => self.exec_while(body, position, local, repeat),
                    BlockKind::DoWhile => self.exec_do_while(body, position, local, repeat),
                    BlockKind::Function => {
                        self.define_function(body, position, repeat)?;
                        Ok(Signal::Completed)
                    },
                }
            },
        }
    }

    fn exec_instruction(&mut self,
                        instruction: Instruction,
                        position: &Position,
                        local: bool,
                        repeat: i64)
                        -> EvalResult<Signal> {
        match instruction {
            Instruction::Increment => self.add_repeat(position, local, repeat, false)?,
            Instruction::Decrement => self.add_repeat(position, local, repeat, true)?,
            Instruction::Add => self.combine(Operator::Add, position, local, repeat)?,
            Instruction::Subtract => self.combine(Operator::Subtract, position, local, repeat)?,
            Instruction::Multiply => self.combine(Operator::Multiply, position, local, repeat)?,
            Instruction::Divide => self.combine(Operator::Divide, position, local, repeat)?,
            Instruction::Random => self.randomize(position, local)?,
            Instruction::MoveRight => self.move_pointer(position, local, repeat, false)?,
            Instruction::MoveLeft => self.move_pointer(position, local, repeat, true)?,
            Instruction::Floor => self.round(position, local, f64::floor)?,
            Instruction::Ceil => self.round(position, local, f64::ceil)?,
            Instruction::SwitchTrack => self.switch_track(position, local, repeat)?,
            Instruction::FunctionLeft => self.move_function_pointer(position, repeat, true)?,
            Instruction::FunctionRight => self.move_function_pointer(position, repeat, false)?,
            Instruction::Call => self.call_function(position, repeat)?,
            Instruction::InputNumber => self.input_number(position, local, repeat)?,
            Instruction::InputCharacter => self.input_character(position, local, repeat)?,
            Instruction::OutputNumber => self.output_number(position, local, repeat)?,
            Instruction::OutputCharacter => self.output_character(position, local, repeat)?,
            Instruction::SetToIndex => self.set_to_index(position, local, repeat)?,
            Instruction::BreakIfEqual => {
                return self.conditional_break(Ordering::Equal, position, local, repeat);
            },
            Instruction::BreakIfLess => {
                return self.conditional_break(Ordering::Less, position, local, repeat);
            },
            Instruction::BreakIfGreater => {
                return self.conditional_break(Ordering::Greater, position, local, repeat);
            },
            Instruction::SwapScope => self.swap_scopes(position, local, repeat)?,
        }
        Ok(Signal::Completed)
    }

    /// Gets the global or innermost local scope.
    ///
    /// # Errors
    /// Returns `NoLocalScope` if `local` is set and no local scope exists.
    pub fn scope(&self, local: bool, position: &Position) -> EvalResult<&Scope> {
        if !local {
            return Ok(&self.global);
        }
        self.locals
            .last()
            .ok_or_else(|| RuntimeError::NoLocalScope { position: position.clone() })
    }

    /// Gets the global or innermost local scope mutably.
    ///
    /// # Errors
    /// Returns `NoLocalScope` if `local` is set and no local scope exists.
    pub fn scope_mut(&mut self, local: bool, position: &Position) -> EvalResult<&mut Scope> {
        if !local {
            return Ok(&mut self.global);
        }
        self.locals
            .last_mut()
            .ok_or_else(|| RuntimeError::NoLocalScope { position: position.clone() })
    }

    /// Reads the cell under the pointer of the selected scope and track.
    pub fn cell(&self, local: bool, track: Track, position: &Position) -> EvalResult<f64> {
        Ok(self.scope(local, position)?.cell(track))
    }

    /// Writes the cell under the pointer of the selected scope and track.
    pub fn set_cell(&mut self,
                    value: f64,
                    local: bool,
                    track: Track,
                    position: &Position)
                    -> EvalResult<()> {
        self.scope_mut(local, position)?.tape_mut(track).set(value);
        Ok(())
    }

    /// The global scope.
    #[must_use]
    pub const fn global(&self) -> &Scope {
        &self.global
    }

    /// The local scopes of the active calls, innermost last.
    #[must_use]
    pub fn locals(&self) -> &[Scope] {
        &self.locals
    }

    /// The function table; its pointer is the function pointer register.
    #[must_use]
    pub const fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// The settings the context was created with.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The console.
    #[must_use]
    pub const fn console(&self) -> &C {
        &self.console
    }

    /// The console, mutably.
    pub const fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Consumes the context and returns its console.
    pub fn into_console(self) -> C {
        self.console
    }
}
