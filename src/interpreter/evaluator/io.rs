use crate::{
    error::RuntimeError,
    interpreter::{
        console::Console,
        evaluator::{
            core::{Context, EvalResult},
            utils::{require_non_negative, require_single},
        },
        lexer::Position,
        memory::scope::Track,
    },
    util::num::{f64_to_char, format_number},
};

impl<C: Console> Context<C> {
    /// Reads one line and stores it, parsed as a number, in the active cell.
    ///
    /// # Errors
    /// - `CannotRepeat` unless `repeat` is 1.
    /// - `EndOfInput` if the input is exhausted.
    /// - `InvalidNumber` if the line is not a number.
    pub fn input_number(&mut self, position: &Position, local: bool, repeat: i64) -> EvalResult<()> {
        require_single(repeat, "number input", position)?;

        let line = self.console
                       .read_line()
                       .map_err(|e| io_error(&e, position))?
                       .ok_or_else(|| RuntimeError::EndOfInput { position: position.clone() })?;
        let value = line.trim()
                        .parse::<f64>()
                        .map_err(|_| RuntimeError::InvalidNumber { input:    line.clone(),
                                                                   position: position.clone(), })?;

        self.set_cell(value, local, Track::Active, position)
    }

    /// Reads one character and stores its code point in the active cell.
    ///
    /// # Errors
    /// - `CannotRepeat` unless `repeat` is 1.
    /// - `EndOfInput` if the input is exhausted.
    pub fn input_character(&mut self,
                           position: &Position,
                           local: bool,
                           repeat: i64)
                           -> EvalResult<()> {
        require_single(repeat, "character input", position)?;

        let character = self.console
                            .read_char()
                            .map_err(|e| io_error(&e, position))?
                            .ok_or_else(|| RuntimeError::EndOfInput { position: position.clone() })?;

        self.set_cell(f64::from(u32::from(character)), local, Track::Active, position)
    }

    /// Writes the active cell as a number, `repeat` times with no separator.
    ///
    /// # Errors
    /// `NegativeRepeat` if `repeat` is negative.
    pub fn output_number(&mut self, position: &Position, local: bool, repeat: i64) -> EvalResult<()> {
        let count = require_non_negative(repeat, "number output", position)?;
        let text = format_number(self.cell(local, Track::Active, position)?);
        self.write_repeated(&text, count, position)
    }

    /// Writes the character whose code is in the active cell, `repeat` times.
    ///
    /// # Errors
    /// - `NegativeRepeat` if `repeat` is negative.
    /// - `InvalidCharacter` if the cell is not a valid code point.
    pub fn output_character(&mut self,
                            position: &Position,
                            local: bool,
                            repeat: i64)
                            -> EvalResult<()> {
        let count = require_non_negative(repeat, "character output", position)?;
        let character = f64_to_char(self.cell(local, Track::Active, position)?, position)?;
        self.write_repeated(character.encode_utf8(&mut [0; 4]), count, position)
    }

    fn write_repeated(&mut self, text: &str, count: u64, position: &Position) -> EvalResult<()> {
        for _ in 0..count {
            self.console.write_str(text).map_err(|e| io_error(&e, position))?;
        }
        Ok(())
    }
}

fn io_error(error: &std::io::Error, position: &Position) -> RuntimeError {
    RuntimeError::Io { message:  error.to_string(),
                       position: position.clone(), }
}
