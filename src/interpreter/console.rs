use std::io::{self, BufRead, Write};

/// The interpreter's connection to the outside world.
///
/// Input commands block on `read_line` and `read_char`; output commands
/// call `write_str`. The interpreter never adds separators or line breaks of
/// its own.
pub trait Console {
    /// Reads one line, without its line break.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Reads exactly one character.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_char(&mut self) -> io::Result<Option<char>>;

    /// Writes text to the output.
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Flushes buffered output.
    fn flush(&mut self) -> io::Result<()>;
}

/// A [`Console`] over any buffered reader and writer.
///
/// The binary wraps locked stdin and stdout; tests wrap a byte slice and a
/// `Vec<u8>`. Output is flushed before every read so prompts appear before
/// the program blocks.
///
/// # Example
/// ```
/// use maumivu::interpreter::console::{Console, StreamConsole};
///
/// let mut console = StreamConsole::new("12\nxy".as_bytes(), Vec::new());
///
/// assert_eq!(console.read_line().unwrap().as_deref(), Some("12"));
/// assert_eq!(console.read_char().unwrap(), Some('x'));
/// console.write_str("ok").unwrap();
/// assert_eq!(console.into_writer(), b"ok");
/// ```
#[derive(Debug)]
pub struct StreamConsole<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
    /// Creates a console reading from `reader` and writing to `writer`.
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Gets the writer, e.g. to inspect captured output.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Consumes the console and returns its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        self.writer.flush()?;

        let mut buffer = [0u8; 4];
        if self.reader.read(&mut buffer[..1])? == 0 {
            return Ok(None);
        }

        let width = utf8_width(buffer[0]).ok_or_else(|| invalid_utf8(buffer[0]))?;
        self.reader.read_exact(&mut buffer[1..width])?;

        std::str::from_utf8(&buffer[..width]).map(|s| s.chars().next())
                                              .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Length of the UTF-8 sequence that starts with `first`.
const fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn invalid_utf8(byte: u8) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData,
                   format!("byte 0x{byte:02X} does not start a UTF-8 character"))
}
