//! Operator Console
//!
//! The transcript and status messages are plain text written through
//! [`core::fmt::Write`]. Two sinks are provided: a UART (the ST-LINK virtual
//! COM port) and the defmt log stream for boards without one.

use core::fmt;

use heapless::String;

use crate::config::LINE_BUFFER_SIZE;

/// Console over any blocking `embedded_io` writer
pub struct SerialConsole<T> {
    tx: T,
}

impl<T: embedded_io::Write> SerialConsole<T> {
    /// Wrap a writer
    pub const fn new(tx: T) -> Self {
        Self { tx }
    }

    /// Give the writer back
    pub fn into_inner(self) -> T {
        self.tx
    }
}

impl<T: embedded_io::Write> fmt::Write for SerialConsole<T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for chunk in s.split_inclusive('\n') {
            match chunk.strip_suffix('\n') {
                Some(text) => {
                    self.tx.write_all(text.as_bytes()).map_err(|_| fmt::Error)?;
                    self.tx.write_all(b"\r\n").map_err(|_| fmt::Error)?;
                }
                None => self.tx.write_all(chunk.as_bytes()).map_err(|_| fmt::Error)?,
            }
        }
        Ok(())
    }
}

/// Console that forwards whole lines to defmt
///
/// Lines longer than the buffer are emitted in pieces.
#[derive(Default)]
pub struct DefmtConsole {
    line: String<LINE_BUFFER_SIZE>,
}

impl DefmtConsole {
    /// Create an empty console
    #[must_use]
    pub const fn new() -> Self {
        Self { line: String::new() }
    }

    fn flush(&mut self) {
        defmt::println!("{=str}", self.line.as_str());
        self.line.clear();
    }
}

impl fmt::Write for DefmtConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if c == '\n' {
                self.flush();
                continue;
            }
            if self.line.push(c).is_err() {
                self.flush();
                let _ = self.line.push(c);
            }
        }
        Ok(())
    }
}
