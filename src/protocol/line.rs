//! Transcript Line Assembly
//!
//! Modem drivers that report their transcript one character at a time can
//! feed it through a [`LineAssembler`] to get the complete lines the
//! [`SessionHooks`](crate::modem::SessionHooks) sinks expect.

use heapless::{String, Vec};

use crate::config::LINE_BUFFER_SIZE;

/// Stand-in for bytes of a line that is not valid UTF-8
const INVALID_BYTE: char = '?';

/// Collects bytes until a newline
///
/// `\r` is dropped, `\n` completes a line, empty lines are not reported, and
/// a line longer than the buffer is thrown away whole. Bytes are kept raw
/// and decoded as UTF-8 once the line is complete.
#[derive(Clone, Debug, Default)]
pub struct LineAssembler<const N: usize = LINE_BUFFER_SIZE> {
    buffer: Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> LineAssembler<N> {
    /// Create an empty assembler
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one byte; returns the finished line on `\n`
    pub fn push(&mut self, byte: u8) -> Option<String<N>> {
        match byte {
            b'\r' => None,
            b'\n' => {
                let bytes = core::mem::take(&mut self.buffer);
                let overflowed = core::mem::replace(&mut self.overflowed, false);
                if overflowed || bytes.is_empty() {
                    None
                } else {
                    Some(decode(bytes))
                }
            }
            _ => {
                if self.overflowed {
                    return None;
                }
                if self.buffer.push(byte).is_err() {
                    trace!("transcript line overflow, dropping");
                    self.buffer.clear();
                    self.overflowed = true;
                }
                None
            }
        }
    }

    /// Valid UTF-8 collected for the current line so far
    ///
    /// A multi-byte character still being received is left out.
    #[must_use]
    pub fn pending(&self) -> &str {
        match core::str::from_utf8(&self.buffer) {
            Ok(text) => text,
            Err(err) => core::str::from_utf8(&self.buffer[..err.valid_up_to()]).unwrap_or_default(),
        }
    }

    /// Drop the partial line
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }
}

/// Decode a complete line; if it is not UTF-8, keep ASCII and mark the rest
fn decode<const N: usize>(bytes: Vec<u8, N>) -> String<N> {
    let mut line = String::new();
    // One byte in, at most one byte out: always fits
    match core::str::from_utf8(&bytes) {
        Ok(text) => {
            let _ = line.push_str(text);
        }
        Err(_) => {
            for &b in &bytes {
                let _ = line.push(if b.is_ascii() { char::from(b) } else { INVALID_BYTE });
            }
        }
    }
    line
}
