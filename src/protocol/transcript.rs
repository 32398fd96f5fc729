//! Transcript Classifier
//!
//! Turns the modem's raw AT console transcript into an operator log.
//!
//! The driver reports every line it writes (`TX`) or reads (`RX`) plus its
//! own free-form diagnostics. Depending on [`Verbosity`] the classifier
//! prints nothing, echoes everything, or groups the chatter into one-liners:
//!
//! ```text
//! TX AT+SBDWB=6          →  (blank)
//!                           begin binary write (6 bytes)
//! RX READY               →  write ready, expecting 6 bytes
//! RX 0                   →  checksum accepted
//! RX OK                  →  write complete
//! TX AT+SBDIX            →  (blank)
//!                           begin session (send/receive)
//! RX +SBDIX: 0, 12, ...  →  SBDIX: MO=0 (success), MOMSN=12, ...
//! ```
//!
//! Whatever the verbosity, `+SBDIX:` records are always parsed so the send
//! outcome can be reported.

use core::fmt::{self, Write};

use crate::protocol::command::{self, Command};
use crate::protocol::status::{self, SessionResult, LEGEND, SBDIX_PREFIX};
use crate::types::{Direction, Verbosity};

/// `-MSSTM:` system time response
const TICK_RESPONSE_PREFIX: &str = "-MSSTM:";

/// `+CSQ:` / `+CSQF:` signal quality response
const SIGNAL_PREFIXES: &[&str] = &["+CSQ:", "+CSQF:"];

/// Driver note printed while it waits on the modem
const PENDING_WAIT_PREFIX: &str = "Waiting for response";

/// Command whose responses are currently being grouped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum ActiveCommand {
    /// Nothing tracked
    #[default]
    None,
    /// `AT+SBDWB` binary upload
    WriteBinary,
    /// `AT+SBDIX` session
    Session,
    /// `AT-MSSTM` pacing read
    TickRead,
    /// Anything else
    Other,
}

/// Grouping state carried between lines
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub struct TranscriptContext {
    /// Command in flight
    pub active: ActiveCommand,
    /// Byte count announced by `AT+SBDWB=<n>`
    pub expected_bytes: Option<usize>,
    /// Modem answered `READY` to the write
    pub write_ready: bool,
}

impl TranscriptContext {
    /// Initial (reset) value
    pub const INITIAL: Self = Self {
        active: ActiveCommand::None,
        expected_bytes: None,
        write_ready: false,
    };

    /// Start tracking a new command
    fn begin(&mut self, active: ActiveCommand, expected_bytes: Option<usize>) {
        *self = Self {
            active,
            expected_bytes,
            write_ready: false,
        };
    }

    /// Back to the initial value
    pub fn reset(&mut self) {
        *self = Self::INITIAL;
    }
}

/// Stateful transcript renderer
#[derive(Clone, Debug)]
pub struct Transcript {
    verbosity: Verbosity,
    context: TranscriptContext,
    session: SessionResult,
    legend_shown: bool,
}

impl Transcript {
    /// Create a classifier with a fixed verbosity
    #[must_use]
    pub const fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            context: TranscriptContext::INITIAL,
            session: SessionResult::UNSEEN,
            legend_shown: false,
        }
    }

    /// Verbosity chosen at construction
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Current grouping context
    #[must_use]
    pub const fn context(&self) -> TranscriptContext {
        self.context
    }

    /// Latest session status record
    #[must_use]
    pub const fn session(&self) -> &SessionResult {
        &self.session
    }

    /// Read the latest session status and clear it for the next attempt
    pub fn take_session(&mut self) -> SessionResult {
        self.session.take()
    }

    /// Check if the legend has been printed
    #[must_use]
    pub const fn legend_shown(&self) -> bool {
        self.legend_shown
    }

    /// Ingest one line of the AT console transcript
    pub fn console_line<W: Write + ?Sized>(&mut self, direction: Direction, line: &str, out: &mut W) {
        let _ = match self.verbosity {
            Verbosity::Quiet => {
                self.record_status(line);
                Ok(())
            }
            Verbosity::Verbose => self.echo(direction.tag(), line, out),
            Verbosity::Compact => match direction {
                Direction::Tx => self.outbound(line, out),
                Direction::Rx => self.inbound(line, out),
            },
        };
    }

    /// Ingest one line of driver diagnostics
    pub fn diagnostic_line<W: Write + ?Sized>(&mut self, line: &str, out: &mut W) {
        let _ = match self.verbosity {
            Verbosity::Quiet => {
                self.record_status(line);
                Ok(())
            }
            Verbosity::Verbose => {
                self.record_status(line);
                if line.trim().is_empty() {
                    Ok(())
                } else {
                    writeln!(out, "DBG: {}", line.trim_end())
                }
            }
            Verbosity::Compact => self.inbound(line, out),
        };
    }

    /// Print the `+SBDIX` field legend, once per classifier
    ///
    /// Returns `true` if this call printed it.
    pub fn print_legend<W: Write + ?Sized>(&mut self, out: &mut W) -> bool {
        if self.legend_shown {
            return false;
        }
        self.legend_shown = true;

        let _ = write_legend(out);
        true
    }

    /// Parse a status record into `session`; failures leave it untouched
    fn record_status(&mut self, line: &str) -> Option<SessionResult> {
        let parsed = status::parse_sbdix(line.trim())?;
        debug!(
            "sbdix: mo={} momsn={} mt={} mtq={}",
            parsed.mo_status,
            parsed.mo_msn,
            parsed.mt_status,
            parsed.mt_queued
        );
        self.session = parsed;
        Some(parsed)
    }

    /// VERBOSE console: tagged raw line, plus the long summary for status records
    fn echo<W: Write + ?Sized>(&mut self, tag: &str, line: &str, out: &mut W) -> fmt::Result {
        writeln!(out, "{tag}: {}", line.trim_end())?;

        if let Some(parsed) = self.record_status(line) {
            if !self.legend_shown {
                self.legend_shown = true;
                write_legend(out)?;
            }
            parsed.write_verbose(out)?;
        }
        Ok(())
    }

    /// COMPACT: a line written to the modem
    fn outbound<W: Write + ?Sized>(&mut self, line: &str, out: &mut W) -> fmt::Result {
        let Some(cmd) = Command::parse(line) else {
            // Raw text sent outside a command goes through the response rules
            return self.inbound(line, out);
        };

        match cmd {
            Command::WriteBinary { len } => {
                self.context.begin(ActiveCommand::WriteBinary, len);
                writeln!(out)?;
                match len {
                    Some(n) => writeln!(out, "begin binary write ({n} bytes)"),
                    None => writeln!(out, "begin binary write"),
                }
            }
            Command::Session => {
                self.context.begin(ActiveCommand::Session, None);
                writeln!(out)?;
                writeln!(out, "begin session (send/receive)")
            }
            Command::TickRead => {
                self.context.begin(ActiveCommand::TickRead, None);
                writeln!(out, "tick read")
            }
            Command::Described(description) => {
                self.context.begin(ActiveCommand::Other, None);
                writeln!(out, "{description}")
            }
            Command::Attention => {
                self.context.begin(ActiveCommand::Other, None);
                writeln!(out, "attention check")
            }
            Command::Unrecognized => {
                self.context.begin(ActiveCommand::Other, None);
                writeln!(out, "command {}", line.trim())
            }
        }
    }

    /// COMPACT: a line read from the modem (or a diagnostic line)
    fn inbound<W: Write + ?Sized>(&mut self, line: &str, out: &mut W) -> fmt::Result {
        let text = line.trim();
        let writing = self.context.active == ActiveCommand::WriteBinary;

        if text.is_empty() || command::is_command(text) || text.starts_with('[') {
            return Ok(());
        }

        if writing && text == "READY" {
            self.context.write_ready = true;
            return match self.context.expected_bytes {
                Some(n) => writeln!(out, "write ready, expecting {n} bytes"),
                None => writeln!(out, "write ready"),
            };
        }

        if writing && text == "0" {
            return writeln!(out, "checksum accepted");
        }

        if text == "OK" {
            if writing && self.context.write_ready {
                self.context.reset();
                return writeln!(out, "write complete");
            }
            return Ok(());
        }

        if text.starts_with(TICK_RESPONSE_PREFIX) {
            return writeln!(out, "pacing tick read");
        }

        if let Some(quality) = SIGNAL_PREFIXES
            .iter()
            .find_map(|prefix| text.strip_prefix(prefix))
        {
            return writeln!(out, "signal quality: {}", quality.trim());
        }

        if text.starts_with(SBDIX_PREFIX) {
            if let Some(parsed) = self.record_status(text) {
                return parsed.write_compact(out);
            }
            trace!("malformed sbdix record");
        }

        if text.starts_with(PENDING_WAIT_PREFIX) {
            return Ok(());
        }

        if text == "ERROR" {
            return writeln!(out, "command error");
        }

        writeln!(out, "{}", line.trim_end())
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(crate::config::VERBOSITY)
    }
}

fn write_legend<W: Write + ?Sized>(out: &mut W) -> fmt::Result {
    writeln!(out)?;
    for line in LEGEND {
        writeln!(out, "{line}")?;
    }
    writeln!(out)
}
