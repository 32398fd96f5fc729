//! AT Command Recognition
//!
//! Classifies an outbound transcript line by its command prefix. Matching
//! is ASCII case-insensitive, the way the modem itself accepts commands.

/// Prefix shared by every AT command and its echo
pub const AT_PREFIX: &str = "AT";

/// `AT+SBDWB=<n>`: write binary MO buffer
pub const WRITE_BINARY_PREFIX: &str = "AT+SBDWB=";

/// `AT+SBDIX` / `AT+SBDIXA`: extended SBD session
pub const SESSION_PREFIX: &str = "AT+SBDIX";

/// `AT-MSSTM`: Iridium system time
pub const TICK_READ_PREFIX: &str = "AT-MSSTM";

/// Commands that only get a one-line description, longest prefix first
const DESCRIPTIONS: &[(&str, &str)] = &[
    ("AT+SBDMTA", "configure ring alerts"),
    ("AT+SBDREG", "network registration"),
    ("AT+SBDRB", "read MT message"),
    ("AT+SBDWT", "write text message"),
    ("AT+SBDD0", "clear MO buffer"),
    ("AT+SBDD1", "clear MT buffer"),
    ("AT+SBDD2", "clear MO and MT buffers"),
    ("AT+CSQF", "query signal quality (fast)"),
    ("AT+CGMR", "query firmware version"),
    ("AT+CGSN", "query IMEI"),
    ("AT+CRIS", "query ring indication"),
    ("AT+CSQ", "query signal quality"),
    ("AT&K0", "disable flow control"),
    ("AT&D0", "ignore DTR"),
    ("AT*F", "flush and power down"),
    ("ATE1", "enable echo"),
    ("ATE0", "disable echo"),
];

/// Outbound AT command, as far as the transcript cares
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum Command {
    /// `AT+SBDWB=<n>`; `len` is `None` if the argument does not parse
    WriteBinary {
        /// Announced payload length
        len: Option<usize>,
    },
    /// `AT+SBDIX` or `AT+SBDIXA`
    Session,
    /// `AT-MSSTM`
    TickRead,
    /// A command with a known short description
    Described(&'static str),
    /// Bare `AT` attention check
    Attention,
    /// Some other AT command
    Unrecognized,
}

impl Command {
    /// Classify an outbound line; `None` if it is not an AT command at all
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end();
        if !is_command(line) {
            return None;
        }

        if starts_with_ignore_case(line, WRITE_BINARY_PREFIX) {
            let len = line[WRITE_BINARY_PREFIX.len()..].trim().parse().ok();
            return Some(Self::WriteBinary { len });
        }
        if starts_with_ignore_case(line, SESSION_PREFIX) {
            return Some(Self::Session);
        }
        if starts_with_ignore_case(line, TICK_READ_PREFIX) {
            return Some(Self::TickRead);
        }
        if let Some(&(_, description)) = DESCRIPTIONS
            .iter()
            .find(|(prefix, _)| starts_with_ignore_case(line, prefix))
        {
            return Some(Self::Described(description));
        }
        if line.len() == AT_PREFIX.len() {
            return Some(Self::Attention);
        }

        Some(Self::Unrecognized)
    }
}

/// Symbols that introduce an extended AT command (`AT+CSQ`, `AT&K0`, ...)
const EXTENDED_SYMBOLS: &[u8] = b"+-&*%\\^#$";

/// Check if a line is an AT command (or the modem's echo of one)
///
/// After the `AT` prefix there must be nothing, an extended command symbol,
/// or a one-letter basic command followed by its numeric argument (`ATE1`,
/// `ATZ`). Free text that merely starts with "at" is not a command.
#[must_use]
pub fn is_command(line: &str) -> bool {
    if !starts_with_ignore_case(line, AT_PREFIX) {
        return false;
    }

    match &line.as_bytes()[AT_PREFIX.len()..] {
        [] => true,
        [first, ..] if EXTENDED_SYMBOLS.contains(first) => true,
        [letter, rest @ ..] if letter.is_ascii_alphabetic() => {
            rest.iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

/// ASCII case-insensitive `starts_with`
#[must_use]
pub fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.len() >= prefix.len()
        && line.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
