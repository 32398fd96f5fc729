//! MO Payload Framing
//!
//! The beacon sends `[len][ASCII bytes...]`: one length byte followed by at
//! most [`MAX_MESSAGE_LEN`] message bytes. Longer text is cut silently.

use heapless::Vec;

use crate::config::{MAX_MESSAGE_LEN, MO_BUFFER_SIZE};

/// Framed MO payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoPayload {
    bytes: Vec<u8, MO_BUFFER_SIZE>,
}

impl MoPayload {
    /// Frame a text message, truncating it to the maximum length
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Frame raw message bytes, truncating them to the maximum length
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_bytes(message: &[u8]) -> Self {
        let len = message.len().min(MAX_MESSAGE_LEN);
        let mut bytes = Vec::new();
        // Capacity is 1 + MAX_MESSAGE_LEN and len <= MAX_MESSAGE_LEN
        let _ = bytes.push(len as u8);
        let _ = bytes.extend_from_slice(&message[..len]);
        Self { bytes }
    }

    /// Value of the length byte
    #[must_use]
    pub fn message_len(&self) -> usize {
        usize::from(self.bytes[0])
    }

    /// Message bytes without the length prefix
    #[must_use]
    pub fn message(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// Whole buffer as handed to the modem
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Render received bytes for the console: printable ASCII as-is, anything
/// else as `.`
pub fn printable(bytes: &[u8]) -> impl Iterator<Item = char> + '_ {
    bytes.iter().map(|&b| {
        if (32..=126).contains(&b) {
            char::from(b)
        } else {
            '.'
        }
    })
}
