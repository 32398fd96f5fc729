//! SBD Protocol Helpers
//!
//! Everything the core knows about the RockBLOCK's text protocol: which AT
//! commands exist, how the `+SBDIX` status record is laid out, how the raw
//! console transcript is rendered for an operator, and how an MO payload is
//! framed.

pub mod command;
pub mod line;
pub mod payload;
pub mod status;
pub mod transcript;
