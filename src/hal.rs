//! Hardware Abstraction Layer
//!
//! Adapters from STM32G474 peripherals to the collaborator traits the core
//! is written against. Nothing in here knows about SBD.

pub mod board;
pub mod gpio;
pub mod serial;
pub mod timer;
