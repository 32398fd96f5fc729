//! User Interface
//!
//! One RGB status indicator and two push buttons. No display, no menus:
//! the indicator state machine and button edge detection are all there is.

pub mod button;
pub mod indicator;
