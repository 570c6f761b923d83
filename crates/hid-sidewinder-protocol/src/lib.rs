//! HID protocol implementation for the Microsoft SideWinder Strategic
//! Commander (USB VID 0x045E, PID 0x0033).
//!
//! This crate is intentionally I/O-free: it provides pure codecs and state
//! types that can be tested without hardware or OS-level HID plumbing.
//!
//! - [`input`]: 7-byte input-report decoding (three 10-bit two's-complement
//!   axes packed across byte boundaries, a 12-bit button word, and the
//!   3-position slider nibble).
//! - [`led`]: the LED bank (on/off/blink per backlit button, dirty
//!   tracking) and the 3-byte feature-report codecs for LED state and
//!   blink interval.
//! - [`events`]: derivation of ordered, discrete change events from two
//!   input snapshots.
//!
//! Device I/O lives in the `sidewinder-device` crate.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod events;
pub mod ids;
pub mod input;
pub mod led;
pub mod types;

pub use events::{append_events, diff_states, InputEvent};
pub use ids::{
    report_ids, FEATURE_REPORT_LEN, INPUT_REPORT_LEN, SIDEWINDER_VENDOR_ID,
    STRATEGIC_COMMANDER_PRODUCT_ID,
};
pub use input::{pack_input_report, parse_input_report, sign_extend_axis};
pub use led::{BlinkInterval, LedBank};
pub use types::{Axis, Button, InputState, LedButton, LedState, SliderPosition, LED_COUNT};

use thiserror::Error;

/// Errors produced by the report codecs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("report too short: expected {expected} bytes, got {actual}")]
    ReportTooShort { expected: usize, actual: usize },

    #[error("unexpected report ID: 0x{found:02X}")]
    UnexpectedReportId { found: u8 },
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
