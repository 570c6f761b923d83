//! Device sessions for the Microsoft SideWinder Strategic Commander.
//!
//! Builds on [`hid_sidewinder_protocol`] for all report codecs and adds the
//! I/O half: device discovery and opening over `hidapi`, input reads in
//! blocking / timeout / non-blocking modes, and the lazily flushed LED and
//! blink-interval feature-report plumbing.
//!
//! The [`transport::HidTransport`] trait is the only seam touching the OS;
//! [`transport::mock`] provides a scripted implementation so session
//! behavior is testable without hardware.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod hid;
pub mod session;
pub mod transport;

pub use hid::{enumerate, HidapiTransport};
pub use session::DeviceSession;
pub use transport::{HidTransport, ReadMode};

use hid_sidewinder_protocol::ProtocolError;
use thiserror::Error;

/// I/O failures at the HID transport boundary.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to open device: {0}")]
    Open(String),

    #[error("failed to read from device: {0}")]
    Read(String),

    #[error("failed to write to device: {0}")]
    Write(String),

    #[error("short write: wrote {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    #[error("short read: got {got} of {expected} bytes")]
    ShortRead { got: usize, expected: usize },
}

/// Errors surfaced by device sessions.
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("no Strategic Commander found (VID 0x045E, PID 0x0033)")]
    NotFound,

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

pub type DeviceResult<T> = Result<T, DeviceError>;
