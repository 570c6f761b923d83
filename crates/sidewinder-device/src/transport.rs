//! Transport seam between the device session and the HID layer.
//!
//! The session only needs three primitives: send a feature report, read a
//! feature report back, and read one fixed-size input report with a
//! caller-selected blocking mode. Everything here is synchronous; there is
//! no background thread or async suspension anywhere in this stack.

use crate::TransportError;

/// Blocking behavior of a single input-report read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Block until a report arrives.
    Blocking,
    /// Block for at most this many milliseconds; no data is a normal outcome.
    Timeout(u32),
    /// Return immediately; no data is a normal outcome.
    NonBlocking,
}

/// Synchronous HID transport used by a device session.
///
/// Implementations report byte counts truthfully so the session can detect
/// short writes; a read that yields `Ok(0)` means "no data" and is only
/// expected under [`ReadMode::Timeout`] or [`ReadMode::NonBlocking`].
pub trait HidTransport {
    /// Send a feature report (report ID in byte 0). Returns bytes written.
    fn send_feature_report(&mut self, data: &[u8]) -> Result<usize, TransportError>;

    /// Read the feature report with the given ID into `buf`. Returns bytes
    /// read, report ID byte included.
    fn get_feature_report(&mut self, report_id: u8, buf: &mut [u8])
        -> Result<usize, TransportError>;

    /// Read one input report into `buf`. Returns bytes read, `Ok(0)` when
    /// the mode permits returning without data.
    fn read_input_report(&mut self, buf: &mut [u8], mode: ReadMode)
        -> Result<usize, TransportError>;
}

pub mod mock {
    //! Scripted in-memory transport for session tests.

    use std::collections::{HashMap, VecDeque};

    use super::{HidTransport, ReadMode};
    use crate::TransportError;

    /// A transport that replays queued input reports and records every
    /// feature report sent to it.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        read_queue: VecDeque<Vec<u8>>,
        feature_store: HashMap<u8, Vec<u8>>,
        sent_reports: Vec<Vec<u8>>,
        /// Number of bytes the next sends claim to have written, if capped.
        short_send: Option<usize>,
        fail_sends: bool,
        fail_feature_gets: bool,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue one input report for a later read.
        pub fn queue_input(&mut self, report: impl Into<Vec<u8>>) {
            self.read_queue.push_back(report.into());
        }

        /// Set the bytes returned for a get of the given feature report ID.
        pub fn set_feature_report(&mut self, report_id: u8, data: impl Into<Vec<u8>>) {
            self.feature_store.insert(report_id, data.into());
        }

        /// Every feature report sent so far, oldest first.
        pub fn sent_reports(&self) -> &[Vec<u8>] {
            &self.sent_reports
        }

        /// Make subsequent sends fail outright.
        pub fn fail_sends(&mut self, fail: bool) {
            self.fail_sends = fail;
        }

        /// Make subsequent sends report a short write of `written` bytes.
        pub fn short_send(&mut self, written: Option<usize>) {
            self.short_send = written;
        }

        /// Make subsequent feature-report gets fail.
        pub fn fail_feature_gets(&mut self, fail: bool) {
            self.fail_feature_gets = fail;
        }
    }

    impl HidTransport for MockTransport {
        fn send_feature_report(&mut self, data: &[u8]) -> Result<usize, TransportError> {
            if self.fail_sends {
                return Err(TransportError::Write("mock send failure".to_string()));
            }
            self.sent_reports.push(data.to_vec());
            Ok(self.short_send.unwrap_or(data.len()))
        }

        fn get_feature_report(
            &mut self,
            report_id: u8,
            buf: &mut [u8],
        ) -> Result<usize, TransportError> {
            if self.fail_feature_gets {
                return Err(TransportError::Read("mock get failure".to_string()));
            }
            let data = self
                .feature_store
                .get(&report_id)
                .ok_or_else(|| TransportError::Read(format!("no feature report 0x{report_id:02X}")))?;
            let n = data.len().min(buf.len());
            buf[..n].copy_from_slice(&data[..n]);
            Ok(n)
        }

        fn read_input_report(
            &mut self,
            buf: &mut [u8],
            mode: ReadMode,
        ) -> Result<usize, TransportError> {
            match self.read_queue.pop_front() {
                Some(data) => {
                    let n = data.len().min(buf.len());
                    buf[..n].copy_from_slice(&data[..n]);
                    Ok(n)
                }
                None => match mode {
                    ReadMode::Blocking => Err(TransportError::Read(
                        "mock read queue exhausted under blocking read".to_string(),
                    )),
                    ReadMode::Timeout(_) | ReadMode::NonBlocking => Ok(0),
                },
            }
        }
    }

}
