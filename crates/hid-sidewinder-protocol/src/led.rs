//! LED bank state and feature-report codecs.
//!
//! The device keeps LED state in a 16-bit bitmask with two bits per LED
//! group: an ON bit at an even position and a BLINK bit one position above
//! it. Setting both bits of a group makes the device reject the feature
//! report, so the bank stores an explicit [`LedState`] per group and only
//! produces the packed bitmask at the report boundary, where the invalid
//! combination cannot be expressed.
//!
//! Feature-report wire formats (3 bytes each):
//! - LED state: `[0x01, bitmask_lo, bitmask_hi]`, identical for set and get.
//! - Blink interval: `[0x02, on_time, off_time]`, shared by all LEDs.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};

use crate::ids::{report_ids, FEATURE_REPORT_LEN};
use crate::types::{LedButton, LedState, LED_COUNT};
use crate::{ProtocolError, ProtocolResult};

/// Cached on/blink state of all seven LED groups plus a dirty flag.
///
/// Mutations are local; callers batch any number of [`LedBank::set`] calls
/// and write the bank out in a single feature report produced by
/// [`LedBank::encode_feature_report`]. The dirty flag tracks whether the
/// cached state has been confirmed by the device since the last mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedBank {
    states: [LedState; LED_COUNT],
    dirty: bool,
}

impl Default for LedBank {
    /// An all-off bank that has never been confirmed by the device.
    fn default() -> Self {
        Self {
            states: [LedState::Off; LED_COUNT],
            dirty: true,
        }
    }
}

impl LedBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one LED group without any I/O, marking the bank dirty.
    ///
    /// The `All` and `NoLed` sentinels are query-only; setting them is a
    /// no-op and leaves the dirty flag alone.
    pub fn set(&mut self, led: LedButton, state: LedState) {
        let Some(idx) = led.index() else {
            return;
        };
        self.states[idx] = state;
        self.dirty = true;
    }

    /// Cached state of one LED group. Sentinels always read as `Off`.
    pub fn get(&self, led: LedButton) -> LedState {
        match led.index() {
            Some(idx) => self.states[idx],
            None => LedState::Off,
        }
    }

    /// Whether the cached state differs from the last device-confirmed state.
    pub fn has_unflushed_changes(&self) -> bool {
        self.dirty
    }

    /// Record that the cached state was written to the device verbatim.
    pub fn mark_flushed(&mut self) {
        self.dirty = false;
    }

    /// Pack the bank into its 16-bit wire bitmask.
    ///
    /// Each group occupies two bits; `On` sets the low bit, `Blink` the high
    /// bit, never both.
    pub fn to_bitmask(&self) -> u16 {
        let mut mask = 0u16;
        for (idx, state) in self.states.iter().enumerate() {
            let on_bit = 1u16 << (2 * idx);
            match state {
                LedState::On => mask |= on_bit,
                LedState::Blink => mask |= on_bit << 1,
                LedState::Off => {}
            }
        }
        mask
    }

    /// Encode the LED-state feature report for this bank.
    pub fn encode_feature_report(&self) -> [u8; FEATURE_REPORT_LEN] {
        let mask = self.to_bitmask();
        [report_ids::LED_STATE, (mask & 0xFF) as u8, (mask >> 8) as u8]
    }

    /// Overwrite the bank from a LED-state feature report read back from the
    /// device, clearing the dirty flag.
    ///
    /// The device is treated as ground truth: any unflushed local intent is
    /// discarded. A corrupted readout with both bits of a group set decodes
    /// as `On` (the ON bit wins).
    ///
    /// # Errors
    ///
    /// [`ProtocolError::ReportTooShort`] if `data` holds fewer than 3 bytes,
    /// [`ProtocolError::UnexpectedReportId`] if byte 0 is not 0x01.
    pub fn decode_feature_report(&mut self, data: &[u8]) -> ProtocolResult<()> {
        if data.len() < FEATURE_REPORT_LEN {
            return Err(ProtocolError::ReportTooShort {
                expected: FEATURE_REPORT_LEN,
                actual: data.len(),
            });
        }
        if data[0] != report_ids::LED_STATE {
            return Err(ProtocolError::UnexpectedReportId { found: data[0] });
        }
        let mask = u16::from(data[1]) | (u16::from(data[2]) << 8);
        for (idx, state) in self.states.iter_mut().enumerate() {
            let on_bit = 1u16 << (2 * idx);
            *state = if mask & on_bit != 0 {
                LedState::On
            } else if mask & (on_bit << 1) != 0 {
                LedState::Blink
            } else {
                LedState::Off
            };
        }
        self.dirty = false;
        Ok(())
    }
}

/// Shared blink timing for all LED groups, in device time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlinkInterval {
    pub on_time: u8,
    pub off_time: u8,
}

impl BlinkInterval {
    pub fn new(on_time: u8, off_time: u8) -> Self {
        Self { on_time, off_time }
    }

    /// Encode the blink-interval feature report.
    pub fn encode_feature_report(&self) -> [u8; FEATURE_REPORT_LEN] {
        [report_ids::BLINK_INTERVAL, self.on_time, self.off_time]
    }

    /// Decode a blink-interval feature report read back from the device.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::ReportTooShort`] if `data` holds fewer than 3 bytes,
    /// [`ProtocolError::UnexpectedReportId`] if byte 0 is not 0x02.
    pub fn decode_feature_report(data: &[u8]) -> ProtocolResult<Self> {
        if data.len() < FEATURE_REPORT_LEN {
            return Err(ProtocolError::ReportTooShort {
                expected: FEATURE_REPORT_LEN,
                actual: data.len(),
            });
        }
        if data[0] != report_ids::BLINK_INTERVAL {
            return Err(ProtocolError::UnexpectedReportId { found: data[0] });
        }
        Ok(Self {
            on_time: data[1],
            off_time: data[2],
        })
    }
}
