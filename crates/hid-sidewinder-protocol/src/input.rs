//! Input-report decoding and encoding.
//!
//! All functions are pure and allocation-free.
//!
//! ## Report layout (7 bytes, report ID included)
//!
//! ```text
//! b0 = 0x01 (report ID)
//!   {--b1---}  {--b2---}  {--b3---}  {--b4---}
//!   XXXX XXXX  YYYY YYXX  ZZZZ YYYY  00ZZ ZZZZ
//! b5, low nibble of b6 = button word (bit per button)
//! high nibble of b6    = slider (0x30 = pos 1, 0x20 = pos 2, 0x10 = pos 3)
//! ```
//!
//! Each axis is a 10-bit two's-complement value split across byte
//! boundaries; bits in higher report bytes are higher-order bits of the
//! axis. The top two bits of `b4` are reserved and always zero on real
//! hardware, but are not validated.

#![deny(static_mut_refs)]

use crate::ids::{report_ids, INPUT_REPORT_LEN};
use crate::types::{InputState, SliderPosition};
use crate::{ProtocolError, ProtocolResult};

/// Sign-extend a raw 10-bit axis field to `i16`.
///
/// Bit 9 is the sign bit; negative values are recovered by two's-complement
/// negation over the 10-bit field.
pub fn sign_extend_axis(raw: u16) -> i16 {
    let raw = raw & 0x3FF;
    if raw & 0x200 != 0 {
        -(((raw ^ 0x3FF) + 1) as i16)
    } else {
        raw as i16
    }
}

/// Mask a signed axis value back to its raw 10-bit wire field.
pub fn axis_to_raw(value: i16) -> u16 {
    (value as u16) & 0x3FF
}

/// Decode a Strategic Commander input report into an [`InputState`].
///
/// Accepts every bit pattern in bytes 1–6; the only validation is the
/// report ID in byte 0. Slider patterns with neither the 0x20 nor the 0x10
/// bit set fold to [`SliderPosition::Position3`], matching what the device
/// actually emits.
///
/// # Errors
///
/// [`ProtocolError::ReportTooShort`] if `data` holds fewer than 7 bytes,
/// [`ProtocolError::UnexpectedReportId`] if byte 0 is not 0x01.
pub fn parse_input_report(data: &[u8]) -> ProtocolResult<InputState> {
    if data.len() < INPUT_REPORT_LEN {
        return Err(ProtocolError::ReportTooShort {
            expected: INPUT_REPORT_LEN,
            actual: data.len(),
        });
    }
    if data[0] != report_ids::INPUT {
        return Err(ProtocolError::UnexpectedReportId { found: data[0] });
    }

    let buttons = (u16::from(data[6] & 0x0F) << 8) | u16::from(data[5]);

    let slider = if data[6] & 0x30 == 0x30 {
        SliderPosition::Position1
    } else if data[6] & 0x20 != 0 {
        SliderPosition::Position2
    } else {
        SliderPosition::Position3
    };

    let axis_x = sign_extend_axis((u16::from(data[2] & 0x03) << 8) | u16::from(data[1]));
    let axis_y =
        sign_extend_axis((u16::from(data[3] & 0x0F) << 6) | (u16::from(data[2] & 0xFC) >> 2));
    let axis_z =
        sign_extend_axis((u16::from(data[4] & 0x3F) << 4) | (u16::from(data[3] & 0xF0) >> 4));

    Ok(InputState {
        buttons,
        slider,
        axis_x,
        axis_y,
        axis_z,
    })
}

/// Encode an [`InputState`] into the 7-byte input-report wire format.
///
/// Inverse of [`parse_input_report`] over in-range states. Useful for test
/// fixtures and device simulation; the device itself is the only producer
/// of real input reports.
pub fn pack_input_report(state: &InputState) -> [u8; INPUT_REPORT_LEN] {
    let x = axis_to_raw(state.axis_x);
    let y = axis_to_raw(state.axis_y);
    let z = axis_to_raw(state.axis_z);

    let slider_bits: u8 = match state.slider {
        SliderPosition::Position1 => 0x30,
        SliderPosition::Position2 => 0x20,
        SliderPosition::Position3 => 0x10,
    };

    [
        report_ids::INPUT,
        (x & 0xFF) as u8,
        (((x >> 8) & 0x03) as u8) | (((y & 0x3F) << 2) as u8),
        (((y >> 6) & 0x0F) as u8) | (((z & 0x0F) << 4) as u8),
        ((z >> 4) & 0x3F) as u8,
        (state.buttons & 0xFF) as u8,
        (((state.buttons >> 8) & 0x0F) as u8) | slider_bits,
    ]
}
