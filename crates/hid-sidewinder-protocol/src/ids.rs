//! USB identifiers and report-layout constants for the Strategic Commander.
//!
//! The device enumerates as a vendor-specific HID joystick. All traffic uses
//! two fixed-size reports: a 7-byte input report streamed on the interrupt
//! endpoint and a 3-byte feature report shared by the LED bitmask
//! (report ID 0x01) and the blink interval (report ID 0x02).

#![deny(static_mut_refs)]

/// Microsoft USB vendor ID.
pub const SIDEWINDER_VENDOR_ID: u16 = 0x045E;

/// Strategic Commander product ID.
pub const STRATEGIC_COMMANDER_PRODUCT_ID: u16 = 0x0033;

/// Report IDs used by the Strategic Commander.
pub mod report_ids {
    /// Input report carrying axes, buttons, and the slider.
    pub const INPUT: u8 = 0x01;
    /// Feature report carrying the 16-bit LED on/blink bitmask.
    pub const LED_STATE: u8 = 0x01;
    /// Feature report carrying the shared LED blink interval.
    pub const BLINK_INTERVAL: u8 = 0x02;
}

/// Wire size of the input report, report ID included.
pub const INPUT_REPORT_LEN: usize = 7;

/// Wire size of both feature reports, report ID included.
pub const FEATURE_REPORT_LEN: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids() {
        assert_eq!(SIDEWINDER_VENDOR_ID, 0x045E);
        assert_eq!(STRATEGIC_COMMANDER_PRODUCT_ID, 0x0033);
        assert_eq!(report_ids::INPUT, report_ids::LED_STATE);
        assert_ne!(report_ids::LED_STATE, report_ids::BLINK_INTERVAL);
    }
}
