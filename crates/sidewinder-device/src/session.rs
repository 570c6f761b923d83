//! Device sessions: one open Strategic Commander with its cached state.

use std::ffi::CStr;

use hidapi::HidApi;
use tracing::{debug, trace};

use hid_sidewinder_protocol::{
    append_events, parse_input_report, report_ids, Axis, BlinkInterval, Button, InputEvent,
    InputState, LedBank, LedButton, LedState, SliderPosition, FEATURE_REPORT_LEN,
    INPUT_REPORT_LEN,
};

use crate::hid::HidapiTransport;
use crate::transport::{HidTransport, ReadMode};
use crate::{DeviceResult, TransportError};

/// One open device plus its session-owned caches: the LED bank, the
/// blink-interval pair, and the most recent input snapshot.
///
/// Sessions are single-threaded by design; callers needing concurrent
/// access must serialize it themselves. Independent sessions on distinct
/// devices share no state.
pub struct DeviceSession<T: HidTransport> {
    transport: T,
    leds: LedBank,
    blink: BlinkInterval,
    input: InputState,
}

impl DeviceSession<HidapiTransport> {
    /// Open the first connected Strategic Commander.
    pub fn open(api: &HidApi) -> DeviceResult<Self> {
        Ok(Self::from_transport(HidapiTransport::open_first(api)?))
    }

    /// Open a device on an explicit platform path.
    pub fn open_path(api: &HidApi, path: &CStr) -> DeviceResult<Self> {
        Ok(Self::from_transport(HidapiTransport::open_path(api, path)?))
    }
}

impl<T: HidTransport> DeviceSession<T> {
    /// Build a session over any transport and read back the device's LED
    /// and blink state.
    ///
    /// The read-back is best effort: on failure the caches stay zeroed and
    /// the LED bank keeps its unflushed flag, so the first flush will push
    /// a known state to the device.
    pub fn from_transport(transport: T) -> Self {
        let mut session = Self {
            transport,
            leds: LedBank::new(),
            blink: BlinkInterval::default(),
            input: InputState::default(),
        };
        if let Err(e) = session.read_led_state() {
            debug!("LED read-back at open failed: {e}");
        }
        if let Err(e) = session.read_blink_interval() {
            debug!("blink-interval read-back at open failed: {e}");
        }
        session
    }

    /// Release the session. The underlying handle closes on drop.
    pub fn close(self) {}

    /// The transport behind this session.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport, for fault injection in tests.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // --- input ---

    /// Read one input report, blocking until the device produces one.
    pub fn read_input(&mut self) -> DeviceResult<InputState> {
        match self.read_with_mode(ReadMode::Blocking)? {
            Some(state) => Ok(state),
            // A blocking read only legitimately returns with a full report.
            None => Err(TransportError::ShortRead {
                got: 0,
                expected: INPUT_REPORT_LEN,
            }
            .into()),
        }
    }

    /// Read one input report, waiting at most `timeout_ms` milliseconds.
    /// `Ok(None)` means the timeout elapsed without data.
    pub fn read_input_timeout(
        &mut self,
        timeout_ms: u32,
    ) -> DeviceResult<Option<InputState>> {
        self.read_with_mode(ReadMode::Timeout(timeout_ms))
    }

    /// Poll for one input report without blocking. `Ok(None)` means no
    /// report was pending.
    pub fn read_input_non_blocking(&mut self) -> DeviceResult<Option<InputState>> {
        self.read_with_mode(ReadMode::NonBlocking)
    }

    /// Read with the given mode and return the events between the previous
    /// and the new cached snapshot. No data yields an empty batch.
    pub fn poll_events(&mut self, mode: ReadMode) -> DeviceResult<Vec<InputEvent>> {
        let previous = self.input;
        let mut events = Vec::new();
        if let Some(new) = self.read_with_mode(mode)? {
            append_events(&mut events, &previous, &new);
        }
        Ok(events)
    }

    fn read_with_mode(&mut self, mode: ReadMode) -> DeviceResult<Option<InputState>> {
        let mut report = [0u8; INPUT_REPORT_LEN];
        let n = self.transport.read_input_report(&mut report, mode)?;
        if n == 0 && !matches!(mode, ReadMode::Blocking) {
            return Ok(None);
        }
        if n != INPUT_REPORT_LEN {
            return Err(TransportError::ShortRead {
                got: n,
                expected: INPUT_REPORT_LEN,
            }
            .into());
        }
        // Decode before touching the cache; a bad report must not leave a
        // partially updated snapshot behind.
        let state = parse_input_report(&report)?;
        trace!(?state, "input report");
        self.input = state;
        Ok(Some(state))
    }

    /// The most recent successfully decoded snapshot.
    pub fn input_state(&self) -> InputState {
        self.input
    }

    /// Whether `button` is pressed in the cached snapshot. No I/O.
    pub fn is_button_pressed(&self, button: Button) -> bool {
        self.input.is_pressed(button)
    }

    /// Value of `axis` in the cached snapshot. No I/O.
    pub fn axis_value(&self, axis: Axis) -> i16 {
        self.input.axis(axis)
    }

    /// Slider detent in the cached snapshot. No I/O.
    pub fn slider_position(&self) -> SliderPosition {
        self.input.slider
    }

    // --- LEDs ---

    /// Cached state of one LED. No I/O.
    pub fn led_state(&self, led: LedButton) -> LedState {
        self.leds.get(led)
    }

    /// Change one LED in the cache only; batch several of these and write
    /// them out with a single [`flush_leds`](Self::flush_leds).
    pub fn set_led_no_flush(&mut self, led: LedButton, state: LedState) {
        self.leds.set(led, state);
    }

    /// Change one LED and flush immediately.
    pub fn set_led(&mut self, led: LedButton, state: LedState) -> DeviceResult<()> {
        self.set_led_no_flush(led, state);
        self.flush_leds()
    }

    /// Write the cached LED bank to the device.
    ///
    /// On failure the cache keeps both the mutated target state and the
    /// dirty flag, so a retry sends the current intent rather than a stale
    /// snapshot. The write carries the full bank, so retries are idempotent.
    pub fn flush_leds(&mut self) -> DeviceResult<()> {
        let report = self.leds.encode_feature_report();
        let written = self.transport.send_feature_report(&report)?;
        if written != report.len() {
            return Err(TransportError::ShortWrite {
                written,
                expected: report.len(),
            }
            .into());
        }
        self.leds.mark_flushed();
        debug!(report = ?report, "flushed LED state");
        Ok(())
    }

    /// Whether the cached LED bank differs from the last device-confirmed
    /// state. No I/O.
    pub fn has_unflushed_led_changes(&self) -> bool {
        self.leds.has_unflushed_changes()
    }

    /// Read the LED bank back from the device, discarding any unflushed
    /// local changes.
    pub fn read_led_state(&mut self) -> DeviceResult<()> {
        let mut report = [0u8; FEATURE_REPORT_LEN];
        let n = self
            .transport
            .get_feature_report(report_ids::LED_STATE, &mut report)?;
        if n != report.len() {
            return Err(TransportError::ShortRead {
                got: n,
                expected: report.len(),
            }
            .into());
        }
        self.leds.decode_feature_report(&report)?;
        Ok(())
    }

    // --- blink interval ---

    /// Cached blink interval. No I/O.
    pub fn blink_interval(&self) -> BlinkInterval {
        self.blink
    }

    /// Set the blink timing shared by all LEDs.
    ///
    /// This is a fire-and-forget write; the cached pair is only updated by
    /// [`read_blink_interval`](Self::read_blink_interval).
    pub fn set_blink_interval(&mut self, on_time: u8, off_time: u8) -> DeviceResult<()> {
        let report = BlinkInterval::new(on_time, off_time).encode_feature_report();
        let written = self.transport.send_feature_report(&report)?;
        if written != report.len() {
            return Err(TransportError::ShortWrite {
                written,
                expected: report.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Read the blink interval back from the device and overwrite the cache.
    pub fn read_blink_interval(&mut self) -> DeviceResult<BlinkInterval> {
        let mut report = [0u8; FEATURE_REPORT_LEN];
        let n = self
            .transport
            .get_feature_report(report_ids::BLINK_INTERVAL, &mut report)?;
        if n != report.len() {
            return Err(TransportError::ShortRead {
                got: n,
                expected: report.len(),
            }
            .into());
        }
        self.blink = BlinkInterval::decode_feature_report(&report)?;
        Ok(self.blink)
    }
}
