//! Session behavior against the scripted mock transport.

use hid_sidewinder_protocol::{
    pack_input_report, Axis, Button, InputEvent, InputState, LedButton, LedState, SliderPosition,
};
use sidewinder_device::transport::mock::MockTransport;
use sidewinder_device::{DeviceError, DeviceSession, ReadMode, TransportError};

fn mock_with_device_state() -> MockTransport {
    let mut mock = MockTransport::new();
    // Device answers both feature-report gets at open time.
    mock.set_feature_report(0x01, [0x01, 0x00, 0x00]);
    mock.set_feature_report(0x02, [0x02, 30, 60]);
    mock
}

#[test]
fn open_reads_back_led_and_blink_state() {
    let mut mock = mock_with_device_state();
    mock.set_feature_report(0x01, [0x01, 0x01, 0x00]); // button 1 lit

    let session = DeviceSession::from_transport(mock);
    assert!(!session.has_unflushed_led_changes());
    assert_eq!(session.led_state(LedButton::Button1), LedState::On);
    assert_eq!(session.blink_interval().on_time, 30);
    assert_eq!(session.blink_interval().off_time, 60);
}

#[test]
fn open_survives_failed_read_back() {
    let mut mock = MockTransport::new();
    mock.fail_feature_gets(true);

    let session = DeviceSession::from_transport(mock);
    // Nothing confirmed by the device yet: zeroed caches, dirty bank.
    assert!(session.has_unflushed_led_changes());
    assert_eq!(session.led_state(LedButton::Rec), LedState::Off);
    assert_eq!(session.blink_interval().on_time, 0);
}

#[test]
fn blocking_read_decodes_and_caches() {
    let mut mock = mock_with_device_state();
    let snapshot = InputState {
        buttons: Button::Shift1.bit(),
        slider: SliderPosition::Position2,
        axis_x: -17,
        axis_y: 511,
        axis_z: -512,
    };
    mock.queue_input(pack_input_report(&snapshot));

    let mut session = DeviceSession::from_transport(mock);
    let state = session.read_input().expect("read");
    assert_eq!(state, snapshot);
    assert_eq!(session.input_state(), snapshot);
    assert!(session.is_button_pressed(Button::Shift1));
    assert_eq!(session.axis_value(Axis::Y), 511);
    assert_eq!(session.slider_position(), SliderPosition::Position2);
}

#[test]
fn polling_reads_report_no_data_as_none() {
    let mut session = DeviceSession::from_transport(mock_with_device_state());
    assert!(session
        .read_input_non_blocking()
        .expect("poll")
        .is_none());
    assert!(session.read_input_timeout(5).expect("poll").is_none());
}

#[test]
fn decode_failure_leaves_cached_snapshot_untouched() {
    let mut mock = mock_with_device_state();
    let good = InputState {
        axis_z: 42,
        ..InputState::default()
    };
    mock.queue_input(pack_input_report(&good));
    mock.queue_input([0x07, 0, 0, 0, 0, 0, 0]); // wrong report ID

    let mut session = DeviceSession::from_transport(mock);
    session.read_input().expect("first read");
    let err = session.read_input().expect_err("bad report must fail");
    assert!(matches!(err, DeviceError::Protocol(_)));
    assert_eq!(session.input_state(), good);
}

#[test]
fn short_read_is_a_transport_error() {
    let mut mock = mock_with_device_state();
    mock.queue_input([0x01, 0x00, 0x00]); // truncated report

    let mut session = DeviceSession::from_transport(mock);
    let err = session.read_input().expect_err("short read must fail");
    assert!(matches!(
        err,
        DeviceError::Transport(TransportError::ShortRead { got: 3, expected: 7 })
    ));
}

#[test]
fn flush_sends_full_state_write() {
    let mut session = DeviceSession::from_transport(mock_with_device_state());
    session.set_led_no_flush(LedButton::Button1, LedState::On);
    session.set_led_no_flush(LedButton::Button2, LedState::Blink);
    assert!(session.has_unflushed_led_changes());

    session.flush_leds().expect("flush");
    assert!(!session.has_unflushed_led_changes());
    // ON bit 0 for button 1, BLINK bit 3 for button 2.
    assert_eq!(
        session.transport().sent_reports().last().map(Vec::as_slice),
        Some(&[0x01, 0x09, 0x00][..])
    );
}

#[test]
fn failed_flush_retries_with_current_state() {
    let mut session = DeviceSession::from_transport(mock_with_device_state());

    session.set_led_no_flush(LedButton::Rec, LedState::On);
    session.transport_mut().fail_sends(true);
    assert!(session.flush_leds().is_err());
    assert!(session.has_unflushed_led_changes());

    // Mutate further before the retry: the retry must carry the newest
    // state, not a snapshot from the failed attempt.
    session.set_led_no_flush(LedButton::Rec, LedState::Blink);
    session.transport_mut().fail_sends(false);
    session.flush_leds().expect("retry");
    assert!(!session.has_unflushed_led_changes());
    // BLINK bit 13 for REC.
    assert_eq!(
        session.transport().sent_reports().last().map(Vec::as_slice),
        Some(&[0x01, 0x00, 0x20][..])
    );
}

#[test]
fn short_write_keeps_dirty_flag() {
    let mut mock = mock_with_device_state();
    mock.short_send(Some(1));

    let mut session = DeviceSession::from_transport(mock);
    session.set_led_no_flush(LedButton::Button6, LedState::Blink);
    let err = session.flush_leds().expect_err("short write must fail");
    assert!(matches!(
        err,
        DeviceError::Transport(TransportError::ShortWrite {
            written: 1,
            expected: 3
        })
    ));
    assert!(session.has_unflushed_led_changes());
}

#[test]
fn set_led_flushes_immediately() {
    let mut session = DeviceSession::from_transport(mock_with_device_state());
    session
        .set_led(LedButton::Button3, LedState::On)
        .expect("set");
    assert!(!session.has_unflushed_led_changes());
    assert_eq!(session.led_state(LedButton::Button3), LedState::On);
    // ON bit 4 for button 3.
    assert_eq!(
        session.transport().sent_reports().last().map(Vec::as_slice),
        Some(&[0x01, 0x10, 0x00][..])
    );
}

#[test]
fn led_read_back_discards_local_intent() {
    let mut mock = mock_with_device_state();
    mock.set_feature_report(0x01, [0x01, 0x00, 0x20]); // REC blinking

    let mut session = DeviceSession::from_transport(mock);
    session.set_led_no_flush(LedButton::Button1, LedState::On);
    session.read_led_state().expect("read back");
    assert_eq!(session.led_state(LedButton::Button1), LedState::Off);
    assert_eq!(session.led_state(LedButton::Rec), LedState::Blink);
    assert!(!session.has_unflushed_led_changes());
}

#[test]
fn blink_writes_are_fire_and_forget() {
    let mut session = DeviceSession::from_transport(mock_with_device_state());
    let cached_before = session.blink_interval();

    session.set_blink_interval(100, 50).expect("set blink");
    // The cache only moves on an explicit read-back.
    assert_eq!(session.blink_interval(), cached_before);
    assert_eq!(
        session.transport().sent_reports().last().map(Vec::as_slice),
        Some(&[0x02, 100, 50][..])
    );

    let read = session.read_blink_interval().expect("read blink");
    assert_eq!(read.on_time, 30);
    assert_eq!(session.blink_interval(), read);
}

#[test]
fn poll_events_diffs_consecutive_snapshots() {
    let mut mock = mock_with_device_state();
    let first = InputState {
        slider: SliderPosition::Position1,
        ..InputState::default()
    };
    let second = InputState {
        slider: SliderPosition::Position3,
        axis_x: 9,
        buttons: Button::Plus.bit(),
        ..InputState::default()
    };
    mock.queue_input(pack_input_report(&first));
    mock.queue_input(pack_input_report(&second));

    let mut session = DeviceSession::from_transport(mock);
    // First read against the neutral initial snapshot: no changes.
    assert!(session.poll_events(ReadMode::Blocking).expect("poll").is_empty());

    let events = session.poll_events(ReadMode::Blocking).expect("poll");
    assert_eq!(
        events,
        vec![
            InputEvent::Slider {
                position: SliderPosition::Position3
            },
            InputEvent::Axis {
                axis: Axis::X,
                value: 9
            },
            InputEvent::Button {
                button: Button::Plus,
                pressed: true
            },
        ]
    );

    // No pending report: empty batch, cache untouched.
    assert!(session
        .poll_events(ReadMode::NonBlocking)
        .expect("poll")
        .is_empty());
    assert_eq!(session.input_state(), second);
}
