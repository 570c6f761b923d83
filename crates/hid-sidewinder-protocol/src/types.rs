//! Input and LED state types for the Strategic Commander.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};

/// Physical buttons, as bit flags within the 12-bit button word.
///
/// The discriminants are the bit masks used in [`InputState::buttons`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Button {
    Button1 = 0x0001,
    Button2 = 0x0002,
    Button3 = 0x0004,
    Button4 = 0x0008,
    Button5 = 0x0010,
    Button6 = 0x0020,
    /// `+` button on the base.
    Plus = 0x0040,
    /// `-` button on the base.
    Minus = 0x0080,
    Shift1 = 0x0100,
    Shift2 = 0x0200,
    Shift3 = 0x0400,
    /// Record button below the slider.
    Rec = 0x0800,
}

impl Button {
    /// All buttons in the order button-change events are reported:
    /// 1–6, then `+`/`-`, then the shift buttons, then REC.
    ///
    /// This order is part of the event contract, not a presentation detail.
    pub const SCAN_ORDER: [Button; 12] = [
        Button::Button1,
        Button::Button2,
        Button::Button3,
        Button::Button4,
        Button::Button5,
        Button::Button6,
        Button::Plus,
        Button::Minus,
        Button::Shift1,
        Button::Shift2,
        Button::Shift3,
        Button::Rec,
    ];

    /// Bit mask of this button within the button word.
    pub fn bit(self) -> u16 {
        self as u16
    }

    /// The LED group behind this button, if it has one.
    ///
    /// Only the six numbered buttons and REC are backlit; `+`/`-` and the
    /// shift buttons return [`LedButton::NoLed`].
    pub fn led(self) -> LedButton {
        match self {
            Button::Button1 => LedButton::Button1,
            Button::Button2 => LedButton::Button2,
            Button::Button3 => LedButton::Button3,
            Button::Button4 => LedButton::Button4,
            Button::Button5 => LedButton::Button5,
            Button::Button6 => LedButton::Button6,
            Button::Rec => LedButton::Rec,
            _ => LedButton::NoLed,
        }
    }
}

/// Addressable LED groups.
///
/// `All` and `NoLed` are query sentinels: they always read as
/// [`LedState::Off`] and setting them never changes the LED bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedButton {
    Button1,
    Button2,
    Button3,
    Button4,
    Button5,
    Button6,
    Rec,
    All,
    NoLed,
}

/// Number of real (addressable) LED groups.
pub const LED_COUNT: usize = 7;

impl LedButton {
    /// The real LED groups, in bitmask order.
    pub const ALL_LEDS: [LedButton; LED_COUNT] = [
        LedButton::Button1,
        LedButton::Button2,
        LedButton::Button3,
        LedButton::Button4,
        LedButton::Button5,
        LedButton::Button6,
        LedButton::Rec,
    ];

    /// Index of this LED within the bank, `None` for the sentinels.
    pub(crate) fn index(self) -> Option<usize> {
        match self {
            LedButton::Button1 => Some(0),
            LedButton::Button2 => Some(1),
            LedButton::Button3 => Some(2),
            LedButton::Button4 => Some(3),
            LedButton::Button5 => Some(4),
            LedButton::Button6 => Some(5),
            LedButton::Rec => Some(6),
            LedButton::All | LedButton::NoLed => None,
        }
    }
}

/// Mode of a single LED group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LedState {
    #[default]
    Off,
    On,
    Blink,
}

/// The three detents of the base slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SliderPosition {
    #[default]
    Position1,
    Position2,
    Position3,
}

/// The three rotation axes of the grip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One fully decoded input snapshot.
///
/// Replaced wholesale on every successful read; a failed decode never
/// produces a partially updated snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Button word, one bit per [`Button`]; only the low 12 bits are used.
    pub buttons: u16,
    /// Slider detent.
    pub slider: SliderPosition,
    /// X axis (left/right tilt), in [-512, 511].
    pub axis_x: i16,
    /// Y axis (forward/back tilt), in [-512, 511].
    pub axis_y: i16,
    /// Z axis (twist), in [-512, 511].
    pub axis_z: i16,
}

impl InputState {
    /// Whether `button` is pressed in this snapshot.
    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons & button.bit() != 0
    }

    /// Value of `axis` in this snapshot.
    pub fn axis(&self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.axis_x,
            Axis::Y => self.axis_y,
            Axis::Z => self.axis_z,
        }
    }
}
