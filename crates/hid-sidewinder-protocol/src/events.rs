//! Discrete input events derived from successive snapshots.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};

use crate::types::{Axis, Button, InputState, SliderPosition};

/// One discrete change between two input snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// The slider moved to a new detent.
    Slider { position: SliderPosition },
    /// An axis value changed; carries the new value.
    Axis { axis: Axis, value: i16 },
    /// A button was pressed (`pressed == true`) or released.
    Button { button: Button, pressed: bool },
}

/// Compute the ordered event batch describing the change from `old` to `new`.
///
/// Event order is a contract consumers may rely on: at most one slider
/// event first, then axis events in X, Y, Z order, then button events in
/// [`Button::SCAN_ORDER`]. Unchanged fields produce no event; identical
/// snapshots produce an empty batch.
pub fn diff_states(old: &InputState, new: &InputState) -> Vec<InputEvent> {
    let mut events = Vec::new();
    append_events(&mut events, old, new);
    events
}

/// Append the diff between `old` and `new` to an existing batch.
///
/// Existing events keep their order; the fresh batch follows them.
pub fn append_events(events: &mut Vec<InputEvent>, old: &InputState, new: &InputState) {
    if old.slider != new.slider {
        events.push(InputEvent::Slider {
            position: new.slider,
        });
    }

    for axis in [Axis::X, Axis::Y, Axis::Z] {
        let value = new.axis(axis);
        if old.axis(axis) != value {
            events.push(InputEvent::Axis { axis, value });
        }
    }

    // Skip the per-button scan when the whole word is unchanged.
    if old.buttons != new.buttons {
        for button in Button::SCAN_ORDER {
            let bit = button.bit();
            if old.buttons & bit != new.buttons & bit {
                events.push(InputEvent::Button {
                    button,
                    pressed: new.buttons & bit != 0,
                });
            }
        }
    }
}
