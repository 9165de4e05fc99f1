//! Mapping between mousectl types and evdev events.

use evdev::{EventType, KeyCode as EvdevKey, RelativeAxisCode};
use mousectl_types::{ButtonState, Displacement, MouseButton};

/// Convert a `MouseButton` to its evdev key code.
pub fn mouse_button_to_evdev_key(button: MouseButton) -> EvdevKey {
    match button {
        MouseButton::Left => EvdevKey::BTN_LEFT,
        MouseButton::Right => EvdevKey::BTN_RIGHT,
        MouseButton::Middle => EvdevKey::BTN_MIDDLE,
    }
}

/// Convert a `ButtonState` to an evdev value.
pub fn button_state_to_evdev_value(state: ButtonState) -> i32 {
    match state {
        ButtonState::Pressed => 1,
        ButtonState::Released => 0,
    }
}

/// A single button transition.
pub fn button_event(button: MouseButton, state: ButtonState) -> evdev::InputEvent {
    let key = mouse_button_to_evdev_key(button);
    evdev::InputEvent::new(EventType::KEY.0, key.0, button_state_to_evdev_value(state))
}

/// Relative motion; axes with no movement are left out.
pub fn motion_events(delta: Displacement) -> Vec<evdev::InputEvent> {
    let mut events = Vec::with_capacity(2);
    if delta.dx != 0 {
        events.push(evdev::InputEvent::new(
            EventType::RELATIVE.0,
            RelativeAxisCode::REL_X.0,
            delta.dx,
        ));
    }
    if delta.dy != 0 {
        events.push(evdev::InputEvent::new(
            EventType::RELATIVE.0,
            RelativeAxisCode::REL_Y.0,
            delta.dy,
        ));
    }
    events
}

/// Wheel notches. `REL_WHEEL` counts positive upwards, so `dy` is negated.
pub fn scroll_events(delta: Displacement) -> Vec<evdev::InputEvent> {
    let mut events = Vec::with_capacity(2);
    if delta.dy != 0 {
        events.push(evdev::InputEvent::new(
            EventType::RELATIVE.0,
            RelativeAxisCode::REL_WHEEL.0,
            delta.dy.saturating_neg(),
        ));
    }
    if delta.dx != 0 {
        events.push(evdev::InputEvent::new(
            EventType::RELATIVE.0,
            RelativeAxisCode::REL_HWHEEL.0,
            delta.dx,
        ));
    }
    events
}
