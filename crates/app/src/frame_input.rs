//! Keyboard and mouse capture for one rendered frame, reduced to the pure
//! key-to-command mapping so it stays unit-testable.

use game_core::sim::FrameCommands;
use macroquad::input::mouse_delta_position;
use macroquad::prelude::{KeyCode, MouseButton, is_key_down, is_mouse_button_down};

/// Radians of turn per unit of normalized horizontal mouse travel.
const MOUSE_SENSITIVITY: f64 = 1.6;

const MOVEMENT_KEYS: [KeyCode; 7] = [
    KeyCode::W,
    KeyCode::S,
    KeyCode::A,
    KeyCode::D,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Space,
];

/// Translate the held keys into simulation commands. `turn_delta` comes from
/// the mouse and is passed through unchanged.
pub fn commands_from_keys(
    held: &[KeyCode],
    mouse_shoot: bool,
    turn_delta: f64,
) -> FrameCommands {
    FrameCommands {
        forward: held.contains(&KeyCode::W),
        backward: held.contains(&KeyCode::S),
        strafe_left: held.contains(&KeyCode::A),
        strafe_right: held.contains(&KeyCode::D),
        turn_left: held.contains(&KeyCode::Left),
        turn_right: held.contains(&KeyCode::Right),
        shoot: held.contains(&KeyCode::Space) || mouse_shoot,
        turn_delta,
    }
}

pub fn capture_frame_commands() -> FrameCommands {
    let mut held = Vec::with_capacity(MOVEMENT_KEYS.len());
    for key in MOVEMENT_KEYS {
        if is_key_down(key) {
            held.push(key);
        }
    }

    // Positive mouse x travel turns the view right, which is a negative
    // rotation angle.
    let turn_delta = -f64::from(mouse_delta_position().x) * MOUSE_SENSITIVITY;
    commands_from_keys(&held, is_mouse_button_down(MouseButton::Left), turn_delta)
}
