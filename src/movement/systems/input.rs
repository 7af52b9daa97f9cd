//! Movement domain: input sampling.
//!
//! Runs every render frame; the fixed-tick systems treat the resulting
//! resource as an immutable snapshot. The press edge is accumulated rather
//! than overwritten so a tap between two fixed ticks is not dropped.

use bevy::prelude::*;

use crate::movement::MovementInput;

pub(crate) fn sample_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis only matters for the explicit "down" press that starts
    // a platform drop-through.
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.jump_held = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);
    if keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK) {
        input.jump_pressed = true;
    }
}

/// Runs at the end of the fixed tick, once the snapshot has been consumed.
pub(crate) fn clear_input_edges(mut input: ResMut<MovementInput>) {
    input.jump_pressed = false;
}
