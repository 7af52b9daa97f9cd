//! View domain: cosmetic glue driven by the movement core.
//!
//! Everything here reads `MotionState`, the body's velocity, and
//! `JumpPerformed` messages; it owns no simulation state of its own.

mod animation;
mod dust;
mod sprite;

pub use animation::{AnimationController, AnimationState};

use bevy::prelude::*;

pub struct ViewPlugin;

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                sprite::attach_sprite_rig,
                sprite::tilt_sprite,
                animation::sync_animation_state,
                animation::advance_frames,
                dust::emit_walk_dust,
                dust::burst_on_jump,
                dust::update_dust,
            ),
        );
    }
}
