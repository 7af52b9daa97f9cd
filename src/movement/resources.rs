//! Movement domain: tuning and input resources.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::GameLayer;

/// Tunable movement constants. Values here are defaults, overridable from
/// `assets/data/movement.ron`; the relative design (wall-jump impulse above
/// air-jump impulse, probe distance beyond the collider edge) is what matters.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub movement_speed: f32,
    /// Vertical velocity of a fresh ground/coyote jump, also the velocity
    /// sustained through the jump-hold window.
    pub jump_strength: f32,
    /// Vertical velocity of a mid-air jump; smaller than `jump_strength`.
    pub air_jump_strength: f32,
    pub wall_jump_horizontal: f32,
    pub wall_jump_vertical: f32,
    pub gravity: f32,
    /// Total jumps per sequence (2 = ground jump + one double jump).
    pub max_jumps: u8,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    pub jump_hold_time: f32,
    pub wall_jump_lock_time: f32,
    /// Per-tick multiplier applied to fall speed while clinging.
    pub wall_slide_damping: f32,
    /// How long one-way platform collision stays suspended on drop-through.
    pub platform_drop_time: f32,
    pub probe_radius: f32,
    pub probe_distance: f32,
    pub axis_dead_zone: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            movement_speed: 240.0,
            jump_strength: 620.0,
            air_jump_strength: 470.0,
            wall_jump_horizontal: 420.0,
            wall_jump_vertical: 560.0,
            gravity: 1500.0,
            max_jumps: 2,
            coyote_time: 0.15,
            jump_buffer_time: 0.1,
            jump_hold_time: 0.2,
            wall_jump_lock_time: 0.15,
            wall_slide_damping: 0.9,
            platform_drop_time: 0.3,
            probe_radius: 10.0,
            probe_distance: 8.0,
            axis_dead_zone: 0.1,
        }
    }
}

/// Collision masks per probe direction, resolved once at setup from
/// `GameLayer` rather than scattered through the state machine.
#[derive(Resource, Debug, Clone)]
pub struct ProbeConfig {
    /// Anything the character can stand on.
    pub ground_mask: LayerMask,
    /// Surfaces that qualify for wall-clinging.
    pub wall_mask: LayerMask,
    /// Surfaces that truncate a jump from above.
    pub ceiling_mask: LayerMask,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ground_mask: [GameLayer::Ground, GameLayer::Wall, GameLayer::OneWayPlatform].into(),
            wall_mask: [GameLayer::Wall, GameLayer::OneWayPlatform].into(),
            ceiling_mask: [GameLayer::Ground, GameLayer::Wall].into(),
        }
    }
}

/// Input snapshot sampled once per frame and consumed at fixed-tick
/// boundaries. Edge flags accumulate across frames until a tick clears them,
/// so a press landing between ticks is never lost.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_pressed: bool,
    pub jump_held: bool,
}
