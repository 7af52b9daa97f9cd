//! Movement domain: components, physics layers, and probe data.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Solid ground surfaces (floors).
    Ground,
    /// Solid wall surfaces (cling-eligible).
    Wall,
    /// One-way platforms: stood on, dropped through on demand.
    OneWayPlatform,
    /// Player character.
    Player,
    /// Deadly surfaces.
    Hazard,
}

#[derive(Component, Debug)]
pub struct Player;

/// Discrete movement mode. Exactly one is active; animation and VFX
/// consumers treat it as the sole source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    #[default]
    Idle,
    Walking,
    Jumping,
    Falling,
    WallClinging,
}

impl MovementMode {
    pub fn is_grounded(self) -> bool {
        matches!(self, MovementMode::Idle | MovementMode::Walking)
    }

    pub fn is_airborne(self) -> bool {
        matches!(self, MovementMode::Jumping | MovementMode::Falling)
    }
}

/// Classification of a probed surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Ground,
    Wall,
    OneWayPlatform,
}

impl Surface {
    /// Lateral hits only qualify for wall-clinging on wall/platform surfaces.
    pub fn supports_cling(self) -> bool {
        matches!(self, Surface::Wall | Surface::OneWayPlatform)
    }
}

/// A single directional shape-cast result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub surface: Surface,
    pub point: Vec2,
}

/// Classified surroundings for one tick, recomputed in full before any
/// mode transition is finalized.
#[derive(Component, Debug, Clone, Default)]
pub struct ProbeSet {
    pub down: Option<ProbeHit>,
    pub up: Option<ProbeHit>,
    pub left: Option<ProbeHit>,
    pub right: Option<ProbeHit>,
}

impl ProbeSet {
    /// Lateral hit on the given side (-1 = left, 1 = right).
    pub fn lateral(&self, side: i8) -> Option<&ProbeHit> {
        match side {
            -1 => self.left.as_ref(),
            1 => self.right.as_ref(),
            _ => None,
        }
    }
}

/// Per-character movement state, mutated exclusively by the per-tick
/// `advance` in `machine.rs`. Lives for the character's lifetime.
#[derive(Component, Debug, Clone)]
pub struct MotionState {
    pub mode: MovementMode,
    /// Jumps consumed in the current sequence, in `[0, max_jumps]`.
    pub jump_count: u8,
    /// Edge-trigger latch: once closed, the jump button must be released
    /// before another jump can start.
    pub can_trigger_new_jump: bool,
    /// Grace window after leaving ground during which a jump still succeeds.
    pub coyote_timer: f32,
    /// Window during which a buffered jump press may still be honored.
    pub jump_buffer_timer: f32,
    /// Remaining time the held button sustains full jump velocity.
    pub jump_hold_timer: f32,
    /// Freezes velocity recomputation right after a wall jump.
    pub wall_cling_lockout_timer: f32,
    /// Sign of the wall relative to the character; 0 when not clinging.
    pub wall_cling_direction: i8,
    /// Surface currently beneath the character, if grounded.
    pub grounded_surface: Option<Surface>,
    /// While positive, collision with one-way platforms is suspended.
    pub platform_drop_timer: f32,
    /// Ceiling contact truncated the current jump.
    pub head_bumped: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            mode: MovementMode::Idle,
            jump_count: 0,
            can_trigger_new_jump: true,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            jump_hold_timer: 0.0,
            wall_cling_lockout_timer: 0.0,
            wall_cling_direction: 0,
            grounded_surface: None,
            platform_drop_timer: 0.0,
            head_bumped: false,
        }
    }
}

/// Marker for solid ground colliders.
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for solid wall colliders.
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for one-way platform colliders.
#[derive(Component, Debug)]
pub struct OneWayPlatform;
