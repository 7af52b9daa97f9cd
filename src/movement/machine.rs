//! Movement domain: the per-tick motion state machine.
//!
//! `MotionState::advance` is a pure function of the sampled input, the
//! classified probe results, the tuning, and the body's current velocity.
//! The wrapping system in `systems/movement.rs` writes the returned velocity
//! to the rigid body and emits a `JumpPerformed` message per trigger.

use bevy::prelude::*;

use crate::movement::{MotionState, MovementMode, MovementTuning, ProbeSet, Surface};

/// Immutable input snapshot for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub axis: Vec2,
    /// Press edge (possibly accumulated since the last tick).
    pub jump_pressed: bool,
    /// Level state of the jump button.
    pub jump_held: bool,
}

/// Which trigger produced a jump this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Air,
    Wall,
}

/// Result of one tick of the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvanceOutcome {
    pub velocity: Vec2,
    pub jump: Option<JumpKind>,
}

impl MotionState {
    /// Advance the state machine by one fixed tick.
    ///
    /// Transition rules run in priority order; earlier rules pre-empt later
    /// ones. Every input combination maps to a defined transition, so there
    /// is nothing to report or retry.
    pub fn advance(
        &mut self,
        input: &InputSnapshot,
        probes: &ProbeSet,
        tuning: &MovementTuning,
        velocity: Vec2,
        dt: f32,
    ) -> AdvanceOutcome {
        let locked = self.wall_cling_lockout_timer > 0.0;

        // Buffer the press edge before timers decay so a fresh press always
        // survives its own tick.
        if input.jump_pressed {
            self.jump_buffer_timer = tuning.jump_buffer_time;
        }

        // Releasing the button re-opens the edge-trigger latch, and ends the
        // hold window early (short hop).
        if !input.jump_held {
            self.can_trigger_new_jump = true;
            if self.mode == MovementMode::Jumping {
                self.jump_hold_timer = 0.0;
            }
        }

        self.decay_timers(dt);

        // 1. Wall-jump lockout: the push-off impulse plays out untouched,
        // only timers decay.
        if locked {
            return AdvanceOutcome {
                velocity,
                jump: None,
            };
        }

        let mut velocity = velocity;
        let mut jump = None;

        // 2. Wall-cling entry while airborne: requires the stick pressed
        // toward a qualifying wall. Once clinging, releasing the stick does
        // not exit; the cling ends on ground/ceiling contact, a wall jump,
        // or the wall itself ending.
        if self.mode.is_airborne() {
            let side = pressed_side(input.axis.x, tuning.axis_dead_zone);
            if side != 0
                && probes
                    .lateral(side)
                    .is_some_and(|hit| hit.surface.supports_cling())
            {
                self.mode = MovementMode::WallClinging;
                self.wall_cling_direction = side;
                self.jump_count = 0;
            }
        } else if self.mode == MovementMode::WallClinging
            && probes.lateral(self.wall_cling_direction).is_none()
        {
            // The wall ran out from under the cling.
            self.mode = MovementMode::Falling;
            self.wall_cling_direction = 0;
        }

        // 3. Ground (re)acquisition, guarded by the jump-hold timer so a
        // freshly started jump is not immediately re-grounded.
        if self.jump_hold_timer <= 0.0 {
            if let Some(hit) = &probes.down {
                if !self.mode.is_grounded() {
                    self.mode = MovementMode::Idle;
                }
                self.grounded_surface = Some(hit.surface);
                self.jump_count = 0;
                self.platform_drop_timer = 0.0;
                self.wall_cling_direction = 0;
                self.head_bumped = false;
            }
        }

        // 4. Ceiling bump kills upward momentum for the rest of the jump. A
        // cling carried into the ceiling ends the same way.
        if probes.up.is_some()
            && (self.mode.is_airborne() || self.mode == MovementMode::WallClinging)
        {
            if self.mode == MovementMode::WallClinging {
                self.mode = MovementMode::Falling;
                self.wall_cling_direction = 0;
            }
            self.head_bumped = true;
            self.jump_hold_timer = 0.0;
            velocity.y = -velocity.y.abs();
        }

        // 5. Jump trigger.
        if self.jump_buffer_timer > 0.0 {
            if self.mode.is_grounded()
                && self.grounded_surface == Some(Surface::OneWayPlatform)
                && input.axis.y < -0.5
            {
                // Drop-through instead of a jump: suspend platform collision
                // and let gravity do the rest.
                self.mode = MovementMode::Falling;
                self.grounded_surface = None;
                self.platform_drop_timer = tuning.platform_drop_time;
                self.jump_buffer_timer = 0.0;
            } else if (self.mode.is_grounded() || self.coyote_timer > 0.0)
                && self.mode != MovementMode::WallClinging
                && self.can_trigger_new_jump
            {
                velocity.y = tuning.jump_strength;
                jump = Some(JumpKind::Ground);
                self.start_jump(1, tuning);
            } else if self.mode == MovementMode::Jumping
                && self.jump_count < tuning.max_jumps
                && self.can_trigger_new_jump
            {
                velocity.y = tuning.air_jump_strength;
                jump = Some(JumpKind::Air);
                self.start_jump(self.jump_count + 1, tuning);
                // A consumed air jump always demands a release first.
                self.can_trigger_new_jump = false;
            } else if self.mode == MovementMode::WallClinging {
                velocity.x = -f32::from(self.wall_cling_direction) * tuning.wall_jump_horizontal;
                velocity.y = tuning.wall_jump_vertical;
                jump = Some(JumpKind::Wall);
                self.start_jump(1, tuning);
                self.wall_cling_lockout_timer = tuning.wall_jump_lock_time;
                self.wall_cling_direction = 0;
            }
        }

        // 6. Jump-hold extension: the held button sustains full jump velocity
        // until the window runs out. Skipped on a trigger tick so the air
        // jump's smaller impulse is observable.
        if jump.is_none()
            && self.mode == MovementMode::Jumping
            && input.jump_held
            && self.jump_hold_timer > 0.0
            && !self.head_bumped
        {
            velocity.y = tuning.jump_strength;
        }

        // 7. Fall detection: the down probe stopped hitting while grounded.
        if self.mode.is_grounded() && probes.down.is_none() && velocity.y < 0.0 {
            self.mode = MovementMode::Falling;
            self.grounded_surface = None;
            self.coyote_timer = tuning.coyote_time;
        }

        // 8. Horizontal branch, independent of the vertical rules.
        if self.mode == MovementMode::WallClinging {
            velocity.x = 0.0;
            if velocity.y < 0.0 {
                velocity.y *= tuning.wall_slide_damping;
            }
        } else {
            let walking = input.axis.x.abs() > tuning.axis_dead_zone;
            velocity.x = if walking {
                input.axis.x * tuning.movement_speed
            } else {
                0.0
            };
            if self.mode.is_grounded() {
                self.mode = if walking {
                    MovementMode::Walking
                } else {
                    MovementMode::Idle
                };
            }
        }

        AdvanceOutcome { velocity, jump }
    }

    /// Shared bookkeeping for every successful jump trigger.
    fn start_jump(&mut self, jump_count: u8, tuning: &MovementTuning) {
        self.mode = MovementMode::Jumping;
        self.jump_count = jump_count.min(tuning.max_jumps);
        self.jump_hold_timer = tuning.jump_hold_time;
        self.jump_buffer_timer = 0.0;
        self.coyote_timer = 0.0;
        self.grounded_surface = None;
        self.head_bumped = false;
        if self.jump_count >= tuning.max_jumps {
            self.can_trigger_new_jump = false;
        }
    }

    /// All timers decay once per tick and clamp at zero, regardless of which
    /// transition rule fires.
    fn decay_timers(&mut self, dt: f32) {
        self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);
        self.jump_hold_timer = (self.jump_hold_timer - dt).max(0.0);
        self.wall_cling_lockout_timer = (self.wall_cling_lockout_timer - dt).max(0.0);
        self.platform_drop_timer = (self.platform_drop_timer - dt).max(0.0);
    }
}

/// Side the horizontal axis is pressed toward, with dead-zone tolerance.
fn pressed_side(axis_x: f32, dead_zone: f32) -> i8 {
    if axis_x > dead_zone {
        1
    } else if axis_x < -dead_zone {
        -1
    } else {
        0
    }
}
