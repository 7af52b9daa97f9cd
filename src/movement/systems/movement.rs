//! Movement domain: fixed-tick wrapper around the state machine.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::machine::InputSnapshot;
use crate::movement::{
    GameLayer, JumpPerformed, MotionState, MovementInput, MovementTuning, Player, ProbeSet,
};
use bevy::ecs::message::MessageWriter;

/// Runs the state machine once per fixed tick and applies the resulting
/// velocity to the rigid body.
pub(crate) fn advance_motion(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut jump_events: MessageWriter<JumpPerformed>,
    mut query: Query<(&mut MotionState, &ProbeSet, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut state, probes, mut velocity) in &mut query {
        let snapshot = InputSnapshot {
            axis: input.axis,
            jump_pressed: input.jump_pressed,
            jump_held: input.jump_held,
        };

        let outcome = state.advance(&snapshot, probes, &tuning, velocity.0, dt);
        velocity.0 = outcome.velocity;

        if let Some(kind) = outcome.jump {
            debug!(
                "Jump performed: kind={:?}, jump_count={}, mode={:?}",
                kind, state.jump_count, state.mode
            );
            jump_events.write(JumpPerformed {
                kind,
                jump_count: state.jump_count,
            });
        }
    }
}

/// Mirrors the drop-through timer into the player's collision filters so the
/// physics step ignores one-way platforms while the window is open.
pub(crate) fn apply_platform_filter(
    mut query: Query<(&MotionState, &mut CollisionLayers), With<Player>>,
) {
    for (state, mut layers) in &mut query {
        if state.platform_drop_timer > 0.0 {
            layers.filters.remove(GameLayer::OneWayPlatform);
        } else {
            layers.filters.add(GameLayer::OneWayPlatform);
        }
    }
}
