//! Movement domain: unit tests for the motion state machine and tuning.

use bevy::prelude::Vec2;

use super::machine::{InputSnapshot, JumpKind};
use super::systems::probes::drop_through_mask;
use super::{
    GameLayer, MotionState, MovementMode, MovementTuning, ProbeConfig, ProbeHit, ProbeSet, Surface,
};

const DT: f32 = 1.0 / 60.0;

fn hit(surface: Surface) -> ProbeHit {
    ProbeHit {
        surface,
        point: Vec2::ZERO,
    }
}

fn grounded_on(surface: Surface) -> ProbeSet {
    ProbeSet {
        down: Some(hit(surface)),
        ..Default::default()
    }
}

fn airborne() -> ProbeSet {
    ProbeSet::default()
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

fn jump_press() -> InputSnapshot {
    InputSnapshot {
        jump_pressed: true,
        jump_held: true,
        ..Default::default()
    }
}

fn jump_held() -> InputSnapshot {
    InputSnapshot {
        jump_held: true,
        ..Default::default()
    }
}

/// A state that has already settled on solid ground for one tick.
fn grounded_state(tuning: &MovementTuning) -> MotionState {
    let mut state = MotionState::default();
    state.advance(&idle(), &grounded_on(Surface::Ground), tuning, Vec2::ZERO, DT);
    assert_eq!(state.mode, MovementMode::Idle);
    assert_eq!(state.grounded_surface, Some(Surface::Ground));
    state
}

// -----------------------------------------------------------------------------
// Ground jump and edge-trigger latch
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_from_idle() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);

    let outcome = state.advance(
        &jump_press(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::ZERO,
        DT,
    );

    assert_eq!(state.mode, MovementMode::Jumping);
    assert_eq!(state.jump_count, 1);
    assert_eq!(outcome.jump, Some(JumpKind::Ground));
    assert_eq!(outcome.velocity.y, tuning.jump_strength);
}

#[test]
fn test_jump_not_instantly_regrounded() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);
    state.advance(
        &jump_press(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::ZERO,
        DT,
    );

    // The down probe still hits right after liftoff; the hold timer guards
    // against re-grounding.
    state.advance(
        &jump_held(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::new(0.0, tuning.jump_strength),
        DT,
    );
    assert_eq!(state.mode, MovementMode::Jumping);
}

#[test]
fn test_double_jump_then_third_press_ignored() {
    let tuning = MovementTuning::default();
    assert_eq!(tuning.max_jumps, 2);
    let mut state = grounded_state(&tuning);
    state.advance(
        &jump_press(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::ZERO,
        DT,
    );

    // Release mid-air, then press again: the double jump fires with the
    // smaller impulse.
    state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, 300.0), DT);
    let outcome = state.advance(&jump_press(), &airborne(), &tuning, Vec2::new(0.0, 200.0), DT);
    assert_eq!(state.jump_count, 2);
    assert_eq!(outcome.jump, Some(JumpKind::Air));
    assert_eq!(outcome.velocity.y, tuning.air_jump_strength);

    // Third press without landing is ignored until grounded.
    state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, 100.0), DT);
    let outcome = state.advance(&jump_press(), &airborne(), &tuning, Vec2::new(0.0, 50.0), DT);
    assert_eq!(outcome.jump, None);
    assert_eq!(state.jump_count, 2);
}

#[test]
fn test_held_button_does_not_chain_jumps() {
    let mut tuning = MovementTuning::default();
    tuning.max_jumps = 1;
    let mut state = grounded_state(&tuning);
    state.advance(
        &jump_press(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::ZERO,
        DT,
    );
    assert!(!state.can_trigger_new_jump);

    // Let the hold window run out while the button stays down, then land.
    for _ in 0..20 {
        state.advance(&jump_held(), &airborne(), &tuning, Vec2::new(0.0, -100.0), DT);
    }
    state.advance(
        &jump_held(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::new(0.0, -100.0),
        DT,
    );
    assert!(state.mode.is_grounded());

    // A press without an intervening release is refused by the latch.
    let outcome = state.advance(
        &jump_press(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::ZERO,
        DT,
    );
    assert_eq!(outcome.jump, None);

    // Keep holding until the buffered press expires, release, press again:
    // accepted.
    for _ in 0..10 {
        state.advance(&jump_held(), &grounded_on(Surface::Ground), &tuning, Vec2::ZERO, DT);
    }
    state.advance(&idle(), &grounded_on(Surface::Ground), &tuning, Vec2::ZERO, DT);
    let outcome = state.advance(
        &jump_press(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::ZERO,
        DT,
    );
    assert_eq!(outcome.jump, Some(JumpKind::Ground));
}

// -----------------------------------------------------------------------------
// Coyote time
// -----------------------------------------------------------------------------

#[test]
fn test_ledge_fall_starts_coyote_window() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);

    state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, -10.0), DT);
    assert_eq!(state.mode, MovementMode::Falling);
    assert!(state.coyote_timer > 0.0);

    // A jump press inside the window still succeeds.
    let outcome = state.advance(&jump_press(), &airborne(), &tuning, Vec2::new(0.0, -20.0), DT);
    assert_eq!(state.mode, MovementMode::Jumping);
    assert_eq!(outcome.jump, Some(JumpKind::Ground));
}

#[test]
fn test_jump_after_coyote_window_is_ignored() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);
    state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, -10.0), DT);

    let ticks = (tuning.coyote_time / DT).ceil() as usize + 1;
    for _ in 0..ticks {
        state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, -50.0), DT);
    }
    assert_eq!(state.coyote_timer, 0.0);

    let outcome = state.advance(&jump_press(), &airborne(), &tuning, Vec2::new(0.0, -50.0), DT);
    assert_eq!(outcome.jump, None);
    assert_eq!(state.mode, MovementMode::Falling);
}

#[test]
fn test_buffered_press_fires_on_landing_tick() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);

    // Walk off a ledge and fall past the coyote window.
    state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, -10.0), DT);
    let ticks = (tuning.coyote_time / DT).ceil() as usize + 1;
    for _ in 0..ticks {
        state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, -200.0), DT);
    }
    assert_eq!(state.coyote_timer, 0.0);

    // A press shortly before touchdown does nothing in the air but arms the
    // buffer.
    let outcome = state.advance(&jump_press(), &airborne(), &tuning, Vec2::new(0.0, -200.0), DT);
    assert_eq!(outcome.jump, None);
    state.advance(&jump_held(), &airborne(), &tuning, Vec2::new(0.0, -200.0), DT);
    assert!(state.jump_buffer_timer > 0.0);

    // The buffered press is consumed on the landing tick.
    let outcome = state.advance(
        &jump_held(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::new(0.0, -200.0),
        DT,
    );
    assert_eq!(outcome.jump, Some(JumpKind::Ground));
    assert_eq!(outcome.velocity.y, tuning.jump_strength);
    assert_eq!(state.mode, MovementMode::Jumping);
}

// -----------------------------------------------------------------------------
// Wall cling and wall jump
// -----------------------------------------------------------------------------

fn clinging_state(tuning: &MovementTuning) -> MotionState {
    let mut state = grounded_state(tuning);
    state.advance(&idle(), &airborne(), tuning, Vec2::new(0.0, -10.0), DT);

    let toward_wall = InputSnapshot {
        axis: Vec2::new(1.0, 0.0),
        ..Default::default()
    };
    let wall_right = ProbeSet {
        right: Some(hit(Surface::Wall)),
        ..Default::default()
    };
    state.advance(&toward_wall, &wall_right, tuning, Vec2::new(0.0, -300.0), DT);
    assert_eq!(state.mode, MovementMode::WallClinging);
    state
}

#[test]
fn test_wall_cling_entry_damps_fall_and_resets_jumps() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);
    state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, -10.0), DT);

    let toward_wall = InputSnapshot {
        axis: Vec2::new(1.0, 0.0),
        ..Default::default()
    };
    let wall_right = ProbeSet {
        right: Some(hit(Surface::Wall)),
        ..Default::default()
    };
    let outcome = state.advance(&toward_wall, &wall_right, &tuning, Vec2::new(0.0, -300.0), DT);

    assert_eq!(state.mode, MovementMode::WallClinging);
    assert_eq!(state.wall_cling_direction, 1);
    assert_eq!(state.jump_count, 0);
    assert_eq!(outcome.velocity.y, -300.0 * tuning.wall_slide_damping);
    assert_eq!(outcome.velocity.x, 0.0);
}

#[test]
fn test_wall_cling_survives_stick_release() {
    let tuning = MovementTuning::default();
    let mut state = clinging_state(&tuning);

    let wall_right = ProbeSet {
        right: Some(hit(Surface::Wall)),
        ..Default::default()
    };
    state.advance(&idle(), &wall_right, &tuning, Vec2::new(0.0, -50.0), DT);
    assert_eq!(state.mode, MovementMode::WallClinging);

    // The cling ends only when the wall itself runs out.
    state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, -50.0), DT);
    assert_eq!(state.mode, MovementMode::Falling);
    assert_eq!(state.wall_cling_direction, 0);
}

#[test]
fn test_wall_jump_pushes_away_and_locks_movement() {
    let tuning = MovementTuning::default();
    let mut state = clinging_state(&tuning);

    let wall_right = ProbeSet {
        right: Some(hit(Surface::Wall)),
        ..Default::default()
    };
    let outcome = state.advance(&jump_press(), &wall_right, &tuning, Vec2::new(0.0, -50.0), DT);
    assert_eq!(outcome.jump, Some(JumpKind::Wall));
    assert_eq!(state.mode, MovementMode::Jumping);
    assert_eq!(outcome.velocity.x, -tuning.wall_jump_horizontal);
    assert_eq!(outcome.velocity.y, tuning.wall_jump_vertical);
    assert!(state.wall_cling_lockout_timer > 0.0);
    assert_eq!(state.wall_cling_direction, 0);

    // While locked out, recomputation is frozen: the impulse velocity passes
    // through untouched even with the stick pressed toward the wall.
    let toward_wall = InputSnapshot {
        axis: Vec2::new(1.0, 0.0),
        jump_held: true,
        ..Default::default()
    };
    let outcome = state.advance(&toward_wall, &airborne(), &tuning, outcome.velocity, DT);
    assert_eq!(outcome.velocity.x, -tuning.wall_jump_horizontal);
    assert_eq!(outcome.velocity.y, tuning.wall_jump_vertical);
}

#[test]
fn test_ceiling_contact_ends_wall_cling() {
    let tuning = MovementTuning::default();
    let mut state = clinging_state(&tuning);

    // Sliding up into a wall/ceiling corner: the cling ends like a head bump.
    let corner = ProbeSet {
        up: Some(hit(Surface::Ground)),
        right: Some(hit(Surface::Wall)),
        ..Default::default()
    };
    let outcome = state.advance(&idle(), &corner, &tuning, Vec2::new(0.0, 40.0), DT);

    assert_eq!(state.mode, MovementMode::Falling);
    assert_eq!(state.wall_cling_direction, 0);
    assert!(state.head_bumped);
    assert_eq!(outcome.velocity.y, -40.0);
}

#[test]
fn test_cling_ignores_non_wall_surfaces() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);
    state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, -10.0), DT);

    let toward_wall = InputSnapshot {
        axis: Vec2::new(1.0, 0.0),
        ..Default::default()
    };
    let ground_on_right = ProbeSet {
        right: Some(hit(Surface::Ground)),
        ..Default::default()
    };
    state.advance(&toward_wall, &ground_on_right, &tuning, Vec2::new(0.0, -50.0), DT);
    assert_eq!(state.mode, MovementMode::Falling);
}

// -----------------------------------------------------------------------------
// One-way platform drop-through
// -----------------------------------------------------------------------------

#[test]
fn test_down_jump_on_platform_drops_through() {
    let tuning = MovementTuning::default();
    let mut state = MotionState::default();
    state.advance(
        &idle(),
        &grounded_on(Surface::OneWayPlatform),
        &tuning,
        Vec2::ZERO,
        DT,
    );
    assert_eq!(state.grounded_surface, Some(Surface::OneWayPlatform));

    let down_jump = InputSnapshot {
        axis: Vec2::new(0.0, -1.0),
        jump_pressed: true,
        jump_held: true,
    };
    let outcome = state.advance(
        &down_jump,
        &grounded_on(Surface::OneWayPlatform),
        &tuning,
        Vec2::ZERO,
        DT,
    );

    // No upward impulse: the press starts a drop instead of a jump.
    assert_eq!(outcome.jump, None);
    assert_eq!(outcome.velocity.y, 0.0);
    assert_eq!(state.mode, MovementMode::Falling);
    assert!(state.platform_drop_timer > 0.0);
}

#[test]
fn test_platform_collision_restored_on_ground_contact() {
    let tuning = MovementTuning::default();
    let mut state = MotionState::default();
    state.advance(
        &idle(),
        &grounded_on(Surface::OneWayPlatform),
        &tuning,
        Vec2::ZERO,
        DT,
    );
    let down_jump = InputSnapshot {
        axis: Vec2::new(0.0, -1.0),
        jump_pressed: true,
        jump_held: true,
    };
    state.advance(
        &down_jump,
        &grounded_on(Surface::OneWayPlatform),
        &tuning,
        Vec2::ZERO,
        DT,
    );

    // Fall past the window, then land on solid ground.
    let ticks = (tuning.platform_drop_time / DT).ceil() as usize + 1;
    for _ in 0..ticks {
        state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, -200.0), DT);
    }
    assert_eq!(state.platform_drop_timer, 0.0);

    state.advance(
        &idle(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::new(0.0, -200.0),
        DT,
    );
    assert!(state.mode.is_grounded());
    assert_eq!(state.jump_count, 0);
}

#[test]
fn test_drop_through_mask_excludes_platform_layer() {
    let config = ProbeConfig::default();
    assert!(config.ground_mask.has_all(GameLayer::OneWayPlatform));

    let mask = drop_through_mask(config.ground_mask);
    assert!(!mask.has_all(GameLayer::OneWayPlatform));
    assert!(mask.has_all(GameLayer::Ground));
}

#[test]
fn test_down_jump_on_solid_ground_still_jumps() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);

    let down_jump = InputSnapshot {
        axis: Vec2::new(0.0, -1.0),
        jump_pressed: true,
        jump_held: true,
    };
    let outcome = state.advance(
        &down_jump,
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::ZERO,
        DT,
    );
    assert_eq!(outcome.jump, Some(JumpKind::Ground));
}

// -----------------------------------------------------------------------------
// Jump hold and short hop
// -----------------------------------------------------------------------------

#[test]
fn test_held_jump_sustains_full_velocity() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);
    state.advance(
        &jump_press(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::ZERO,
        DT,
    );

    // Gravity would have eaten into the velocity; the held button restores it
    // while the hold window runs.
    let outcome = state.advance(&jump_held(), &airborne(), &tuning, Vec2::new(0.0, 500.0), DT);
    assert_eq!(outcome.velocity.y, tuning.jump_strength);
}

#[test]
fn test_short_hop_on_early_release() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);
    state.advance(
        &jump_press(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::ZERO,
        DT,
    );

    // Release: the hold timer is zeroed and velocity stops being clamped.
    let outcome = state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, 400.0), DT);
    assert_eq!(state.jump_hold_timer, 0.0);
    assert_eq!(outcome.velocity.y, 400.0);

    // Re-holding afterwards does not resurrect the clamp.
    let outcome = state.advance(&jump_held(), &airborne(), &tuning, Vec2::new(0.0, 300.0), DT);
    assert_eq!(outcome.velocity.y, 300.0);
}

// -----------------------------------------------------------------------------
// Ceiling bump
// -----------------------------------------------------------------------------

#[test]
fn test_head_bump_kills_upward_momentum() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);
    state.advance(
        &jump_press(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::ZERO,
        DT,
    );

    let ceiling = ProbeSet {
        up: Some(hit(Surface::Ground)),
        ..Default::default()
    };
    let outcome = state.advance(&jump_held(), &ceiling, &tuning, Vec2::new(0.0, 600.0), DT);
    assert!(state.head_bumped);
    assert_eq!(state.jump_hold_timer, 0.0);
    assert_eq!(outcome.velocity.y, -600.0);

    // The held button no longer sustains the jump after the bump.
    let outcome = state.advance(&jump_held(), &airborne(), &tuning, Vec2::new(0.0, -650.0), DT);
    assert_eq!(outcome.velocity.y, -650.0);
}

// -----------------------------------------------------------------------------
// Horizontal mode and invariants
// -----------------------------------------------------------------------------

#[test]
fn test_idle_walking_transitions_by_dead_zone() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);

    let walk = InputSnapshot {
        axis: Vec2::new(0.5, 0.0),
        ..Default::default()
    };
    let outcome = state.advance(&walk, &grounded_on(Surface::Ground), &tuning, Vec2::ZERO, DT);
    assert_eq!(state.mode, MovementMode::Walking);
    assert_eq!(outcome.velocity.x, 0.5 * tuning.movement_speed);

    let nudge = InputSnapshot {
        axis: Vec2::new(0.05, 0.0),
        ..Default::default()
    };
    let outcome = state.advance(&nudge, &grounded_on(Surface::Ground), &tuning, Vec2::ZERO, DT);
    assert_eq!(state.mode, MovementMode::Idle);
    assert_eq!(outcome.velocity.x, 0.0);
}

#[test]
fn test_timers_and_jump_count_stay_in_bounds() {
    let tuning = MovementTuning::default();
    let mut state = MotionState::default();

    // A deterministic stress sequence cycling presses, holds, walls, and
    // landings.
    for i in 0..600usize {
        let input = InputSnapshot {
            axis: Vec2::new(
                match i % 5 {
                    0 => 1.0,
                    1 => -1.0,
                    _ => 0.0,
                },
                if i % 7 == 0 { -1.0 } else { 0.0 },
            ),
            jump_pressed: i % 3 == 0,
            jump_held: i % 3 != 2,
        };
        let probes = match i % 4 {
            0 => grounded_on(Surface::Ground),
            1 => grounded_on(Surface::OneWayPlatform),
            2 => ProbeSet {
                right: Some(hit(Surface::Wall)),
                ..Default::default()
            },
            _ => airborne(),
        };
        state.advance(&input, &probes, &tuning, Vec2::new(0.0, -100.0), DT);

        assert!(state.jump_count <= tuning.max_jumps);
        assert!(state.coyote_timer >= 0.0);
        assert!(state.jump_buffer_timer >= 0.0);
        assert!(state.jump_hold_timer >= 0.0);
        assert!(state.wall_cling_lockout_timer >= 0.0);
        assert!(state.platform_drop_timer >= 0.0);
        if state.mode == MovementMode::WallClinging {
            assert_ne!(state.wall_cling_direction, 0);
        }
    }
}

#[test]
fn test_landing_resets_jump_state() {
    let tuning = MovementTuning::default();
    let mut state = grounded_state(&tuning);
    state.advance(
        &jump_press(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::ZERO,
        DT,
    );
    state.advance(&idle(), &airborne(), &tuning, Vec2::new(0.0, 300.0), DT);
    state.advance(&jump_press(), &airborne(), &tuning, Vec2::new(0.0, 100.0), DT);
    assert_eq!(state.jump_count, 2);

    // Hold timer is already zero after the releases above; landing resets.
    state.advance(
        &idle(),
        &grounded_on(Surface::Ground),
        &tuning,
        Vec2::new(0.0, -100.0),
        DT,
    );
    assert!(state.mode.is_grounded());
    assert_eq!(state.jump_count, 0);
    assert!(!state.head_bumped);
}

// -----------------------------------------------------------------------------
// Tuning configuration
// -----------------------------------------------------------------------------

#[test]
fn test_tuning_defaults_preserve_relative_design() {
    let tuning = MovementTuning::default();
    assert!(tuning.air_jump_strength < tuning.jump_strength);
    assert!(tuning.wall_jump_horizontal > tuning.air_jump_strength * 0.5);
    assert!(tuning.wall_slide_damping < 1.0);
    assert!(tuning.max_jumps >= 1);
}

#[test]
fn test_tuning_ron_overrides_and_defaults() {
    let tuning: MovementTuning = ron::Options::default()
        .from_str("(max_jumps: 3, jump_strength: 700.0)")
        .unwrap();
    assert_eq!(tuning.max_jumps, 3);
    assert_eq!(tuning.jump_strength, 700.0);
    // Unlisted fields keep their defaults.
    assert_eq!(tuning.coyote_time, MovementTuning::default().coyote_time);
}

#[test]
fn test_tuning_rejects_malformed_ron() {
    let result = ron::Options::default().from_str::<MovementTuning>("(max_jumps: \"three\")");
    assert!(result.is_err());
}
