//! View domain: dust particle playback.
//!
//! Looping puffs at the feet while grounded and moving, a burst on every
//! jump. Puffs are plain fading sprites, deterministic by design.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{JumpPerformed, MotionState, Player};

const PUFF_INTERVAL: f32 = 0.12;
const PUFF_LIFETIME: f32 = 0.4;
const PUFF_SIZE: f32 = 6.0;
const FOOT_OFFSET: f32 = 22.0;

const BURST_DRIFTS: [Vec2; 6] = [
    Vec2::new(-60.0, 20.0),
    Vec2::new(-35.0, 45.0),
    Vec2::new(-12.0, 60.0),
    Vec2::new(12.0, 60.0),
    Vec2::new(35.0, 45.0),
    Vec2::new(60.0, 20.0),
];

#[derive(Component, Debug, Default)]
pub struct DustEmitter {
    timer: f32,
}

#[derive(Component, Debug)]
pub struct DustPuff {
    age: f32,
    lifetime: f32,
    drift: Vec2,
}

fn spawn_puff(commands: &mut Commands, position: Vec2, drift: Vec2) {
    commands.spawn((
        DustPuff {
            age: 0.0,
            lifetime: PUFF_LIFETIME,
            drift,
        },
        Sprite {
            color: Color::srgba(0.75, 0.72, 0.65, 0.8),
            custom_size: Some(Vec2::splat(PUFF_SIZE)),
            ..default()
        },
        Transform::from_translation(position.extend(-1.0)),
    ));
}

/// Dust trails only while the character is on the ground and moving, matching
/// the modes the animation layer treats as "on foot".
pub(crate) fn emit_walk_dust(
    time: Res<Time>,
    mut commands: Commands,
    mut players: Query<(&Transform, &MotionState, &LinearVelocity, &mut DustEmitter), With<Player>>,
) {
    let dt = time.delta_secs();

    for (transform, state, velocity, mut emitter) in &mut players {
        if !state.mode.is_grounded() || velocity.x.abs() < 1.0 {
            emitter.timer = 0.0;
            continue;
        }

        emitter.timer -= dt;
        if emitter.timer <= 0.0 {
            emitter.timer = PUFF_INTERVAL;
            let feet = transform.translation.truncate() - Vec2::new(0.0, FOOT_OFFSET);
            // Drift opposite the movement direction.
            spawn_puff(&mut commands, feet, Vec2::new(-velocity.x.signum() * 30.0, 25.0));
        }
    }
}

pub(crate) fn burst_on_jump(
    mut jumps: MessageReader<JumpPerformed>,
    mut commands: Commands,
    players: Query<&Transform, With<Player>>,
) {
    for _ in jumps.read() {
        for transform in &players {
            let feet = transform.translation.truncate() - Vec2::new(0.0, FOOT_OFFSET);
            for drift in BURST_DRIFTS {
                spawn_puff(&mut commands, feet, drift);
            }
        }
    }
}

pub(crate) fn update_dust(
    time: Res<Time>,
    mut commands: Commands,
    mut puffs: Query<(Entity, &mut DustPuff, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut puff, mut transform, mut sprite) in &mut puffs {
        puff.age += dt;
        if puff.age >= puff.lifetime {
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation += (puff.drift * dt).extend(0.0);
        let remaining = 1.0 - puff.age / puff.lifetime;
        sprite.color = sprite.color.with_alpha(0.8 * remaining);
    }
}
