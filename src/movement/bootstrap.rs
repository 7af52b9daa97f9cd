//! Movement domain: player spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, MotionState, Player, ProbeSet};

pub const PLAYER_WIDTH: f32 = 24.0;
pub const PLAYER_HEIGHT: f32 = 48.0;

/// Spawn the player body at the given position. The view layer attaches its
/// sprite rig when it sees the new `Player` entity.
pub(crate) fn spawn_player(commands: &mut Commands, position: Vec2) {
    info!("Spawning player at {position}");

    commands.spawn((
        (Player, MotionState::default(), ProbeSet::default()),
        Transform::from_translation(position.extend(0.0)),
        Visibility::default(),
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_WIDTH, PLAYER_HEIGHT),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            Friction::new(0.0),
            Restitution::new(0.0),
            CollisionLayers::new(
                GameLayer::Player,
                [
                    GameLayer::Ground,
                    GameLayer::Wall,
                    GameLayer::OneWayPlatform,
                    GameLayer::Hazard,
                ],
            ),
        ),
    ));
}
