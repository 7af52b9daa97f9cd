//! View domain: sprite rig attachment and velocity-driven tilt.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{MotionState, MovementMode, Player};
use crate::view::animation::AnimationController;
use crate::view::dust::DustEmitter;

/// Tilt applied to the body sprite while moving, in degrees.
const TILT_DEGREES: f32 = 5.0;
/// Horizontal shift of the eye toward the movement direction.
const EYE_SHIFT: f32 = 2.4;

#[derive(Component, Debug)]
pub struct PlayerBodySprite;

#[derive(Component, Debug)]
pub struct PlayerEyeSprite;

/// Attaches the cosmetic rig to a freshly spawned player body.
pub(crate) fn attach_sprite_rig(mut commands: Commands, players: Query<Entity, Added<Player>>) {
    for player in &players {
        commands
            .entity(player)
            .insert((AnimationController::default(), DustEmitter::default()))
            .with_children(|parent| {
                parent
                    .spawn((
                        PlayerBodySprite,
                        Sprite {
                            color: Color::srgb(0.92, 0.89, 0.78),
                            custom_size: Some(Vec2::new(24.0, 48.0)),
                            ..default()
                        },
                        Transform::default(),
                    ))
                    .with_children(|body| {
                        body.spawn((
                            PlayerEyeSprite,
                            Sprite {
                                color: Color::srgb(0.12, 0.12, 0.16),
                                custom_size: Some(Vec2::new(6.0, 6.0)),
                                ..default()
                            },
                            Transform::from_xyz(0.0, 10.0, 1.0),
                        ));
                    });
            });
    }
}

/// Tilts the body toward the movement direction and shifts the eye along.
/// The wall-cling pose wins over raw velocity.
pub(crate) fn tilt_sprite(
    players: Query<(&MotionState, &LinearVelocity), With<Player>>,
    mut bodies: Query<(Entity, &ChildOf, &mut Transform), With<PlayerBodySprite>>,
    mut eyes: Query<(&ChildOf, &mut Transform), (With<PlayerEyeSprite>, Without<PlayerBodySprite>)>,
) {
    let mut facings: Vec<(Entity, i8)> = Vec::new();

    for (body, child_of, mut transform) in &mut bodies {
        let Ok((state, velocity)) = players.get(child_of.parent()) else {
            continue;
        };

        let facing = if state.mode == MovementMode::WallClinging {
            state.wall_cling_direction
        } else if velocity.x > 0.01 {
            1
        } else if velocity.x < -0.01 {
            -1
        } else {
            0
        };

        transform.rotation = Quat::from_rotation_z(-f32::from(facing) * TILT_DEGREES.to_radians());
        facings.push((body, facing));
    }

    for (child_of, mut transform) in &mut eyes {
        if let Some((_, facing)) = facings.iter().find(|(body, _)| *body == child_of.parent()) {
            transform.translation.x = f32::from(*facing) * EYE_SHIFT;
        }
    }
}
