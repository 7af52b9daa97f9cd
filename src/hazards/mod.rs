//! Hazards domain: deadly surfaces and kill-on-contact.

use avian2d::prelude::*;
use bevy::ecs::message::{Message, MessageWriter};
use bevy::prelude::*;

use crate::movement::{GameLayer, Player};

/// Marker for colliders that kill the player on contact.
#[derive(Component, Debug)]
pub struct Hazard;

/// Emitted when the player touches a hazard; the level domain respawns.
#[derive(Debug)]
pub struct PlayerDied;

impl Message for PlayerDied {}

pub struct HazardsPlugin;

impl Plugin for HazardsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayerDied>()
            .add_systems(FixedUpdate, kill_on_hazard_contact);
    }
}

fn kill_on_hazard_contact(
    spatial_query: SpatialQuery,
    mut died: MessageWriter<PlayerDied>,
    mut commands: Commands,
    players: Query<(Entity, &Transform, &Collider), With<Player>>,
) {
    let filter = SpatialQueryFilter::from_mask(GameLayer::Hazard);

    for (entity, transform, collider) in &players {
        let touching = spatial_query.shape_intersections(
            collider,
            transform.translation.truncate(),
            0.0,
            &filter,
        );

        if !touching.is_empty() {
            info!("Player touched a hazard");
            commands.entity(entity).despawn();
            died.write(PlayerDied);
        }
    }
}
