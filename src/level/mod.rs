//! Level domain: test room layout and player respawn.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::hazards::{Hazard, PlayerDied};
use crate::movement::{self, GameLayer, Ground, OneWayPlatform, Wall};

/// Where the player appears on startup and after death.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SpawnPoint(pub Vec2);

impl Default for SpawnPoint {
    fn default() -> Self {
        Self(Vec2::new(0.0, 0.0))
    }
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnPoint>()
            .add_systems(Startup, (spawn_test_room, spawn_initial_player))
            .add_systems(Update, respawn_player);
    }
}

fn spawn_initial_player(mut commands: Commands, spawn: Res<SpawnPoint>) {
    movement::spawn_player(&mut commands, spawn.0);
}

fn respawn_player(
    mut deaths: MessageReader<PlayerDied>,
    spawn: Res<SpawnPoint>,
    mut commands: Commands,
) {
    for _ in deaths.read() {
        movement::spawn_player(&mut commands, spawn.0);
    }
}

fn spawn_test_room(mut commands: Commands) {
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let hazard_color = Color::srgb(0.8, 0.25, 0.2);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);
    let platform_layers = CollisionLayers::new(GameLayer::OneWayPlatform, [GameLayer::Player]);
    let hazard_layers = CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player]);

    // Ground
    commands.spawn((
        Ground,
        Sprite {
            color: ground_color,
            custom_size: Some(Vec2::new(1600.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -220.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(1600.0, 40.0),
        ground_layers,
    ));

    // Side walls
    for x in [-620.0, 620.0] {
        commands.spawn((
            Wall,
            Sprite {
                color: wall_color,
                custom_size: Some(Vec2::new(40.0, 640.0)),
                ..default()
            },
            Transform::from_xyz(x, 100.0, 0.0),
            RigidBody::Static,
            Collider::rectangle(40.0, 640.0),
            wall_layers,
        ));
    }

    // One-way platforms at staggered heights
    for (x, y) in [(-260.0, -110.0), (0.0, -30.0), (260.0, 50.0)] {
        commands.spawn((
            OneWayPlatform,
            Sprite {
                color: platform_color,
                custom_size: Some(Vec2::new(180.0, 14.0)),
                ..default()
            },
            Transform::from_xyz(x, y, 0.0),
            RigidBody::Static,
            Collider::rectangle(180.0, 14.0),
            platform_layers,
        ));
    }

    // Hazard strip sitting on the ground
    commands.spawn((
        Hazard,
        Sensor,
        Sprite {
            color: hazard_color,
            custom_size: Some(Vec2::new(200.0, 16.0)),
            ..default()
        },
        Transform::from_xyz(420.0, -192.0, 0.0),
        Collider::rectangle(200.0, 16.0),
        hazard_layers,
    ));
}
