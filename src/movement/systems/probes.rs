//! Movement domain: the environment probe.
//!
//! Four circular shape casts per fixed tick classify what the character is
//! touching. The casts are read-only queries; the only other consumer is the
//! dev-tools gizmo overlay.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    GameLayer, MotionState, MovementTuning, OneWayPlatform, Player, ProbeConfig, ProbeHit,
    ProbeSet, Surface, Wall,
};

pub(crate) fn update_probes(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    config: Res<ProbeConfig>,
    walls: Query<(), With<Wall>>,
    platforms: Query<(), With<OneWayPlatform>>,
    mut query: Query<(&Transform, &Collider, &MotionState, &mut ProbeSet), With<Player>>,
) {
    for (transform, collider, state, mut probes) in &mut query {
        let origin = transform.translation.truncate();
        let half = half_extents(collider);
        let probe = Collider::circle(tuning.probe_radius);

        // While dropping through a platform, the downward probe must not see
        // the platform layer or the drop would be instantly re-grounded.
        let ground_mask = if state.platform_drop_timer > 0.0 {
            drop_through_mask(config.ground_mask)
        } else {
            config.ground_mask
        };

        let classify = |entity: Entity| {
            if platforms.contains(entity) {
                Surface::OneWayPlatform
            } else if walls.contains(entity) {
                Surface::Wall
            } else {
                Surface::Ground
            }
        };

        let cast = |dir: Dir2, reach: f32, mask: LayerMask| -> Option<ProbeHit> {
            let filter = SpatialQueryFilter::from_mask(mask);
            spatial_query
                .cast_shape(
                    &probe,
                    origin,
                    0.0,
                    dir,
                    &ShapeCastConfig::from_max_distance(reach),
                    &filter,
                )
                .map(|hit| ProbeHit {
                    surface: classify(hit.entity),
                    point: hit.point1,
                })
        };

        let vertical_reach = probe_reach(half.y, &tuning);
        let lateral_reach = probe_reach(half.x, &tuning);

        probes.down = cast(Dir2::NEG_Y, vertical_reach, ground_mask);
        probes.up = cast(Dir2::Y, vertical_reach, config.ceiling_mask);
        probes.left = cast(Dir2::NEG_X, lateral_reach, config.wall_mask);
        probes.right = cast(Dir2::X, lateral_reach, config.wall_mask);
    }
}

/// The downward probe mask while a drop-through is in progress: the
/// configured ground mask minus the one-way platform layer.
pub(crate) fn drop_through_mask(ground_mask: LayerMask) -> LayerMask {
    let mut mask = ground_mask;
    mask.remove(GameLayer::OneWayPlatform);
    mask
}

/// Cast distance from the body center so the probe circle ends
/// `probe_distance` beyond the collider edge along the cast axis.
pub(crate) fn probe_reach(half_extent: f32, tuning: &MovementTuning) -> f32 {
    (half_extent - tuning.probe_radius).max(0.0) + tuning.probe_distance
}

/// Half extents of the character collider, with a fallback matching the
/// default player rectangle.
pub(crate) fn half_extents(collider: &Collider) -> Vec2 {
    match collider.shape_scaled().as_cuboid() {
        Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
        None => Vec2::new(12.0, 24.0),
    }
}
