//! Debug overlay (dev-tools): probe visualization.
//!
//! Draws the four probe volumes each frame, green where the cast hit and red
//! where it missed, with the hit point circled in yellow.

use avian2d::prelude::*;
use bevy::color::palettes::css::{GREEN, RED, YELLOW};
use bevy::prelude::*;

use crate::movement::{MovementTuning, Player, ProbeSet, half_extents, probe_reach};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_probe_gizmos);
    }
}

fn draw_probe_gizmos(
    mut gizmos: Gizmos,
    tuning: Res<MovementTuning>,
    players: Query<(&Transform, &Collider, &ProbeSet), With<Player>>,
) {
    for (transform, collider, probes) in &players {
        let origin = transform.translation.truncate();
        let half = half_extents(collider);

        let casts = [
            (Vec2::NEG_Y, probe_reach(half.y, &tuning), probes.down.as_ref()),
            (Vec2::Y, probe_reach(half.y, &tuning), probes.up.as_ref()),
            (Vec2::NEG_X, probe_reach(half.x, &tuning), probes.left.as_ref()),
            (Vec2::X, probe_reach(half.x, &tuning), probes.right.as_ref()),
        ];

        for (direction, reach, hit) in casts {
            let color = if hit.is_some() { GREEN } else { RED };
            gizmos.line_2d(origin, origin + direction * reach, color);
            gizmos.circle_2d(origin + direction * reach, tuning.probe_radius, color);

            if let Some(hit) = hit {
                gizmos.circle_2d(hit.point, tuning.probe_radius, YELLOW);
            }
        }
    }
}
