//! Movement domain: the character controller core.
//!
//! An environment probe classifies surroundings with four shape casts each
//! fixed tick, then the motion state machine converts the input snapshot and
//! probe results into a velocity for the rigid body.

mod bootstrap;
mod components;
pub mod config;
mod events;
pub mod machine;
mod resources;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{
    GameLayer, Ground, MotionState, MovementMode, OneWayPlatform, Player, ProbeHit, ProbeSet,
    Surface, Wall,
};
pub use events::JumpPerformed;
pub use machine::JumpKind;
pub use resources::{MovementInput, MovementTuning, ProbeConfig};

pub(crate) use bootstrap::spawn_player;
#[cfg(feature = "dev-tools")]
pub(crate) use systems::probes::{half_extents, probe_reach};

use avian2d::prelude::*;
use bevy::prelude::*;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<ProbeConfig>()
            .init_resource::<MovementInput>()
            .add_message::<JumpPerformed>()
            .add_systems(
                Startup,
                (config::load_tuning_at_startup, apply_gravity_setting).chain(),
            )
            .add_systems(Update, systems::sample_input)
            .add_systems(
                FixedUpdate,
                (
                    systems::update_probes,
                    systems::advance_motion,
                    systems::apply_platform_filter,
                    systems::clear_input_edges,
                )
                    .chain(),
            );
    }
}

/// Free-fall acceleration comes from the engine; the state machine only
/// overrides velocity components per its transition rules.
fn apply_gravity_setting(tuning: Res<MovementTuning>, mut gravity: ResMut<Gravity>) {
    gravity.0 = Vec2::NEG_Y * tuning.gravity;
}
