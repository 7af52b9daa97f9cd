//! Movement domain: messages emitted by the state machine.

use bevy::ecs::message::Message;

use crate::movement::JumpKind;

/// Emitted once per successful jump trigger; consumed by the view layer to
/// drive jump animation and VFX.
#[derive(Debug, Clone, Copy)]
pub struct JumpPerformed {
    pub kind: JumpKind,
    pub jump_count: u8,
}

impl Message for JumpPerformed {}
