//! View domain: animation state mirror.
//!
//! Maps the movement mode onto animation states and advances frame counters.
//! Sprite-sheet consumers read `AnimationController`; the controller itself
//! owns no simulation state.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{JumpPerformed, MotionState, MovementMode, Player};

/// Animation states for the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    Jump,
    DoubleJump,
    Fall,
    WallCling,
}

/// Frame count and looping behavior per state.
fn frames_for(state: AnimationState) -> (u32, bool) {
    match state {
        AnimationState::Idle => (4, true),
        AnimationState::Walk => (6, true),
        AnimationState::Jump => (3, false),
        AnimationState::DoubleJump => (4, false),
        AnimationState::Fall => (2, true),
        AnimationState::WallCling => (2, true),
    }
}

/// Component for animation playback on the player sprite.
#[derive(Component, Debug)]
pub struct AnimationController {
    pub state: AnimationState,
    pub current_frame: u32,
    pub total_frames: u32,
    pub frame_timer: f32,
    /// Seconds per frame.
    pub frame_duration: f32,
    pub looping: bool,
    /// Whether a non-looping animation has finished.
    pub finished: bool,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self {
            state: AnimationState::Idle,
            current_frame: 0,
            total_frames: 4,
            frame_timer: 0.0,
            frame_duration: 0.15,
            looping: true,
            finished: false,
        }
    }
}

impl AnimationController {
    pub fn set_state(&mut self, state: AnimationState) {
        self.state = state;
        let (total_frames, looping) = frames_for(state);
        self.total_frames = total_frames;
        self.looping = looping;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.finished = false;
    }
}

/// Mirrors the movement mode into the controller. The double-jump animation
/// is distinguished by the jump counter carried on the message.
pub(crate) fn sync_animation_state(
    mut jumps: MessageReader<JumpPerformed>,
    mut players: Query<(&MotionState, &mut AnimationController), With<Player>>,
) {
    let last_jump = jumps.read().last().copied();

    for (state, mut controller) in &mut players {
        let target = match state.mode {
            MovementMode::Idle => AnimationState::Idle,
            MovementMode::Walking => AnimationState::Walk,
            MovementMode::Jumping => match last_jump {
                Some(jump) if jump.jump_count >= 2 => AnimationState::DoubleJump,
                Some(_) => AnimationState::Jump,
                None if controller.state == AnimationState::DoubleJump => {
                    AnimationState::DoubleJump
                }
                None => AnimationState::Jump,
            },
            MovementMode::Falling => AnimationState::Fall,
            MovementMode::WallClinging => AnimationState::WallCling,
        };

        // A fresh jump restarts its animation even if the state name matches.
        if target != controller.state || last_jump.is_some() {
            controller.set_state(target);
        }
    }
}

pub(crate) fn advance_frames(time: Res<Time>, mut controllers: Query<&mut AnimationController>) {
    let dt = time.delta_secs();

    for mut controller in &mut controllers {
        if controller.finished {
            continue;
        }

        controller.frame_timer += dt;
        while controller.frame_timer >= controller.frame_duration {
            controller.frame_timer -= controller.frame_duration;
            controller.current_frame += 1;
            if controller.current_frame >= controller.total_frames {
                if controller.looping {
                    controller.current_frame = 0;
                } else {
                    controller.current_frame = controller.total_frames - 1;
                    controller.finished = true;
                    break;
                }
            }
        }
    }
}
