// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Input/state pass
//!
//! Reduces held keys and last frame's contact sensors into the discrete
//! [`State`] of every controlled entity, and starts jumps.
//!
//! Intent flags are derived from the *previous* frame's `grounded` and
//! `sliding` before those are refreshed from the sensors, so a roll cannot
//! start on the same frame the entity touches down.

use crate::config::PhysicsTuning;
use crate::ecs::components::{Orientation, Sensors, State, StateKey};
use crate::ecs::{Entity, Signature, System, World};
use crate::events::{Event, VelocityChange};
use crate::frame::FrameContext;
use crate::input::{InputState, Key};
use log::trace;

const REQUIRED: Signature = Signature::STATE
    .union(Signature::CONTROLLER)
    .union(Signature::TRANSFORM);

/// Clip played when a jump starts
pub const JUMP_CLIP: &str = "jump.wav";

/// Turns input and sensors into discrete state
#[derive(Debug, Default)]
pub struct InputSystem;

impl InputSystem {
    /// Create the pass
    pub fn new() -> Self {
        InputSystem
    }
}

impl System for InputSystem {
    fn update(&mut self, ctx: &mut FrameContext<'_>, world: &mut World) {
        let tuning = &ctx.config.physics;
        let mut outgoing = Vec::new();

        for entity in world.query(REQUIRED) {
            let Some(sensors) = world.transform(entity).map(|t| t.sensors) else {
                continue;
            };
            let Some(state) = world.state_mut(entity) else {
                continue;
            };
            apply_input(entity, state, sensors, ctx.input, tuning, &mut outgoing);
        }

        for event in outgoing {
            world.publish(event);
        }
    }

    fn name(&self) -> &str {
        "Input"
    }
}

fn apply_input(
    entity: Entity,
    s: &mut State,
    sensors: Sensors,
    input: &InputState,
    tuning: &PhysicsTuning,
    outgoing: &mut Vec<Event>,
) {
    s.move_right = input.is_held(Key::Right) && !s.sliding;
    s.move_left = input.is_held(Key::Left) && !s.sliding;
    s.rolling = input.is_held(Key::Down) && s.grounded;
    s.shooting = input.is_held(Key::Shoot);

    s.grounded = sensors.bottom;
    s.left_slide = sensors.left;
    s.right_slide = sensors.right;
    s.sliding = (s.left_slide || s.right_slide) && !s.grounded;

    if s.grounded {
        s.jumping = false;
        s.jump_count = 0;
        s.jump_frame_count = 0;
    }

    select_key(s);

    if input.is_held(Key::Jump) {
        s.jump_frame_count = s.jump_frame_count.saturating_add(1);
    }

    if input.just_pressed(Key::Jump) && s.jump_count < tuning.max_jumps {
        s.jumping = true;
        // a wall counts as ground for jump gating
        if !s.sliding {
            s.jump_count += 1;
        }

        let speed_x = if s.left_slide && !s.grounded {
            s.key = StateKey::Right;
            s.orientation = Orientation::Right;
            tuning.wall_kick_speed
        } else if s.right_slide && !s.grounded {
            s.key = StateKey::Left;
            s.orientation = Orientation::Left;
            -tuning.wall_kick_speed
        } else {
            0.0
        };
        let speed_y = -tuning.jump_speed / f32::from(s.jump_count.max(1));

        trace!("{} jumps (#{}) with pulse ({}, {})", entity, s.jump_count, speed_x, speed_y);
        outgoing.push(Event::PhysicsPulse(VelocityChange::speed(entity, speed_x, speed_y)));
        outgoing.push(Event::Audio {
            clip: JUMP_CLIP.to_string(),
        });
    }

    if s.jumping
        && input.just_released(Key::Jump)
        && !s.sliding
        && s.jump_frame_count < tuning.release_frame_threshold
    {
        s.jumping = false;
        s.jump_frame_count = 0;
        outgoing.push(Event::PhysicsPulse(VelocityChange::speed(
            entity,
            0.0,
            tuning.release_pulse,
        )));
    }
}

/// Pick exactly one animation key by fixed priority
///
/// base (idle/left/right) < jump < roll < shoot < wall slide
fn select_key(s: &mut State) {
    if s.move_left {
        s.key = StateKey::Left;
        s.orientation = Orientation::Left;
    } else if s.move_right {
        s.key = StateKey::Right;
        s.orientation = Orientation::Right;
    } else {
        s.key = StateKey::Idle;
    }

    if !s.grounded {
        s.key = StateKey::Jump;
    }
    if s.rolling {
        s.key = StateKey::Roll;
    }
    if s.shooting {
        s.key = StateKey::Shoot;
    }

    if s.right_slide && !s.grounded {
        s.key = StateKey::WallRight;
        s.jump_count = 0;
    }
    if s.left_slide && !s.grounded {
        s.key = StateKey::WallLeft;
        s.jump_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded() -> Sensors {
        Sensors {
            bottom: true,
            ..Default::default()
        }
    }

    fn run(s: &mut State, sensors: Sensors, input: &InputState) -> Vec<Event> {
        let mut out = Vec::new();
        apply_input(Entity::new(0), s, sensors, input, &PhysicsTuning::default(), &mut out);
        out
    }

    #[test]
    fn test_idle_and_run_keys() {
        let mut s = State::default();
        let mut input = InputState::new();
        run(&mut s, grounded(), &input);
        assert_eq!(s.key, StateKey::Idle);
        assert!(s.grounded);

        input.press(Key::Left);
        run(&mut s, grounded(), &input);
        assert_eq!(s.key, StateKey::Left);
        assert_eq!(s.orientation, Orientation::Left);
    }

    #[test]
    fn test_airborne_is_jump_key() {
        let mut s = State::default();
        run(&mut s, Sensors::default(), &InputState::new());
        assert_eq!(s.key, StateKey::Jump);
        assert!(!s.grounded);
    }

    #[test]
    fn test_roll_requires_previous_ground() {
        let mut s = State::default();
        let mut input = InputState::new();
        input.press(Key::Down);
        run(&mut s, grounded(), &input);
        assert!(!s.rolling);
        run(&mut s, grounded(), &input);
        assert!(s.rolling);
        assert_eq!(s.key, StateKey::Roll);
    }

    #[test]
    fn test_wall_slide_overrides_jump_and_blocks_intent() {
        let mut s = State::default();
        let mut input = InputState::new();
        input.press(Key::Right);
        let wall = Sensors {
            right: true,
            ..Default::default()
        };
        run(&mut s, wall, &input);
        assert_eq!(s.key, StateKey::WallRight);
        assert!(s.sliding);

        run(&mut s, wall, &input);
        assert!(!s.move_right);
    }

    #[test]
    fn test_jump_emits_pulse_and_audio() {
        let mut s = State::default();
        let mut input = InputState::new();
        input.press(Key::Jump);
        let events = run(&mut s, grounded(), &input);
        assert_eq!(
            events,
            vec![
                Event::PhysicsPulse(VelocityChange::speed(Entity::new(0), 0.0, -5.0)),
                Event::Audio {
                    clip: JUMP_CLIP.to_string()
                },
            ]
        );
        assert!(s.jumping);
        assert_eq!(s.jump_count, 1);
    }

    #[test]
    fn test_second_jump_is_weaker() {
        let mut s = State::default();
        let mut input = InputState::new();
        input.press(Key::Jump);
        run(&mut s, grounded(), &input);

        input.begin_frame();
        input.release(Key::Jump);
        run(&mut s, Sensors::default(), &input);

        input.begin_frame();
        input.press(Key::Jump);
        let events = run(&mut s, Sensors::default(), &input);
        assert_eq!(
            events[0],
            Event::PhysicsPulse(VelocityChange::speed(Entity::new(0), 0.0, -2.5))
        );
    }

    #[test]
    fn test_wall_jump_kicks_away() {
        let mut s = State::default();
        let mut input = InputState::new();
        let left_wall = Sensors {
            left: true,
            ..Default::default()
        };
        run(&mut s, left_wall, &input);

        input.press(Key::Jump);
        let events = run(&mut s, left_wall, &input);
        assert_eq!(
            events[0],
            Event::PhysicsPulse(VelocityChange::speed(Entity::new(0), 5.0, -5.0))
        );
        assert_eq!(s.orientation, Orientation::Right);
        assert_eq!(s.jump_count, 0);
    }

    #[test]
    fn test_early_release_dampens() {
        let mut s = State::default();
        let mut input = InputState::new();
        input.press(Key::Jump);
        run(&mut s, grounded(), &input);

        input.begin_frame();
        input.release(Key::Jump);
        let events = run(&mut s, Sensors::default(), &input);
        assert_eq!(
            events,
            vec![Event::PhysicsPulse(VelocityChange::speed(Entity::new(0), 0.0, 2.0))]
        );
        assert!(!s.jumping);
    }

    #[test]
    fn test_late_release_does_not_dampen() {
        let mut s = State::default();
        let mut input = InputState::new();
        input.press(Key::Jump);
        run(&mut s, grounded(), &input);
        for _ in 0..30 {
            input.begin_frame();
            run(&mut s, Sensors::default(), &input);
        }
        input.begin_frame();
        input.release(Key::Jump);
        assert!(run(&mut s, Sensors::default(), &input).is_empty());
    }
}
