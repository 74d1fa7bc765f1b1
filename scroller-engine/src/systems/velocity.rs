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
//! Velocity pass
//!
//! Applies queued velocity events, then integrates acceleration into speed
//! for every moving entity: run/stop/roll acceleration, gravity, the
//! wall-slide fall brake, and per-axis speed clamping.
//!
//! Rows are independent, so with the `parallel` feature the integration
//! runs over the component arrays with rayon and produces the same result
//! as the sequential loop.

use crate::config::PhysicsTuning;
use crate::ecs::components::{Orientation, State, Transform};
use crate::ecs::{Signature, System, World};
use crate::events::{Event, EventKind, InboxId, Subscription, VelocityChange};
use crate::frame::FrameContext;
use log::warn;

const REQUIRED: Signature = Signature::TRANSFORM
    .union(Signature::STATE)
    .union(Signature::VELOCITY);

/// Integrates acceleration into speed
#[derive(Debug, Default)]
pub struct VelocitySystem {
    inbox: Option<InboxId>,
    subscriptions: Vec<Subscription>,
}

impl VelocitySystem {
    /// Create the pass
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for VelocitySystem {
    fn init(&mut self, world: &mut World) {
        let bus = world.events_mut();
        let inbox = bus.open_inbox();
        self.subscriptions.push(bus.subscribe(EventKind::PhysicsPulse, inbox));
        self.subscriptions.push(bus.subscribe(EventKind::PhysicsSet, inbox));
        self.inbox = Some(inbox);
    }

    fn shutdown(&mut self, world: &mut World) {
        let bus = world.events_mut();
        bus.unsubscribe_all(self.subscriptions.drain(..));
        if let Some(inbox) = self.inbox.take() {
            bus.drain(inbox);
        }
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>, world: &mut World) {
        if let Some(inbox) = self.inbox {
            world.handle_events(inbox, apply_velocity_event);
        }

        let tuning = &ctx.config.physics;
        let factor = ctx.time.time_factor;
        let (signatures, transforms, states) = world.motion_rows_mut();

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            transforms
                .par_iter_mut()
                .zip(states.par_iter())
                .zip(signatures.par_iter())
                .filter(|(_, signature)| signature.matches(REQUIRED))
                .for_each(|((transform, state), _)| integrate(transform, state, tuning, factor));
        }

        #[cfg(not(feature = "parallel"))]
        for ((transform, state), signature) in
            transforms.iter_mut().zip(states.iter()).zip(signatures)
        {
            if signature.matches(REQUIRED) {
                integrate(transform, state, tuning, factor);
            }
        }
    }

    fn name(&self) -> &str {
        "Velocity"
    }
}

fn apply_velocity_event(world: &mut World, event: Event) {
    let (change, absolute) = match event {
        Event::PhysicsPulse(change) => (change, false),
        Event::PhysicsSet(change) => (change, true),
        _ => return,
    };
    let VelocityChange {
        entity,
        speed_x,
        speed_y,
        accel_x,
        accel_y,
    } = change;

    if !world.has(entity, Signature::TRANSFORM | Signature::VELOCITY) {
        warn!("dropping velocity event for {} without a velocity", entity);
        return;
    }
    let Some(t) = world.transform_mut(entity) else {
        return;
    };
    if absolute {
        t.speed_x = speed_x;
        t.speed_y = speed_y;
        t.accel_x = accel_x;
        t.accel_y = accel_y;
    } else {
        t.speed_x += speed_x;
        t.speed_y += speed_y;
    }
}

/// Integrate one entity's acceleration into its speed for this frame
pub fn integrate(t: &mut Transform, s: &State, tuning: &PhysicsTuning, time_factor: f32) {
    if !s.move_left && !s.move_right {
        stop(t, tuning);
    }
    if s.move_left {
        t.accel_x = -tuning.run_accel;
    } else if s.move_right {
        t.accel_x = tuning.run_accel;
    }

    if s.rolling {
        t.accel_x = match s.orientation {
            Orientation::Left => -tuning.roll_accel,
            Orientation::Right => tuning.roll_accel,
        };
    }

    t.accel_y = tuning.gravity;

    if s.sliding && t.speed_y > 0.0 {
        t.speed_y /= 2.0;
    }

    t.speed_x += t.accel_x * time_factor;
    t.speed_y += t.accel_y * time_factor;

    let bonus = if s.rolling { tuning.roll_speed_bonus } else { 0.0 };
    let limit_x = (t.max_speed_x + bonus).max(0.0);
    let limit_y = (t.max_speed_y + bonus).max(0.0);
    t.speed_x = t.speed_x.clamp(-limit_x, limit_x);
    t.speed_y = t.speed_y.clamp(-limit_y, limit_y);
}

/// Decelerate toward rest, snapping to zero inside the epsilon band
fn stop(t: &mut Transform, tuning: &PhysicsTuning) {
    if t.speed_x > 0.0 {
        t.accel_x = -tuning.stop_decel;
    }
    if t.speed_x < 0.0 {
        t.accel_x = tuning.stop_decel;
    }
    if t.speed_x.abs() < tuning.stop_epsilon {
        t.accel_x = 0.0;
        t.speed_x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn body() -> Transform {
        Transform::new(0.0, 0.0, 9, 14).with_max_speed(2.2, 5.0)
    }

    #[test]
    fn test_run_accelerates_and_clamps() {
        let tuning = PhysicsTuning::default();
        let mut t = body();
        let s = State {
            move_right: true,
            ..Default::default()
        };
        integrate(&mut t, &s, &tuning, 1.0);
        assert_relative_eq!(t.speed_x, 0.2);
        for _ in 0..20 {
            integrate(&mut t, &s, &tuning, 1.0);
        }
        assert_relative_eq!(t.speed_x, 2.2, epsilon = 1e-5);
    }

    #[test]
    fn test_stop_snaps_to_zero() {
        let tuning = PhysicsTuning::default();
        let mut t = body();
        t.speed_x = 1.0;
        let s = State::default();
        integrate(&mut t, &s, &tuning, 1.0);
        assert_relative_eq!(t.speed_x, 0.7, epsilon = 1e-5);
        integrate(&mut t, &s, &tuning, 1.0);
        integrate(&mut t, &s, &tuning, 1.0);
        assert_relative_eq!(t.speed_x, 0.1, epsilon = 1e-5);
        integrate(&mut t, &s, &tuning, 1.0);
        assert_eq!(t.speed_x, 0.0);
        assert_eq!(t.accel_x, 0.0);
    }

    #[test]
    fn test_gravity_scales_with_time_factor() {
        let tuning = PhysicsTuning::default();
        let mut t = body();
        integrate(&mut t, &State::default(), &tuning, 2.0);
        assert_relative_eq!(t.speed_y, 0.26);
        assert_relative_eq!(t.accel_y, 0.13);
    }

    #[test]
    fn test_roll_uses_bonus_limit() {
        let tuning = PhysicsTuning::default();
        let mut t = body();
        let s = State {
            rolling: true,
            orientation: Orientation::Left,
            ..Default::default()
        };
        for _ in 0..5 {
            integrate(&mut t, &s, &tuning, 1.0);
        }
        assert_relative_eq!(t.speed_x, -4.2, epsilon = 1e-5);
    }

    #[test]
    fn test_wall_slide_halves_fall() {
        let tuning = PhysicsTuning::default();
        let mut t = body();
        t.speed_y = 4.0;
        let s = State {
            sliding: true,
            ..Default::default()
        };
        integrate(&mut t, &s, &tuning, 1.0);
        assert_relative_eq!(t.speed_y, 2.13, epsilon = 1e-5);
    }

    #[test]
    fn test_pulse_and_set_events() {
        let mut world = World::new();
        let entity = world.create_entity().unwrap();
        world.insert_transform(entity, body());
        world.add_components(entity, Signature::VELOCITY);

        apply_velocity_event(
            &mut world,
            Event::PhysicsPulse(VelocityChange::speed(entity, 1.0, -5.0)),
        );
        apply_velocity_event(
            &mut world,
            Event::PhysicsPulse(VelocityChange::speed(entity, 0.5, 0.0)),
        );
        let t = world.transform(entity).unwrap();
        assert_relative_eq!(t.speed_x, 1.5);
        assert_relative_eq!(t.speed_y, -5.0);

        apply_velocity_event(
            &mut world,
            Event::PhysicsSet(VelocityChange {
                entity,
                speed_x: 0.0,
                speed_y: 0.0,
                accel_x: 0.1,
                accel_y: 0.0,
            }),
        );
        let t = world.transform(entity).unwrap();
        assert_eq!((t.speed_x, t.speed_y, t.accel_x), (0.0, 0.0, 0.1));
    }

    #[test]
    fn test_event_for_static_entity_is_dropped() {
        let mut world = World::new();
        let entity = world.create_entity().unwrap();
        world.insert_transform(entity, body());
        apply_velocity_event(
            &mut world,
            Event::PhysicsPulse(VelocityChange::speed(entity, 1.0, 0.0)),
        );
        assert_eq!(world.transform(entity).unwrap().speed_x, 0.0);
    }

    #[test]
    fn test_pulse_for_destroyed_entity_skips_new_occupant() {
        let mut world = World::new();
        let mut pass = VelocitySystem::new();
        pass.init(&mut world);
        let inbox = pass.inbox.unwrap();

        let old = world.create_entity().unwrap();
        world.insert_transform(old, body());
        world.add_components(old, Signature::VELOCITY);
        world.publish(Event::PhysicsPulse(VelocityChange::speed(old, 3.0, 0.0)));
        world.destroy_entity(old);

        let new = world.create_entity().unwrap();
        assert_eq!(new, old);
        world.insert_transform(new, body());
        world.add_components(new, Signature::VELOCITY);
        world.handle_events(inbox, apply_velocity_event);
        assert_eq!(world.transform(new).unwrap().speed_x, 0.0);
    }
}
