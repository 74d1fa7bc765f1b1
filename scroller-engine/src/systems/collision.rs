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

use crate::ecs::{Signature, System, World};
use crate::events::Event;
use crate::frame::FrameContext;
use log::trace;

/// Publishes a collision event for every overlap involving a controlled entity
#[derive(Debug, Default)]
pub struct EntityCollisionSystem;

impl EntityCollisionSystem {
    /// Create the pass
    pub fn new() -> Self {
        EntityCollisionSystem
    }
}

impl System for EntityCollisionSystem {
    fn update(&mut self, _ctx: &mut FrameContext<'_>, world: &mut World) {
        let colliders = world.colliders();
        let mut overlaps = Vec::new();

        for entity in world.query(Signature::CONTROLLER | Signature::TRANSFORM) {
            let Some(a) = world.transform(entity).map(|t| t.bounding_box()) else {
                continue;
            };
            for &other in &colliders {
                if other == entity {
                    continue;
                }
                let Some(b) = world.transform(other).map(|t| t.bounding_box()) else {
                    continue;
                };
                if World::collides(a, b) {
                    trace!("{} overlaps {}", entity, other);
                    overlaps.push(Event::Collision { a: entity, b: other });
                }
            }
        }

        for event in overlaps {
            world.publish(event);
        }
    }

    fn name(&self) -> &str {
        "EntityCollision"
    }
}
