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
//! Entity Component System (ECS) core implementation
//!
//! This module provides the fixed-capacity ECS the game runs on:
//! - Entity slots addressed by a small integer handle
//! - One dense array per component kind plus a signature bitmask per slot
//! - Systems run by a scheduler in fixed registration order

mod component;
mod entity;
mod signature;
mod system;
mod world;

pub mod components;
pub mod scheduler;

pub use component::{Component, DenseStorage};
pub use entity::{Entity, ENTITY_COUNT};
pub use scheduler::Scheduler;
pub use signature::Signature;
pub use system::System;
pub use world::World;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_creation() {
        let world = World::new();
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_entity_creation() {
        let mut world = World::new();
        let entity = world.create_entity().unwrap();
        world.set_signature(entity, Signature::TAG);
        assert_eq!(world.entity_count(), 1);
        assert!(world.is_alive(entity));
    }
}
