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
//! Entity handles
//!
//! An entity is nothing but a row index shared by every component array.
//! Whether the row is occupied, and by which components, is recorded in the
//! world's signature table, not in the handle.

use std::fmt;

/// Number of entity slots in a world
///
/// Storage is allocated once for this many rows and never grows.
pub const ENTITY_COUNT: usize = 100;

/// Handle to one row of the component arrays
///
/// Handles are only minted by the [`World`](crate::ecs::World) (or by
/// [`Entity::from_index`], which range-checks), so every handle in
/// circulation indexes inside `[0, ENTITY_COUNT)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u16);

impl Entity {
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index < ENTITY_COUNT, "entity index {} out of range", index);
        Entity(index as u16)
    }

    /// Build a handle from a raw row index, rejecting indices past capacity
    pub fn from_index(index: usize) -> Option<Self> {
        (index < ENTITY_COUNT).then(|| Entity::new(index))
    }

    /// Row index of this entity
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Iterate every slot handle in index order
    pub fn all() -> impl Iterator<Item = Entity> {
        (0..ENTITY_COUNT).map(Entity::new)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
