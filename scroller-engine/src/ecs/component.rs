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
//! Component storage
//!
//! Components are plain data rows. Each component kind lives in its own
//! fixed-capacity dense array indexed directly by [`Entity`], giving the
//! world a structure-of-arrays layout:
//!
//! ```text
//! transforms: [T0, T1, T2, ... T99]
//! states:     [S0, S1, S2, ... S99]
//! ```
//!
//! Storage never tracks presence. Whether row `i` of an array is meaningful
//! is decided by the entity's [`Signature`](crate::ecs::Signature); a row
//! whose bit is clear holds whatever the previous occupant left behind.

use crate::ecs::{Entity, ENTITY_COUNT};

/// Trait that all data components implement
///
/// `Default` supplies the initial value of every row when a world is built.
pub trait Component: Default + 'static {}

/// Fixed-capacity dense storage for one component kind
///
/// Holds exactly [`ENTITY_COUNT`] rows for the lifetime of the world. Since
/// an [`Entity`] can only be built inside the valid range, access never
/// needs a bounds fallback.
///
/// # Example
///
/// ```
/// use scroller_engine::ecs::{DenseStorage, Entity};
/// use scroller_engine::ecs::components::Text;
///
/// let mut storage = DenseStorage::<Text>::new();
/// let entity = Entity::from_index(3).unwrap();
/// storage.insert(entity, Text::new("Coins: 0"));
/// assert_eq!(storage.get(entity).value, "Coins: 0");
/// ```
#[derive(Debug, Clone)]
pub struct DenseStorage<T: Component> {
    rows: Vec<T>,
}

impl<T: Component> DenseStorage<T> {
    /// Create storage with every row set to `T::default()`
    pub fn new() -> Self {
        DenseStorage {
            rows: (0..ENTITY_COUNT).map(|_| T::default()).collect(),
        }
    }

    /// Overwrite the row for `entity`
    pub fn insert(&mut self, entity: Entity, component: T) {
        self.rows[entity.index()] = component;
    }

    /// Borrow the row for `entity`
    ///
    /// The row may hold stale data; check the signature first.
    pub fn get(&self, entity: Entity) -> &T {
        &self.rows[entity.index()]
    }

    /// Mutably borrow the row for `entity`
    pub fn get_mut(&mut self, entity: Entity) -> &mut T {
        &mut self.rows[entity.index()]
    }

    /// Number of rows (always `ENTITY_COUNT`)
    pub fn capacity(&self) -> usize {
        self.rows.len()
    }

    /// All rows in entity order
    pub fn as_slice(&self) -> &[T] {
        &self.rows
    }

    /// All rows in entity order, mutably
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.rows
    }

    /// Reset every row to its default value
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            *row = T::default();
        }
    }
}

impl<T: Component> Default for DenseStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}
