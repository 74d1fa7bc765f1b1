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
//! World: entity slots, component arrays and the event bus
//!
//! The world owns one [`DenseStorage`] per data component plus the signature
//! table that says which rows are meaningful. Accessors are signature
//! checked: asking for a component whose bit is clear returns `None` even
//! though the row still holds the previous occupant's data.
//!
//! References handed out by accessors borrow the world, so they can never
//! outlive a structural change (create/destroy). Systems take what they need
//! for one entity, write it back, and move on.

use crate::ecs::components::{
    Animation, Collectible, Inventory, Rect, State, Tag, Text, Transform,
};
use crate::ecs::{DenseStorage, Entity, Signature, ENTITY_COUNT};
use crate::error::CapacityError;
use crate::events::{Event, EventBus, InboxId};
use log::{debug, warn};

/// Container for every entity slot and component row
#[derive(Debug, Clone)]
pub struct World {
    signatures: Vec<Signature>,
    transforms: DenseStorage<Transform>,
    animations: DenseStorage<Animation>,
    states: DenseStorage<State>,
    tags: DenseStorage<Tag>,
    collectibles: DenseStorage<Collectible>,
    inventories: DenseStorage<Inventory>,
    texts: DenseStorage<Text>,
    events: EventBus,
}

macro_rules! component_access {
    ($($storage:ident: $ty:ty, $bit:ident, $get:ident, $get_mut:ident, $insert:ident;)*) => {
        impl World {
            $(
                #[doc = concat!("Borrow the `", stringify!($ty), "` of `entity` if its bit is set")]
                pub fn $get(&self, entity: Entity) -> Option<&$ty> {
                    self.has(entity, Signature::$bit)
                        .then(|| self.$storage.get(entity))
                }

                #[doc = concat!("Mutably borrow the `", stringify!($ty), "` of `entity` if its bit is set")]
                pub fn $get_mut(&mut self, entity: Entity) -> Option<&mut $ty> {
                    if self.has(entity, Signature::$bit) {
                        Some(self.$storage.get_mut(entity))
                    } else {
                        None
                    }
                }

                #[doc = concat!("Write the `", stringify!($ty), "` row of `entity` and set its bit")]
                pub fn $insert(&mut self, entity: Entity, component: $ty) {
                    self.$storage.insert(entity, component);
                    self.signatures[entity.index()] |= Signature::$bit;
                }
            )*
        }
    };
}

component_access! {
    transforms: Transform, TRANSFORM, transform, transform_mut, insert_transform;
    animations: Animation, ANIMATION, animation, animation_mut, insert_animation;
    states: State, STATE, state, state_mut, insert_state;
    tags: Tag, TAG, tag, tag_mut, insert_tag;
    collectibles: Collectible, COLLECTIBLE, collectible, collectible_mut, insert_collectible;
    inventories: Inventory, INVENTORY, inventory, inventory_mut, insert_inventory;
    texts: Text, TEXT, text, text_mut, insert_text;
}

impl World {
    /// Create a world with every slot free
    pub fn new() -> Self {
        World {
            signatures: vec![Signature::NONE; ENTITY_COUNT],
            transforms: DenseStorage::new(),
            animations: DenseStorage::new(),
            states: DenseStorage::new(),
            tags: DenseStorage::new(),
            collectibles: DenseStorage::new(),
            inventories: DenseStorage::new(),
            texts: DenseStorage::new(),
            events: EventBus::new(),
        }
    }

    /// Claim the lowest free slot
    ///
    /// The returned entity still has signature `NONE`; it stays eligible for
    /// reuse until the caller attaches at least one component.
    pub fn create_entity(&mut self) -> Result<Entity, CapacityError> {
        match self.signatures.iter().position(|s| s.is_none()) {
            Some(index) => Ok(Entity::new(index)),
            None => {
                warn!("entity capacity of {} exhausted", ENTITY_COUNT);
                Err(CapacityError::default())
            }
        }
    }

    /// Free a slot
    ///
    /// Only the signature is cleared. Component rows keep their stale values
    /// until the next occupant's builder overwrites them. Velocity events
    /// still queued for the entity are dropped so they never reach a later
    /// occupant of the slot.
    pub fn destroy_entity(&mut self, entity: Entity) {
        debug!("destroying {}", entity);
        self.signatures[entity.index()] = Signature::NONE;
        let dropped = self.events.discard_velocity_events_for(entity);
        if dropped > 0 {
            debug!("dropped {} queued velocity event(s) for {}", dropped, entity);
        }
    }

    /// Whether `entity` currently occupies its slot
    pub fn is_alive(&self, entity: Entity) -> bool {
        !self.signatures[entity.index()].is_none()
    }

    /// Signature of `entity`
    pub fn signature(&self, entity: Entity) -> Signature {
        self.signatures[entity.index()]
    }

    /// Replace the signature of `entity`
    pub fn set_signature(&mut self, entity: Entity, signature: Signature) {
        self.signatures[entity.index()] = signature;
    }

    /// Add bits to the signature of `entity`, typically marker components
    pub fn add_components(&mut self, entity: Entity, components: Signature) {
        self.signatures[entity.index()] |= components;
    }

    /// Clear bits from the signature of `entity`
    pub fn remove_components(&mut self, entity: Entity, components: Signature) {
        self.signatures[entity.index()] &= !components;
    }

    /// Whether `entity` has every bit in `required`
    pub fn has(&self, entity: Entity, required: Signature) -> bool {
        self.signatures[entity.index()].matches(required)
    }

    /// Snapshot of every entity whose signature is a superset of `required`
    ///
    /// Taken at call time, in slot order. Entities created or destroyed while
    /// the caller iterates are not reflected, so passes that destroy should
    /// re-check with [`World::has`].
    pub fn query(&self, required: Signature) -> Vec<Entity> {
        self.signatures
            .iter()
            .enumerate()
            .filter(|(_, signature)| !signature.is_none() && signature.matches(required))
            .map(|(index, _)| Entity::new(index))
            .collect()
    }

    /// Number of occupied slots
    pub fn entity_count(&self) -> usize {
        self.signatures.iter().filter(|s| !s.is_none()).count()
    }

    /// Transform and state of `entity`, borrowed together
    pub fn motion_mut(&mut self, entity: Entity) -> Option<(&mut Transform, &mut State)> {
        if self.has(entity, Signature::TRANSFORM | Signature::STATE) {
            Some((self.transforms.get_mut(entity), self.states.get_mut(entity)))
        } else {
            None
        }
    }

    /// Raw rows for whole-array passes
    ///
    /// Rows are returned regardless of signature; the caller filters with the
    /// signature slice.
    pub fn motion_rows_mut(&mut self) -> (&[Signature], &mut [Transform], &mut [State]) {
        (
            &self.signatures,
            self.transforms.as_mut_slice(),
            self.states.as_mut_slice(),
        )
    }

    /// Inventory of `collector` and collectible of `item`, borrowed together
    pub fn pickup_mut(
        &mut self,
        collector: Entity,
        item: Entity,
    ) -> Option<(&mut Inventory, &Collectible)> {
        if self.has(collector, Signature::INVENTORY) && self.has(item, Signature::COLLECTIBLE) {
            Some((self.inventories.get_mut(collector), self.collectibles.get(item)))
        } else {
            None
        }
    }

    /// Entities that can appear in overlap events
    ///
    /// Every entity with a transform except screen-space HUD elements.
    pub fn colliders(&self) -> Vec<Entity> {
        self.query(Signature::TRANSFORM)
            .into_iter()
            .filter(|&entity| !self.has(entity, Signature::HUD))
            .collect()
    }

    /// Current boxes of every solid entity other than `exclude`
    pub fn solid_boxes(&self, exclude: Entity) -> Vec<Rect> {
        self.query(Signature::TRANSFORM | Signature::COLLIDABLE)
            .into_iter()
            .filter(|&entity| entity != exclude)
            .map(|entity| self.transforms.get(entity).bounding_box())
            .collect()
    }

    /// Overlap test for two boxes with inclusive far edges
    pub fn collides(a: Rect, b: Rect) -> bool {
        !(a.bottom() < b.y || a.y > b.bottom() || a.right() < b.x || a.x > b.right())
    }

    /// Text of the first entity with both a text and the given tag
    pub fn text_by_tag_mut(&mut self, value: &str) -> Option<&mut Text> {
        let entity = self
            .query(Signature::TAG | Signature::TEXT)
            .into_iter()
            .find(|&entity| self.tags.get(entity).value == value)?;
        Some(self.texts.get_mut(entity))
    }

    /// First entity with the given tag
    pub fn find_by_tag(&self, value: &str) -> Option<Entity> {
        self.query(Signature::TAG)
            .into_iter()
            .find(|&entity| self.tags.get(entity).value == value)
    }

    /// The event bus
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// The event bus, mutably
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Publish an event on the bus
    pub fn publish(&mut self, event: Event) {
        self.events.publish(event);
    }

    /// Drain `inbox`, calling `handler` once per event in emission order
    ///
    /// The handler gets the world back so it can mutate components or
    /// publish. Anything it publishes into this same inbox waits for the
    /// next drain.
    pub fn handle_events<F>(&mut self, inbox: InboxId, mut handler: F)
    where
        F: FnMut(&mut World, Event),
    {
        for event in self.events.drain(inbox) {
            handler(self, event);
        }
    }

    /// Free every slot, reset every row and discard buffered events
    ///
    /// Subscriptions survive so registered systems keep working.
    pub fn clear(&mut self) {
        self.signatures.fill(Signature::NONE);
        self.transforms.clear();
        self.animations.clear();
        self.states.clear();
        self.tags.clear();
        self.collectibles.clear();
        self.inventories.clear();
        self.texts.clear();
        self.events.clear_pending();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
