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
//! Event bus
//!
//! Systems talk to each other through a closed set of [`Event`] variants.
//! Each subscribing system owns a private inbox; publishing copies the event
//! into every inbox subscribed to its [`EventKind`] and returns immediately.
//! Nothing is delivered until the owning system drains its inbox during its
//! own update.
//!
//! ```text
//! publish(e) ──► route[kind(e)] ──► inbox A  ─┐
//!                                 └─► inbox B  ─┼─► drained by owner in Update
//! ```
//!
//! The visible consequence is that delivery latency depends only on
//! registration order: a subscriber that runs after the publisher in the
//! same frame sees the event that frame, one that runs before it sees it on
//! the next frame's drain. Events are never dropped or duplicated.

use crate::ecs::Entity;
use log::trace;
use std::collections::HashMap;

/// Change to one entity's speed and acceleration
///
/// Interpreted as a delta when carried by [`Event::PhysicsPulse`] and as an
/// absolute value when carried by [`Event::PhysicsSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityChange {
    /// Target entity
    pub entity: Entity,
    /// Horizontal speed
    pub speed_x: f32,
    /// Vertical speed
    pub speed_y: f32,
    /// Horizontal acceleration
    pub accel_x: f32,
    /// Vertical acceleration
    pub accel_y: f32,
}

impl VelocityChange {
    /// Speed-only change with zero acceleration
    pub fn speed(entity: Entity, speed_x: f32, speed_y: f32) -> Self {
        VelocityChange {
            entity,
            speed_x,
            speed_y,
            accel_x: 0.0,
            accel_y: 0.0,
        }
    }
}

/// Message exchanged between systems
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The boxes of `a` and `b` overlap this frame
    Collision {
        /// Entity that was checked (the controlled one)
        a: Entity,
        /// Entity it overlaps
        b: Entity,
    },
    /// Add to an entity's speed
    PhysicsPulse(VelocityChange),
    /// Overwrite an entity's speed and acceleration
    PhysicsSet(VelocityChange),
    /// Play a named clip
    Audio {
        /// Clip name
        clip: String,
    },
    /// An item was picked up
    Collection {
        /// Entity whose inventory grew
        collector: Entity,
        /// Item type
        item: String,
        /// Inventory count after the pickup
        total: i32,
        /// Amount picked up
        collected: i32,
    },
}

impl Event {
    /// Entity whose speed this event changes, if it is a velocity event
    pub fn velocity_target(&self) -> Option<Entity> {
        match self {
            Event::PhysicsPulse(change) | Event::PhysicsSet(change) => Some(change.entity),
            _ => None,
        }
    }

    /// Routing key of this event
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Collision { .. } => EventKind::Collision,
            Event::PhysicsPulse(_) => EventKind::PhysicsPulse,
            Event::PhysicsSet(_) => EventKind::PhysicsSet,
            Event::Audio { .. } => EventKind::Audio,
            Event::Collection { .. } => EventKind::Collection,
        }
    }
}

/// Discriminant used to route events to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`Event::Collision`]
    Collision,
    /// [`Event::PhysicsPulse`]
    PhysicsPulse,
    /// [`Event::PhysicsSet`]
    PhysicsSet,
    /// [`Event::Audio`]
    Audio,
    /// [`Event::Collection`]
    Collection,
}

/// Handle to one subscriber's private queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InboxId(usize);

/// Proof of a subscription, consumed by [`EventBus::unsubscribe`]
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
    kind: EventKind,
    inbox: InboxId,
}

impl Subscription {
    /// Kind this subscription receives
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Inbox receiving the events
    pub fn inbox(&self) -> InboxId {
        self.inbox
    }
}

#[derive(Debug, Clone, Copy)]
struct Route {
    id: u64,
    inbox: InboxId,
}

/// Synchronous publish/subscribe hub with per-subscriber buffering
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inboxes: Vec<Vec<Event>>,
    routes: HashMap<EventKind, Vec<Route>>,
    next_subscription: u64,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new, empty inbox
    pub fn open_inbox(&mut self) -> InboxId {
        self.inboxes.push(Vec::new());
        InboxId(self.inboxes.len() - 1)
    }

    /// Route every future event of `kind` into `inbox`
    pub fn subscribe(&mut self, kind: EventKind, inbox: InboxId) -> Subscription {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.routes.entry(kind).or_default().push(Route { id, inbox });
        trace!("inbox {:?} subscribed to {:?}", inbox, kind);
        Subscription { id, kind, inbox }
    }

    /// Stop routing for `subscription`
    ///
    /// Events already buffered in the inbox stay there. Returns false when
    /// the subscription was not registered on this bus.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let Some(routes) = self.routes.get_mut(&subscription.kind) else {
            return false;
        };
        let before = routes.len();
        routes.retain(|route| route.id != subscription.id);
        routes.len() != before
    }

    /// Release every subscription in `subscriptions`
    ///
    /// Returns how many were registered on this bus.
    pub fn unsubscribe_all(&mut self, subscriptions: impl IntoIterator<Item = Subscription>) -> usize {
        subscriptions
            .into_iter()
            .map(|subscription| self.unsubscribe(subscription))
            .filter(|released| *released)
            .count()
    }

    /// Enqueue `event` into every inbox subscribed to its kind
    ///
    /// Returns the number of inboxes that received it.
    pub fn publish(&mut self, event: Event) -> usize {
        let kind = event.kind();
        let Some(routes) = self.routes.get(&kind) else {
            return 0;
        };
        let mut delivered = 0;
        for route in routes {
            if let Some(inbox) = self.inboxes.get_mut(route.inbox.0) {
                inbox.push(event.clone());
                delivered += 1;
            }
        }
        trace!("published {:?} to {} inbox(es)", kind, delivered);
        delivered
    }

    /// Remove and return every buffered event of `inbox` in emission order
    pub fn drain(&mut self, inbox: InboxId) -> Vec<Event> {
        self.inboxes
            .get_mut(inbox.0)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Events currently buffered in `inbox`
    pub fn pending(&self, inbox: InboxId) -> &[Event] {
        self.inboxes
            .get(inbox.0)
            .map(|events| events.as_slice())
            .unwrap_or(&[])
    }

    /// Number of live subscriptions for `kind`
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.routes.get(&kind).map_or(0, |routes| routes.len())
    }

    /// Drop buffered velocity events aimed at `entity` from every inbox
    ///
    /// Returns how many were dropped.
    pub fn discard_velocity_events_for(&mut self, entity: Entity) -> usize {
        let mut dropped = 0;
        for inbox in &mut self.inboxes {
            let before = inbox.len();
            inbox.retain(|event| event.velocity_target() != Some(entity));
            dropped += before - inbox.len();
        }
        dropped
    }

    /// Discard every buffered event, keeping inboxes and subscriptions
    pub fn clear_pending(&mut self) {
        for inbox in &mut self.inboxes {
            inbox.clear();
        }
    }
}
