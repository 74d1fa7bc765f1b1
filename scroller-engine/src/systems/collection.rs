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

use crate::ecs::{System, World};
use crate::events::{Event, EventKind, InboxId, Subscription};
use crate::frame::FrameContext;
use log::debug;

/// Turns collisions between an inventory and a collectible into pickups
///
/// The collectible is destroyed, its value is added to the collector's
/// inventory, and a collection event reports the new total.
#[derive(Debug, Default)]
pub struct CollectionSystem {
    inbox: Option<InboxId>,
    subscriptions: Vec<Subscription>,
}

impl CollectionSystem {
    /// Create the pass
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for CollectionSystem {
    fn init(&mut self, world: &mut World) {
        let bus = world.events_mut();
        let inbox = bus.open_inbox();
        self.subscriptions.push(bus.subscribe(EventKind::Collision, inbox));
        self.inbox = Some(inbox);
    }

    fn shutdown(&mut self, world: &mut World) {
        let bus = world.events_mut();
        bus.unsubscribe_all(self.subscriptions.drain(..));
        if let Some(inbox) = self.inbox.take() {
            bus.drain(inbox);
        }
    }

    fn update(&mut self, _ctx: &mut FrameContext<'_>, world: &mut World) {
        let Some(inbox) = self.inbox else {
            return;
        };
        world.handle_events(inbox, |world, event| {
            let Event::Collision { a, b } = event else {
                return;
            };
            if a == b {
                return;
            }
            // the collectible bit is cleared on pickup, so a second overlap
            // with the same item this frame falls through here
            let Some((inventory, collectible)) = world.pickup_mut(a, b) else {
                return;
            };
            let item = collectible.item.clone();
            let value = collectible.value;
            let total = inventory.add(&item, value);

            world.destroy_entity(b);
            debug!("{} collected {} x{} (total {})", a, item, value, total);
            world.publish(Event::Collection {
                collector: a,
                item,
                total,
                collected: value,
            });
        });
    }

    fn name(&self) -> &str {
        "Collection"
    }
}
