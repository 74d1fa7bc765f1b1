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

/// Tag of the text showing the coin count
pub const COINS_TAG: &str = "player_coins";
/// Tag of the text showing the health count
pub const HEALTH_TAG: &str = "player_health";

/// Rewrites HUD counters after pickups
#[derive(Debug, Default)]
pub struct HudTextSystem {
    inbox: Option<InboxId>,
    subscriptions: Vec<Subscription>,
}

impl HudTextSystem {
    /// Create the pass
    pub fn new() -> Self {
        Self::default()
    }
}

/// HUD tag and display string for an item total
pub fn hud_line(item: &str, total: i32) -> Option<(&'static str, String)> {
    match item {
        "gold" => Some((COINS_TAG, format!("Coins: {}", total))),
        "health" => Some((HEALTH_TAG, format!("X {}", total))),
        _ => None,
    }
}

impl System for HudTextSystem {
    fn init(&mut self, world: &mut World) {
        let bus = world.events_mut();
        let inbox = bus.open_inbox();
        self.subscriptions.push(bus.subscribe(EventKind::Collection, inbox));
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
            let Event::Collection { item, total, .. } = event else {
                return;
            };
            let Some((tag, line)) = hud_line(&item, total) else {
                return;
            };
            match world.text_by_tag_mut(tag) {
                Some(text) => text.value = line,
                None => debug!("no HUD text tagged {}", tag),
            }
        });
    }

    fn name(&self) -> &str {
        "HudText"
    }
}
