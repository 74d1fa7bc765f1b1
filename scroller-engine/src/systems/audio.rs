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

/// Plays clips requested by audio events and pickup sounds
#[derive(Debug, Default)]
pub struct AudioSystem {
    inbox: Option<InboxId>,
    subscriptions: Vec<Subscription>,
}

impl AudioSystem {
    /// Create the pass
    pub fn new() -> Self {
        Self::default()
    }
}

/// Clip for picking up an item, if it has one
pub fn pickup_clip(item: &str) -> Option<&'static str> {
    match item {
        "gold" => Some("coin.wav"),
        "health" => Some("health.wav"),
        _ => None,
    }
}

impl System for AudioSystem {
    fn init(&mut self, world: &mut World) {
        let bus = world.events_mut();
        let inbox = bus.open_inbox();
        self.subscriptions.push(bus.subscribe(EventKind::Collection, inbox));
        self.subscriptions.push(bus.subscribe(EventKind::Audio, inbox));
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
        let Some(inbox) = self.inbox else {
            return;
        };
        let audio = &mut *ctx.audio;
        world.handle_events(inbox, |_, event| match event {
            Event::Collection { item, .. } => {
                if let Some(clip) = pickup_clip(&item) {
                    audio.play_sound(clip);
                }
            }
            Event::Audio { clip } => audio.play_sound(&clip),
            _ => {}
        });
    }

    fn name(&self) -> &str {
        "Audio"
    }
}
