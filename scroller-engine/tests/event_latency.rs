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
//! Integration tests for event delivery order and latency
//!
//! A subscriber registered after the publisher sees an event in the frame it
//! was published; one registered before sees it on the next frame.

use scroller_engine::backend::Recorder;
use scroller_engine::ecs::{Entity, Scheduler, System, World};
use scroller_engine::events::{Event, EventKind, InboxId};
use scroller_engine::frame::{FrameContext, FrameServices};
use scroller_engine::systems::register_standard;
use scroller_engine::time::FrameTime;
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<(String, u64, String)>>>;

/// Publishes one audio event per frame, named after the frame
struct Publisher {
    frame: u64,
}

impl System for Publisher {
    fn update(&mut self, _ctx: &mut FrameContext<'_>, world: &mut World) {
        self.frame += 1;
        world.publish(Event::Audio {
            clip: format!("frame-{}", self.frame),
        });
    }
}

/// Records every audio event it drains, with the frame it saw it in
struct Listener {
    name: String,
    inbox: Option<InboxId>,
    frame: u64,
    log: Log,
}

impl Listener {
    fn new(name: &str, log: &Log) -> Self {
        Listener {
            name: name.to_string(),
            inbox: None,
            frame: 0,
            log: Arc::clone(log),
        }
    }
}

impl System for Listener {
    fn init(&mut self, world: &mut World) {
        let inbox = world.events_mut().open_inbox();
        world.events_mut().subscribe(EventKind::Audio, inbox);
        self.inbox = Some(inbox);
    }

    fn update(&mut self, _ctx: &mut FrameContext<'_>, world: &mut World) {
        self.frame += 1;
        let Some(inbox) = self.inbox else {
            return;
        };
        let (name, frame, log) = (&self.name, self.frame, &self.log);
        world.handle_events(inbox, |_, event| {
            if let Event::Audio { clip } = event {
                log.lock().unwrap().push((name.clone(), frame, clip));
            }
        });
    }
}

fn run_frames(scheduler: &mut Scheduler, world: &mut World, frames: usize) {
    let mut services = FrameServices::default();
    let mut renderer = Recorder::new();
    let mut audio = Recorder::new();
    for frame in 0..frames {
        let mut ctx = services.context(
            FrameTime::fixed(1.0, frame as u64 * 16),
            &mut renderer,
            &mut audio,
        );
        scheduler.run_frame(&mut ctx, world);
    }
}

fn seen_by(log: &Log, name: &str) -> Vec<(u64, String)> {
    log.lock()
        .unwrap()
        .iter()
        .filter(|(who, _, _)| who == name)
        .map(|(_, frame, clip)| (*frame, clip.clone()))
        .collect()
}

#[test]
fn test_latency_follows_registration_order() {
    let log: Log = Arc::default();
    let mut world = World::new();
    let mut scheduler = Scheduler::new();
    scheduler
        .add_system(&mut world, Listener::new("early", &log))
        .unwrap();
    scheduler
        .add_system(&mut world, Publisher { frame: 0 })
        .unwrap();
    scheduler
        .add_system(&mut world, Listener::new("late", &log))
        .unwrap();

    run_frames(&mut scheduler, &mut world, 3);

    assert_eq!(
        seen_by(&log, "late"),
        vec![
            (1, "frame-1".to_string()),
            (2, "frame-2".to_string()),
            (3, "frame-3".to_string()),
        ]
    );
    assert_eq!(
        seen_by(&log, "early"),
        vec![(2, "frame-1".to_string()), (3, "frame-2".to_string())]
    );
}

#[test]
fn test_events_are_never_dropped_or_duplicated() {
    let log: Log = Arc::default();
    let mut world = World::new();
    let mut scheduler = Scheduler::new();
    scheduler
        .add_system(&mut world, Publisher { frame: 0 })
        .unwrap();
    scheduler
        .add_system(&mut world, Listener::new("a", &log))
        .unwrap();
    scheduler
        .add_system(&mut world, Listener::new("b", &log))
        .unwrap();

    // published outside any system, before the first frame
    world.publish(Event::Audio {
        clip: "boot".into(),
    });
    run_frames(&mut scheduler, &mut world, 2);

    for name in ["a", "b"] {
        let clips: Vec<String> = seen_by(&log, name).into_iter().map(|(_, c)| c).collect();
        assert_eq!(clips, vec!["boot", "frame-1", "frame-2"]);
    }
}

#[test]
fn test_unsubscribed_kinds_are_not_delivered() {
    let mut world = World::new();
    let inbox = world.events_mut().open_inbox();
    world.events_mut().subscribe(EventKind::Collection, inbox);

    world.publish(Event::Audio {
        clip: "jump.wav".into(),
    });
    assert!(world.events().pending(inbox).is_empty());
    assert_eq!(world.events().subscriber_count(EventKind::Audio), 0);
}

#[test]
fn test_registration_is_frozen_after_first_frame() {
    let log: Log = Arc::default();
    let mut world = World::new();
    let mut scheduler = Scheduler::new();
    scheduler
        .add_system(&mut world, Publisher { frame: 0 })
        .unwrap();
    run_frames(&mut scheduler, &mut world, 1);

    assert!(scheduler
        .add_system(&mut world, Listener::new("too-late", &log))
        .is_err());
    assert_eq!(scheduler.system_count(), 1);
}

#[test]
fn test_clearing_the_pipeline_releases_subscriptions() {
    let mut world = World::new();
    let mut scheduler = Scheduler::new();
    register_standard(&mut scheduler, &mut world).unwrap();
    assert_eq!(world.events().subscriber_count(EventKind::PhysicsPulse), 1);
    assert_eq!(world.events().subscriber_count(EventKind::Collection), 2);

    scheduler.clear(&mut world);
    for kind in [
        EventKind::PhysicsPulse,
        EventKind::PhysicsSet,
        EventKind::Collision,
        EventKind::Collection,
        EventKind::Audio,
    ] {
        assert_eq!(world.events().subscriber_count(kind), 0, "{:?}", kind);
    }

    register_standard(&mut scheduler, &mut world).unwrap();
    assert_eq!(world.events().subscriber_count(EventKind::PhysicsPulse), 1);
    assert_eq!(world.events().subscriber_count(EventKind::PhysicsSet), 1);
    assert_eq!(world.events().subscriber_count(EventKind::Collision), 1);
    assert_eq!(world.events().subscriber_count(EventKind::Collection), 2);
    assert_eq!(world.events().subscriber_count(EventKind::Audio), 1);

    // one collision reaches one collection pass, not two
    let mut slots = Entity::all();
    let (a, b) = (slots.next().unwrap(), slots.next().unwrap());
    assert_eq!(world.events_mut().publish(Event::Collision { a, b }), 1);
}
