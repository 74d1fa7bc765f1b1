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
//! Animation state selection and frame advance

use crate::ecs::components::{Animation, StateKey};
use crate::ecs::{Entity, Signature, System, World};
use crate::frame::FrameContext;
use log::{trace, warn};
use std::collections::HashSet;

/// Copies each entity's state key into its animation and steps frames
///
/// Entities without a `State` keep whatever key they were built with and
/// only advance frames.
#[derive(Debug, Default)]
pub struct AnimationSystem {
    reported_missing: HashSet<(Entity, StateKey)>,
}

impl AnimationSystem {
    /// Create the pass
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for AnimationSystem {
    fn update(&mut self, ctx: &mut FrameContext<'_>, world: &mut World) {
        for entity in world.query(Signature::ANIMATION) {
            let key = world.state(entity).map(|state| state.key);
            let Some(animation) = world.animation_mut(entity) else {
                continue;
            };

            if let Some(key) = key {
                if animation.transition(key) {
                    trace!("{} animation -> {:?}", entity, key);
                }
            }

            let Some(descriptor) = animation.current_descriptor() else {
                if self.reported_missing.insert((entity, animation.active)) {
                    warn!("{} has no animation for state {:?}", entity, animation.active);
                }
                continue;
            };
            let frame_count = ctx.assets.frames(&descriptor.asset).len();
            advance_frame(animation, frame_count, ctx.time.now_ms);
        }
    }

    fn name(&self) -> &str {
        "Animation"
    }
}

/// Step the playback cursor if the active descriptor's frame time has passed
///
/// Looping descriptors wrap to frame 0; one-shot descriptors hold on the last
/// frame. With no frames the cursor is pinned to 0. Returns whether the
/// cursor moved.
pub fn advance_frame(animation: &mut Animation, frame_count: usize, now_ms: u64) -> bool {
    let Some(descriptor) = animation.current_descriptor() else {
        return false;
    };
    if frame_count == 0 {
        animation.current_frame = 0;
        return false;
    }

    let frame_rate_ms = u64::from(descriptor.frame_rate_ms);
    let looping = descriptor.looping;
    if now_ms < animation.last_advance_ms.saturating_add(frame_rate_ms) {
        return false;
    }

    animation.last_advance_ms = now_ms;
    let next = animation.current_frame + 1;
    let previous = animation.current_frame;
    animation.current_frame = if next < frame_count {
        next
    } else if looping {
        0
    } else {
        frame_count - 1
    };
    animation.current_frame != previous
}
