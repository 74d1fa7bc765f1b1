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

use crate::ecs::{Signature, System, World};
use crate::frame::FrameContext;
use log::info;

/// Keeps the camera locked to the first focused entity
///
/// The binding is made once, to the first focused entity found, and never
/// re-evaluated. Runs after movement so the view uses final positions.
#[derive(Debug, Default)]
pub struct CameraSystem;

impl CameraSystem {
    /// Create the pass
    pub fn new() -> Self {
        CameraSystem
    }
}

impl System for CameraSystem {
    fn update(&mut self, ctx: &mut FrameContext<'_>, world: &mut World) {
        if ctx.camera.target().is_none() {
            if let Some(&entity) = world.query(Signature::FOCUSED | Signature::TRANSFORM).first() {
                info!("camera bound to {}", entity);
                ctx.camera.set_target(entity);
            }
        }

        let Some(target) = ctx.camera.target() else {
            return;
        };
        if let Some(t) = world.transform(target) {
            ctx.camera.follow(t.x, t.y);
        }
    }

    fn name(&self) -> &str {
        "Camera"
    }
}
