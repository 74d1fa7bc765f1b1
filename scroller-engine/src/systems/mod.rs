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
//! Frame pipeline passes
//!
//! Standard registration order, which every pass relies on:
//!
//! ```text
//! Input → Animation → Velocity → Movement → Camera
//!       → Collision → Collection → Audio → HUD text
//!       → Map render → Entity render → Text render
//! ```
//!
//! Each pass owns its writes for the duration of its own update. Data that
//! one pass produces for an earlier one (Movement's sensors feeding Input)
//! is read one frame late.

mod animation;
mod audio;
mod camera;
mod collection;
mod collision;
mod hud;
mod input;
mod movement;
mod render;
mod velocity;

pub use animation::{advance_frame, AnimationSystem};
pub use audio::{pickup_clip, AudioSystem};
pub use camera::CameraSystem;
pub use collection::CollectionSystem;
pub use collision::EntityCollisionSystem;
pub use hud::{hud_line, HudTextSystem, COINS_TAG, HEALTH_TAG};
pub use input::{InputSystem, JUMP_CLIP};
pub use movement::{resolve_motion, update_sensors, MoveReport, MovementSystem};
pub use render::{EntityRenderSystem, MapRenderSystem, TextRenderSystem};
pub use velocity::{integrate, VelocitySystem};

use crate::ecs::{Scheduler, World};
use crate::error::SchedulerError;

/// Register the standard pipeline on `scheduler` in its fixed order
pub fn register_standard(scheduler: &mut Scheduler, world: &mut World) -> Result<(), SchedulerError> {
    scheduler.add_system(world, InputSystem::new())?;
    scheduler.add_system(world, AnimationSystem::new())?;
    scheduler.add_system(world, VelocitySystem::new())?;
    scheduler.add_system(world, MovementSystem::new())?;
    scheduler.add_system(world, CameraSystem::new())?;
    scheduler.add_system(world, EntityCollisionSystem::new())?;
    scheduler.add_system(world, CollectionSystem::new())?;
    scheduler.add_system(world, AudioSystem::new())?;
    scheduler.add_system(world, HudTextSystem::new())?;
    scheduler.add_system(world, MapRenderSystem::new())?;
    scheduler.add_system(world, EntityRenderSystem::new())?;
    scheduler.add_system(world, TextRenderSystem::new())?;
    Ok(())
}
