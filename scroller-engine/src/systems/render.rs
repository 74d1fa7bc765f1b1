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
//! Draw passes: tiles, then sprites, then text
//!
//! All three only read the world. Coordinates handed to the renderer are
//! camera-relative screen units before any render scale is applied; HUD
//! entities skip the camera.

use crate::backend::TextureId;
use crate::camera::Camera;
use crate::ecs::components::{Flip, Rect, Transform};
use crate::ecs::{Entity, Signature, System, World};
use crate::frame::FrameContext;

/// Screen position of `entity`'s transform
fn screen_position(world: &World, camera: &Camera, entity: Entity, t: &Transform) -> (i32, i32) {
    if world.has(entity, Signature::HUD) {
        (t.x.floor() as i32, t.y.floor() as i32)
    } else {
        camera.to_screen(t.x, t.y)
    }
}

/// Draws every non-empty tile of the level
#[derive(Debug, Default)]
pub struct MapRenderSystem;

impl MapRenderSystem {
    /// Create the pass
    pub fn new() -> Self {
        MapRenderSystem
    }
}

impl System for MapRenderSystem {
    fn update(&mut self, ctx: &mut FrameContext<'_>, _world: &mut World) {
        let size = ctx.tiles.tile_size();
        for (x, y, tile) in ctx.tiles.non_empty() {
            let (sx, sy) = ctx.camera.to_screen(x as f32, y as f32);
            ctx.renderer.draw_region(
                TextureId::Tileset,
                Rect::new(sx, sy, size, size),
                ctx.tiles.source_rect(tile),
                Flip::None,
            );
        }
    }

    fn name(&self) -> &str {
        "MapRender"
    }
}

/// Draws the current animation frame of every animated entity
///
/// The frame is centred on the bounding box. Entities with a state are
/// mirrored when they face away from the asset's authored orientation.
#[derive(Debug, Default)]
pub struct EntityRenderSystem;

impl EntityRenderSystem {
    /// Create the pass
    pub fn new() -> Self {
        EntityRenderSystem
    }
}

impl System for EntityRenderSystem {
    fn update(&mut self, ctx: &mut FrameContext<'_>, world: &mut World) {
        for entity in world.query(Signature::TRANSFORM | Signature::ANIMATION) {
            let (Some(t), Some(animation)) = (world.transform(entity), world.animation(entity))
            else {
                continue;
            };
            let Some(descriptor) = animation.current_descriptor() else {
                continue;
            };
            // unknown asset or cursor past the end draws nothing
            let Some(frame) = ctx.assets.frames(&descriptor.asset).get(animation.current_frame)
            else {
                continue;
            };

            let flip = match world.state(entity) {
                Some(state) if state.orientation != descriptor.orientation => Flip::Horizontal,
                Some(_) => Flip::None,
                None => descriptor.flip,
            };

            let (x, y) = screen_position(world, ctx.camera, entity, t);
            let offset_w = frame.w / 2 - t.w / 2;
            let offset_h = frame.h / 2 - t.h / 2;

            if ctx.config.draw_debug {
                ctx.renderer.draw_rect_outline(Rect::new(x, y, t.w, t.h));
            }
            ctx.renderer.draw_region(
                TextureId::Sprites,
                Rect::new(x - offset_w, y - offset_h, frame.w, frame.h),
                frame.region(),
                flip,
            );
        }
    }

    fn name(&self) -> &str {
        "EntityRender"
    }
}

/// Draws every text entity
///
/// The entity's slot index is the cache key, so a backend can keep one
/// rasterised texture per text slot.
#[derive(Debug, Default)]
pub struct TextRenderSystem;

impl TextRenderSystem {
    /// Create the pass
    pub fn new() -> Self {
        TextRenderSystem
    }
}

impl System for TextRenderSystem {
    fn update(&mut self, ctx: &mut FrameContext<'_>, world: &mut World) {
        for entity in world.query(Signature::TRANSFORM | Signature::TEXT) {
            let (Some(t), Some(text)) = (world.transform(entity), world.text(entity)) else {
                continue;
            };
            let (x, y) = screen_position(world, ctx.camera, entity, t);
            ctx.renderer
                .draw_text(&entity.index().to_string(), &text.value, x, y);
        }
    }

    fn name(&self) -> &str {
        "TextRender"
    }
}
