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
//! View offset

use crate::config::{EngineConfig, TargetMode};
use crate::ecs::Entity;

/// Top-left corner of the visible area in world units
///
/// Once bound to a target entity the camera is repositioned from that
/// entity's transform every frame; with no target it stays where it was
/// last put.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    x: f32,
    y: f32,
    target: Option<Entity>,
    mode: TargetMode,
    half_view_w: f32,
    half_view_h: f32,
    hud_bias: f32,
}

impl Camera {
    /// Camera at the origin for the configured viewport
    pub fn new(config: &EngineConfig) -> Self {
        let scale = if config.scale > 0.0 { config.scale } else { 1.0 };
        Camera {
            x: 0.0,
            y: 0.0,
            target: None,
            mode: config.target_mode,
            half_view_w: config.viewport_width as f32 / (2.0 * scale),
            half_view_h: config.viewport_height as f32 / (2.0 * scale),
            hud_bias: config.hud_bias,
        }
    }

    /// Left edge of the view
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Top edge of the view
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Place the view explicitly
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Shift the view
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Entity the camera follows
    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    /// Bind the camera to `entity`
    pub fn set_target(&mut self, entity: Entity) {
        self.target = Some(entity);
    }

    /// Drop the binding; the view stays where it is
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// View offset that puts the point `(x, y)` at the configured anchor
    pub fn offset_for(&self, x: f32, y: f32) -> (f32, f32) {
        match self.mode {
            TargetMode::Normal => (x, y),
            TargetMode::Center => (x - self.half_view_w, y - self.half_view_h - self.hud_bias),
        }
    }

    /// Move the view so `(x, y)` sits at the anchor
    pub fn follow(&mut self, x: f32, y: f32) {
        let (ox, oy) = self.offset_for(x, y);
        self.set_position(ox, oy);
    }

    /// World point to screen point (before scaling)
    pub fn to_screen(&self, x: f32, y: f32) -> (i32, i32) {
        ((x - self.x).floor() as i32, (y - self.y).floor() as i32)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
