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
//! Per-frame services handed to every system

use crate::assets::{AssetCatalog, Atlas};
use crate::backend::{AudioSink, Renderer};
use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::input::InputState;
use crate::tiles::TileMap;
use crate::time::FrameTime;

/// Everything a system may touch besides the world
///
/// Built fresh for each frame and passed by `&mut` to each system in turn,
/// so services are explicit handles instead of globals.
pub struct FrameContext<'a> {
    /// Timing of this frame
    pub time: FrameTime,
    /// Keyboard state after this frame's polling
    pub input: &'a InputState,
    /// Level grid
    pub tiles: &'a TileMap,
    /// Animation frames
    pub assets: &'a dyn AssetCatalog,
    /// View offset, written by the camera pass
    pub camera: &'a mut Camera,
    /// Engine settings
    pub config: &'a EngineConfig,
    /// Drawing surface
    pub renderer: &'a mut dyn Renderer,
    /// Sound output
    pub audio: &'a mut dyn AudioSink,
}

/// Owned services a [`FrameContext`] borrows from
///
/// Renderer and audio are supplied per frame since the caller owns the
/// backends.
#[derive(Debug, Clone)]
pub struct FrameServices {
    /// Keyboard state
    pub input: InputState,
    /// Level grid
    pub tiles: TileMap,
    /// Animation frames
    pub atlas: Atlas,
    /// View offset
    pub camera: Camera,
    /// Engine settings
    pub config: EngineConfig,
}

impl FrameServices {
    /// Services with an empty level and atlas
    pub fn new(config: EngineConfig) -> Self {
        FrameServices {
            input: InputState::new(),
            tiles: TileMap::default(),
            atlas: Atlas::new(),
            camera: Camera::new(&config),
            config,
        }
    }

    /// Borrow everything for one frame
    pub fn context<'a>(
        &'a mut self,
        time: FrameTime,
        renderer: &'a mut dyn Renderer,
        audio: &'a mut dyn AudioSink,
    ) -> FrameContext<'a> {
        FrameContext {
            time,
            input: &self.input,
            tiles: &self.tiles,
            assets: &self.atlas,
            camera: &mut self.camera,
            config: &self.config,
            renderer,
            audio,
        }
    }
}

impl Default for FrameServices {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
