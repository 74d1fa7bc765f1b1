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
//! Engine facade: owns the world, the pipeline and the frame services
//!
//! Everything that can fail (config, level, atlas) fails in a constructor or
//! loader, before the frame loop. [`Engine::step`] itself cannot fail.

use crate::assets::Atlas;
use crate::backend::{AudioSink, Platform, Renderer};
use crate::builders::{spawn_level, BuilderRegistry};
use crate::camera::Camera;
use crate::config::{Config, EngineConfig};
use crate::ecs::{Entity, Scheduler, World, ENTITY_COUNT};
use crate::error::{EngineError, LoadError};
use crate::frame::FrameServices;
use crate::input::InputState;
use crate::level::LevelData;
use crate::systems::register_standard;
use crate::tiles::TileMap;
use crate::time::{FrameClock, FrameTime};
use log::{info, warn};
use std::path::Path;
use std::time::{Duration, Instant};

/// A running game: world, systems and the services they read each frame
#[derive(Debug)]
pub struct Engine {
    world: World,
    scheduler: Scheduler,
    services: FrameServices,
    clock: FrameClock,
    registry: BuilderRegistry,
}

impl Engine {
    /// Create an engine with the standard pipeline and builders
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let mut world = World::new();
        let mut scheduler = Scheduler::new();
        register_standard(&mut scheduler, &mut world)?;
        info!(
            "engine '{}' ready with {} systems",
            config.title,
            scheduler.system_count()
        );

        Ok(Engine {
            world,
            scheduler,
            clock: FrameClock::new(config.max_time_factor),
            services: FrameServices::new(config),
            registry: BuilderRegistry::standard(),
        })
    }

    /// Create an engine from a TOML or RON config file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        Self::new(EngineConfig::load_from_file(path)?)
    }

    /// Replace the level: rebuild the grid, clear the world and spawn
    ///
    /// The grid, spawn kinds and spawn count are validated before anything
    /// is cleared. If a builder still runs out of slots, the previous world,
    /// grid and camera are restored, so a rejected level always leaves the
    /// current one in place.
    pub fn load_level(&mut self, level: &LevelData) -> Result<Vec<Entity>, EngineError> {
        let tiles = TileMap::from_level(level)?;
        if let Some(spawn) = level.spawns.iter().find(|s| !self.registry.contains(&s.kind)) {
            return Err(LoadError::UnknownSpawnKind(spawn.kind.clone()).into());
        }
        if level.spawns.len() > ENTITY_COUNT {
            return Err(LoadError::TooManySpawns {
                found: level.spawns.len(),
                capacity: ENTITY_COUNT,
            }
            .into());
        }

        let previous_world = self.world.clone();
        let previous_camera = self.services.camera.clone();
        let previous_tiles = std::mem::replace(&mut self.services.tiles, tiles);
        self.world.clear();
        self.services.camera.clear_target();

        match spawn_level(&mut self.world, &self.registry, &level.spawns) {
            Ok(spawned) => {
                info!(
                    "loaded {}x{} level with {} entities",
                    level.width,
                    level.height,
                    spawned.len()
                );
                Ok(spawned)
            }
            Err(err) => {
                warn!("level rejected while spawning ({}); keeping the previous level", err);
                self.world = previous_world;
                self.services.camera = previous_camera;
                self.services.tiles = previous_tiles;
                Err(err.into())
            }
        }
    }

    /// Read and load a `.ron` or `.toml` level file
    pub fn load_level_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<Entity>, EngineError> {
        let level = LevelData::load(path)?;
        self.load_level(&level)
    }

    /// Install the animation frame catalog
    pub fn load_atlas(&mut self, atlas: Atlas) {
        info!("atlas with {} assets installed", atlas.len());
        self.services.atlas = atlas;
    }

    /// Run one frame covering `elapsed` wall time
    pub fn step(
        &mut self,
        elapsed: Duration,
        renderer: &mut dyn Renderer,
        audio: &mut dyn AudioSink,
    ) -> FrameTime {
        let time = self.clock.tick(elapsed);
        let mut ctx = self.services.context(time, renderer, audio);
        self.scheduler.run_frame(&mut ctx, &mut self.world);
        time
    }

    /// Poll, step and present until the platform asks to quit
    ///
    /// Frame time is measured with a wall clock. Returns the number of
    /// frames run.
    pub fn run(
        &mut self,
        platform: &mut dyn Platform,
        renderer: &mut dyn Renderer,
        audio: &mut dyn AudioSink,
    ) -> u64 {
        let mut last = Instant::now();
        self.run_loop(platform, renderer, audio, move || {
            let now = Instant::now();
            let elapsed = now.duration_since(last);
            last = now;
            elapsed
        })
    }

    /// Like [`Engine::run`] but every frame covers exactly `frame_time`
    pub fn run_fixed(
        &mut self,
        platform: &mut dyn Platform,
        renderer: &mut dyn Renderer,
        audio: &mut dyn AudioSink,
        frame_time: Duration,
    ) -> u64 {
        self.run_loop(platform, renderer, audio, || frame_time)
    }

    fn run_loop<F>(
        &mut self,
        platform: &mut dyn Platform,
        renderer: &mut dyn Renderer,
        audio: &mut dyn AudioSink,
        mut elapsed: F,
    ) -> u64
    where
        F: FnMut() -> Duration,
    {
        let mut frames = 0;
        while !platform.poll_input(&mut self.services.input) {
            self.step(elapsed(), renderer, audio);
            platform.present();
            frames += 1;
        }
        info!("frame loop stopped after {} frames", frames);
        frames
    }

    /// Shut the pipeline down; systems can be registered again afterwards
    pub fn shutdown(&mut self) {
        self.scheduler.clear(&mut self.world);
    }

    /// The world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The system pipeline
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The system pipeline and the world it runs on, for custom registration
    pub fn pipeline_mut(&mut self) -> (&mut Scheduler, &mut World) {
        (&mut self.scheduler, &mut self.world)
    }

    /// Builders used by [`Engine::load_level`]
    pub fn registry_mut(&mut self) -> &mut BuilderRegistry {
        &mut self.registry
    }

    /// Level grid
    pub fn tiles(&self) -> &TileMap {
        &self.services.tiles
    }

    /// Camera
    pub fn camera(&self) -> &Camera {
        &self.services.camera
    }

    /// Keyboard state
    pub fn input(&self) -> &InputState {
        &self.services.input
    }

    /// Keyboard state, for feeding key events without a platform
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.services.input
    }

    /// Engine settings
    pub fn config(&self) -> &EngineConfig {
        &self.services.config
    }

    /// Frame clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Recorder, ScriptedPlatform};
    use crate::input::Key;
    use crate::level::SpawnRequest;

    fn level(spawns: Vec<SpawnRequest>) -> LevelData {
        LevelData {
            format_version: "0.1.0".into(),
            width: 4,
            height: 4,
            tile_size: 16,
            tileset_columns: 8,
            tiles: vec![0; 16],
            spawns,
        }
    }

    #[test]
    fn test_new_registers_pipeline() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        assert_eq!(engine.scheduler().system_count(), 12);
        assert_eq!(engine.scheduler().system_names()[0], "Input");
    }

    #[test]
    fn test_rejected_level_keeps_current_one() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine
            .load_level(&level(vec![SpawnRequest::new("coin", 0.0, 0.0)]))
            .unwrap();

        let mut broken = level(vec![]);
        broken.tiles.pop();
        let err = engine.load_level(&broken).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Load(LoadError::TileCountMismatch { .. })
        ));
        assert_eq!(engine.world().entity_count(), 1);
        assert_eq!(engine.tiles().width(), 4);
    }

    #[test]
    fn test_run_fixed_stops_on_quit() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.load_level(&level(vec![])).unwrap();
        let mut platform =
            ScriptedPlatform::new(vec![vec![], vec![], vec![(Key::Quit, true)]]);
        let mut recorder = Recorder::new();
        let mut audio = Recorder::new();

        let frames = engine.run_fixed(
            &mut platform,
            &mut recorder,
            &mut audio,
            Duration::from_millis(16),
        );
        assert_eq!(frames, 2);
        assert_eq!(platform.presented(), 2);
        assert_eq!(engine.scheduler().frames_run(), 2);
    }
}
