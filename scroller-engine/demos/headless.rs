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
//! Headless run of a short scripted session
//!
//! Builds a small level and atlas in code, replays a run-and-jump script
//! through the full pipeline and prints what the renderer and audio
//! backends received. Run with `RUST_LOG=debug` to see the engine logs.

use scroller_engine::assets::{AnimationFrame, Atlas};
use scroller_engine::backend::{Recorder, ScriptedPlatform, TextureId};
use scroller_engine::config::EngineConfig;
use scroller_engine::input::Key;
use scroller_engine::level::{LevelData, SpawnRequest};
use scroller_engine::{Engine, EngineError};
use std::time::Duration;

fn level() -> LevelData {
    let (width, height) = (20u32, 10u32);
    let mut tiles = vec![0; (width * height) as usize];
    for col in 0..width {
        tiles[((height - 1) * width + col) as usize] = 1;
    }
    // a ledge to jump onto
    for col in 12..16 {
        tiles[(6 * width + col) as usize] = 3;
    }

    let mut spawns = vec![SpawnRequest::new("player", 24.0, 120.0)];
    for i in 0..5 {
        spawns.push(SpawnRequest::new("coin", 48.0 + i as f32 * 20.0, 134.0));
    }
    spawns.push(SpawnRequest::new("heart", 210.0, 90.0));
    spawns.push(SpawnRequest::new("hud_coins", 4.0, 4.0));
    spawns.push(SpawnRequest::new("hud_health", 4.0, 16.0));

    LevelData {
        format_version: "0.1.0".into(),
        width,
        height,
        tile_size: 16,
        tileset_columns: 8,
        tiles,
        spawns,
    }
}

fn atlas() -> Atlas {
    let strip = |y: i32, count: i32| {
        (0..count)
            .map(|i| AnimationFrame::new(i * 32, y, 32, 32))
            .collect::<Vec<_>>()
    };
    Atlas::new()
        .with_asset("Player/Idle", strip(0, 4))
        .with_asset("Player/Run", strip(32, 8))
        .with_asset("Player/Fall-Jump-WallJ/Jump", strip(64, 3))
        .with_asset("Items/Coin/Spin", vec![AnimationFrame::new(0, 96, 8, 8)])
        .with_asset("Items/Heart/Pick heart", vec![AnimationFrame::new(8, 96, 7, 6)])
}

/// Hold right for a while, hop twice, then drift to a stop
fn script() -> Vec<Vec<(Key, bool)>> {
    let mut frames = vec![vec![], vec![(Key::Right, true)]];
    frames.extend(std::iter::repeat(vec![]).take(50));
    frames.push(vec![(Key::Jump, true)]);
    frames.extend(std::iter::repeat(vec![]).take(10));
    frames.push(vec![(Key::Jump, false)]);
    frames.push(vec![(Key::Jump, true)]);
    frames.extend(std::iter::repeat(vec![]).take(30));
    frames.push(vec![(Key::Jump, false), (Key::Right, false)]);
    frames.extend(std::iter::repeat(vec![]).take(60));
    frames
}

fn main() -> Result<(), EngineError> {
    env_logger::init();

    println!("=== Scroller Engine Headless Demo ===\n");

    let mut engine = Engine::new(EngineConfig::default())?;
    engine.load_atlas(atlas());
    let spawned = engine.load_level(&level())?;
    let player = spawned[0];
    println!("Spawned {} entities", spawned.len());
    println!("Pipeline: {}", engine.scheduler().system_names().join(" -> "));

    let mut platform = ScriptedPlatform::new(script());
    let mut renderer = Recorder::new();
    let mut audio = Recorder::new();
    let frames = engine.run_fixed(
        &mut platform,
        &mut renderer,
        &mut audio,
        Duration::from_micros(16_667),
    );

    println!("\nRan {} frames", frames);
    if let Some(t) = engine.world().transform(player) {
        println!("Player at ({:.2}, {:.2}), speed ({:.2}, {:.2})", t.x, t.y, t.speed_x, t.speed_y);
    }
    if let Some(inventory) = engine.world().inventory(player) {
        println!(
            "Inventory: gold {}, health {}",
            inventory.count("gold"),
            inventory.count("health")
        );
    }
    println!("Camera at ({:.2}, {:.2})", engine.camera().x(), engine.camera().y());

    println!("\nSounds played: {}", audio.sounds.join(", "));
    println!(
        "Draw calls over the run: {} tiles, {} sprites, {} text",
        renderer.regions(TextureId::Tileset).count(),
        renderer.regions(TextureId::Sprites).count(),
        renderer.texts().len()
    );

    engine.shutdown();
    Ok(())
}
