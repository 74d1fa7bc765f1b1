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
//! Integration tests for input handling, jump gating and state selection
//! run through the full pipeline

use scroller_engine::backend::{Recorder, ScriptedPlatform};
use scroller_engine::config::EngineConfig;
use scroller_engine::ecs::components::{Orientation, StateKey};
use scroller_engine::ecs::Entity;
use scroller_engine::input::Key;
use scroller_engine::level::{LevelData, SpawnRequest};
use scroller_engine::systems::JUMP_CLIP;
use scroller_engine::Engine;
use std::time::Duration;

const TICK: Duration = Duration::from_micros(16_667);

/// Player standing on a floor at the bottom of a 10x10 grid
fn standing_player() -> (Engine, Entity) {
    let mut tiles = vec![0; 100];
    for cell in &mut tiles[90..] {
        *cell = 1;
    }
    let level = LevelData {
        format_version: "0.1.0".into(),
        width: 10,
        height: 10,
        tile_size: 16,
        tileset_columns: 8,
        tiles,
        spawns: vec![SpawnRequest::new("player", 32.0, 130.0)],
    };
    let mut engine = Engine::new(EngineConfig::default()).unwrap();
    let player = engine.load_level(&level).unwrap()[0];
    (engine, player)
}

fn press(key: Key) -> Vec<(Key, bool)> {
    vec![(key, true)]
}

fn release(key: Key) -> Vec<(Key, bool)> {
    vec![(key, false)]
}

#[test]
fn test_third_jump_is_rejected() {
    let (mut engine, player) = standing_player();
    let mut platform = ScriptedPlatform::new(vec![
        vec![],
        press(Key::Jump),
        release(Key::Jump),
        press(Key::Jump),
        release(Key::Jump),
        press(Key::Jump),
    ]);
    let mut renderer = Recorder::new();
    let mut audio = Recorder::new();

    let frames = engine.run_fixed(&mut platform, &mut renderer, &mut audio, TICK);
    assert_eq!(frames, 6);

    let jumps = audio.sounds.iter().filter(|clip| *clip == JUMP_CLIP).count();
    assert_eq!(jumps, 2);

    let state = engine.world().state(player).unwrap();
    assert_eq!(state.jump_count, 2);
    assert!(!state.grounded);
    assert!(engine.world().transform(player).unwrap().y < 125.0);
}

#[test]
fn test_jump_moves_up_the_same_frame() {
    let (mut engine, player) = standing_player();
    let mut renderer = Recorder::new();
    let mut audio = Recorder::new();

    // settle so the sensors report ground
    engine.step(TICK, &mut renderer, &mut audio);
    let rest_y = engine.world().transform(player).unwrap().y;

    engine.input_mut().begin_frame();
    engine.input_mut().press(Key::Jump);
    engine.step(TICK, &mut renderer, &mut audio);

    let t = engine.world().transform(player).unwrap();
    assert!(t.speed_y < 0.0);
    assert!(t.y < rest_y - 4.0, "only rose to {}", t.y);
    assert_eq!(audio.sounds, vec![JUMP_CLIP.to_string()]);
    let state = engine.world().state(player).unwrap();
    assert!(state.jumping);
    assert_eq!(state.jump_count, 1);

    // the key follows the sensors, so it switches once airborne
    engine.input_mut().begin_frame();
    engine.step(TICK, &mut renderer, &mut audio);
    assert_eq!(engine.world().state(player).unwrap().key, StateKey::Jump);
}

#[test]
fn test_landing_restores_jumps() {
    let (mut engine, player) = standing_player();
    let mut script = vec![vec![], press(Key::Jump), release(Key::Jump)];
    script.extend(std::iter::repeat(vec![]).take(90));
    script.push(press(Key::Jump));
    let mut platform = ScriptedPlatform::new(script);
    let mut renderer = Recorder::new();
    let mut audio = Recorder::new();

    engine.run_fixed(&mut platform, &mut renderer, &mut audio, TICK);

    let jumps = audio.sounds.iter().filter(|clip| *clip == JUMP_CLIP).count();
    assert_eq!(jumps, 2);
    assert_eq!(engine.world().state(player).unwrap().jump_count, 1);
}

#[test]
fn test_running_sets_key_and_orientation() {
    let (mut engine, player) = standing_player();
    let mut renderer = Recorder::new();
    let mut audio = Recorder::new();
    engine.step(TICK, &mut renderer, &mut audio);

    engine.input_mut().begin_frame();
    engine.input_mut().press(Key::Left);
    for _ in 0..10 {
        engine.step(TICK, &mut renderer, &mut audio);
        engine.input_mut().begin_frame();
    }

    let state = engine.world().state(player).unwrap();
    assert_eq!(state.key, StateKey::Left);
    assert_eq!(state.orientation, Orientation::Left);
    let t = engine.world().transform(player).unwrap();
    assert!(t.x < 32.0);
    assert!(t.speed_x < 0.0);

    engine.input_mut().release(Key::Left);
    for _ in 0..30 {
        engine.step(TICK, &mut renderer, &mut audio);
        engine.input_mut().begin_frame();
    }
    let state = engine.world().state(player).unwrap();
    assert_eq!(state.key, StateKey::Idle);
    assert_eq!(state.orientation, Orientation::Left);
    assert_eq!(engine.world().transform(player).unwrap().speed_x, 0.0);
}
