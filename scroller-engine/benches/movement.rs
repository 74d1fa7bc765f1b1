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
//! Benchmarks for sub-stepped movement and a full pipeline frame

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scroller_engine::backend::Recorder;
use scroller_engine::config::{EngineConfig, PhysicsTuning};
use scroller_engine::ecs::components::{Rect, State, Transform};
use scroller_engine::level::{LevelData, SpawnRequest};
use scroller_engine::systems::{integrate, resolve_motion};
use scroller_engine::tiles::TileMap;
use scroller_engine::Engine;
use std::time::Duration;

/// 64x16 grid with a floor and a wall every eighth column
fn course() -> LevelData {
    let (width, height) = (64u32, 16u32);
    let mut tiles = vec![0; (width * height) as usize];
    for col in 0..width {
        tiles[((height - 1) * width + col) as usize] = 1;
        if col % 8 == 7 {
            tiles[((height - 2) * width + col) as usize] = 2;
        }
    }
    let mut spawns = vec![SpawnRequest::new("player", 20.0, 200.0)];
    for i in 0..40 {
        spawns.push(SpawnRequest::new("coin", 40.0 + i as f32 * 24.0, 216.0));
    }
    spawns.push(SpawnRequest::new("hud_coins", 4.0, 4.0));
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

/// Benchmark: one body resolved against the grid at several time factors
fn bench_resolve_motion(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_motion");
    let map = TileMap::from_level(&course()).unwrap();
    let solids = [Rect::new(300, 200, 16, 32)];

    for factor in [1.0f32, 2.5, 4.0].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(factor), factor, |b, &factor| {
            b.iter(|| {
                let mut t = Transform::new(20.0, 200.0, 9, 14);
                t.speed_x = 2.2;
                t.speed_y = 3.0;
                let mut state = State::default();
                black_box(resolve_motion(&mut t, &mut state, &map, &solids, factor))
            });
        });
    }

    group.finish();
}

fn bench_integrate(c: &mut Criterion) {
    let tuning = PhysicsTuning::default();
    let state = State {
        move_right: true,
        ..State::default()
    };
    c.bench_function("integrate", |b| {
        b.iter(|| {
            let mut t = Transform::new(0.0, 0.0, 9, 14);
            t.max_speed_x = 2.2;
            t.max_speed_y = 5.0;
            integrate(&mut t, &state, &tuning, black_box(1.0));
            black_box(t)
        });
    });
}

/// Benchmark: a whole frame through the standard pipeline
fn bench_engine_step(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default()).unwrap();
    engine.load_level(&course()).unwrap();
    let mut renderer = Recorder::new();
    let mut audio = Recorder::new();
    let tick = Duration::from_micros(16_667);

    c.bench_function("engine_step", |b| {
        b.iter(|| {
            renderer.clear();
            audio.clear();
            black_box(engine.step(tick, &mut renderer, &mut audio))
        });
    });
}

criterion_group!(benches, bench_resolve_motion, bench_integrate, bench_engine_step);
criterion_main!(benches);
