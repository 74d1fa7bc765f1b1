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
//! Movement and collision resolution
//!
//! Sub-stepped integration of speed into position. The frame's displacement
//! `speed * time_factor` is walked in steps of at most `time_factor` units
//! per axis, X before Y within each step. Every tentative box is tested
//! against blocking tiles and against the current boxes of the other solid
//! entities; a blocked axis has its speed zeroed and stops stepping for the
//! rest of the frame while the other axis carries on.
//!
//! ```text
//! n_x = ceil(|speed_x * tf| / tf), n_y likewise
//! while either axis has steps left:
//!     try x = start_x + step k of n_x   (blocked → speed_x = 0, axis done)
//!     try y = start_y + step k of n_y   (blocked → speed_y = 0, axis done, land if falling)
//! ```
//!
//! Positions are derived from the step counter rather than accumulated, so
//! the loop runs at most `max(n_x, n_y)` times for any finite speed and the
//! last step lands exactly on `start + speed * tf`. When many steps remain
//! and the whole swept box is free, the rest of the frame is committed at
//! once. Afterwards the four contact sensors are resampled against the tile
//! grid for next frame's input pass.

use crate::ecs::components::{Rect, Sensors, State, Transform};
use crate::ecs::{Signature, System, World};
use crate::frame::FrameContext;
use crate::tiles::TileMap;
use log::warn;

const REQUIRED: Signature = Signature::TRANSFORM
    .union(Signature::VELOCITY)
    .union(Signature::STATE);

/// Outcome of resolving one entity's motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveReport {
    /// Step-loop iterations taken
    pub iterations: u64,
    /// X motion was stopped by an obstacle
    pub blocked_x: bool,
    /// Y motion was stopped by an obstacle
    pub blocked_y: bool,
    /// Downward motion was stopped (the entity landed)
    pub landed: bool,
}

/// Moves entities and resolves collisions
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    /// Create the pass
    pub fn new() -> Self {
        MovementSystem
    }
}

impl System for MovementSystem {
    fn update(&mut self, ctx: &mut FrameContext<'_>, world: &mut World) {
        let time_factor = ctx.time.time_factor;
        for entity in world.query(REQUIRED) {
            let solids = world.solid_boxes(entity);
            let Some((transform, state)) = world.motion_mut(entity) else {
                continue;
            };
            if !transform.is_valid() {
                warn!("{} has non-finite motion {:?}; skipping", entity, transform);
                update_sensors(transform, ctx.tiles);
                continue;
            }
            resolve_motion(transform, state, ctx.tiles, &solids, time_factor);
        }
    }

    fn name(&self) -> &str {
        "Movement"
    }
}

/// Steps left above which a free swept box ends the loop early
const FAST_FORWARD_STEPS: u64 = 64;

/// One axis of the step loop
struct Axis {
    start: f64,
    sign: f64,
    length: f64,
    step: f64,
    steps: u64,
    taken: u64,
    stopped: bool,
}

impl Axis {
    fn new(start: f32, displacement: f32, time_factor: f32) -> Self {
        let length = f64::from(displacement.abs());
        let step = f64::from(time_factor);
        // float to int casts saturate, so huge displacements stay bounded
        let steps = if length > 0.0 && length.is_finite() {
            (length / step).ceil() as u64
        } else {
            0
        };
        Axis {
            start: f64::from(start),
            sign: f64::from(displacement.signum()),
            length,
            step,
            steps,
            taken: 0,
            stopped: false,
        }
    }

    fn active(&self) -> bool {
        !self.stopped && self.taken < self.steps
    }

    fn left(&self) -> u64 {
        if self.active() {
            self.steps - self.taken
        } else {
            0
        }
    }

    /// Position after `k` committed steps
    fn at(&self, k: u64) -> f32 {
        let offset = (k as f64 * self.step).min(self.length);
        (self.start + self.sign * offset) as f32
    }

    fn next(&self) -> f32 {
        self.at(self.taken + 1)
    }

    /// Where this axis ends the frame if nothing blocks it
    fn end(&self) -> f32 {
        if self.stopped {
            self.at(self.taken)
        } else {
            self.at(self.steps)
        }
    }

    fn commit(&mut self) {
        self.taken += 1;
    }

    fn finish(&mut self) {
        if !self.stopped {
            self.taken = self.steps;
        }
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

fn position_free(tiles: &TileMap, solids: &[Rect], candidate: Rect) -> bool {
    !tiles.rect_blocks(candidate) && !solids.iter().any(|&solid| World::collides(candidate, solid))
}

/// Walk `t` through this frame's displacement, stopping at obstacles
///
/// `solids` are the current boxes of every other solid entity. Landing
/// (a blocked downward step) sets `grounded` and clears `jumping` on `state`.
/// Sensors are recomputed whether or not the entity moved.
pub fn resolve_motion(
    t: &mut Transform,
    state: &mut State,
    tiles: &TileMap,
    solids: &[Rect],
    time_factor: f32,
) -> MoveReport {
    let mut report = MoveReport::default();

    if time_factor > 0.0 && time_factor.is_finite() {
        let mut x = Axis::new(t.x, t.speed_x * time_factor, time_factor);
        let mut y = Axis::new(t.y, t.speed_y * time_factor, time_factor);
        let falling = y.sign > 0.0;

        while x.active() || y.active() {
            report.iterations += 1;

            if x.left().max(y.left()) > FAST_FORWARD_STEPS {
                let (end_x, end_y) = (x.end(), y.end());
                let swept = t.bounding_box().union(t.box_at(end_x, end_y));
                if position_free(tiles, solids, swept) {
                    t.x = end_x;
                    t.y = end_y;
                    x.finish();
                    y.finish();
                    break;
                }
            }

            if x.active() {
                let next_x = x.next();
                if position_free(tiles, solids, t.box_at(next_x, t.y)) {
                    t.x = next_x;
                    x.commit();
                } else {
                    t.speed_x = 0.0;
                    report.blocked_x = true;
                    x.stop();
                }
            }

            if y.active() {
                let next_y = y.next();
                if position_free(tiles, solids, t.box_at(t.x, next_y)) {
                    t.y = next_y;
                    y.commit();
                } else {
                    t.speed_y = 0.0;
                    report.blocked_y = true;
                    y.stop();
                    if falling {
                        state.grounded = true;
                        state.jumping = false;
                        report.landed = true;
                    }
                }
            }
        }
    }

    update_sensors(t, tiles);
    report
}

/// Resample the four contact sensors against the tile grid
pub fn update_sensors(t: &mut Transform, tiles: &TileMap) {
    let points = t.sensor_points();
    t.sensors = Sensors {
        top: tiles.point_blocks(points.top.0, points.top.1),
        bottom: tiles.point_blocks(points.bottom.0, points.bottom.1),
        left: tiles.point_blocks(points.left.0, points.left.1),
        right: tiles.point_blocks(points.right.0, points.right.1),
    };
}
