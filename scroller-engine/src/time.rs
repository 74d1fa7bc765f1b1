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
//! Frame pacing
//!
//! Speeds and accelerations are tuned per 60 Hz tick. The clock turns real
//! elapsed time into a time factor ("how many ticks elapsed") that every
//! motion quantity is multiplied by, so a 30 fps frame moves twice as far
//! as a 60 fps one.

use log::debug;
use std::time::Duration;

/// Reference tick rate motion constants are tuned for
pub const TICKS_PER_SECOND: f32 = 60.0;

/// Default ceiling on the per-frame time factor
pub const DEFAULT_MAX_TIME_FACTOR: f32 = 4.0;

/// Timing of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Elapsed time in 60 Hz ticks, clamped
    pub time_factor: f32,
    /// Milliseconds since the clock started
    pub now_ms: u64,
    /// Frame number, starting at 1 for the first tick
    pub frame: u64,
    /// Frames counted during the last full second
    pub fps: u32,
}

impl FrameTime {
    /// Frame timing with an explicit time factor and timestamp
    pub fn fixed(time_factor: f32, now_ms: u64) -> Self {
        FrameTime {
            time_factor,
            now_ms,
            frame: 0,
            fps: 0,
        }
    }
}

/// Converts elapsed wall time into per-frame timing
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_time_factor: f32,
    elapsed_total: Duration,
    frame: u64,
    fps: u32,
    frames_this_second: u32,
    second_started_ms: u64,
}

impl FrameClock {
    /// Create a clock that clamps the time factor to `max_time_factor`
    pub fn new(max_time_factor: f32) -> Self {
        FrameClock {
            max_time_factor: max_time_factor.max(0.0),
            elapsed_total: Duration::ZERO,
            frame: 0,
            fps: 0,
            frames_this_second: 0,
            second_started_ms: 0,
        }
    }

    /// Advance by `elapsed` and return the new frame's timing
    ///
    /// A stall longer than `max_time_factor` ticks is clamped so a single
    /// frame can never move an entity further than that many ticks' worth.
    pub fn tick(&mut self, elapsed: Duration) -> FrameTime {
        self.elapsed_total += elapsed;
        self.frame += 1;
        let now_ms = self.elapsed_total.as_millis() as u64;

        let raw = elapsed.as_secs_f32() * TICKS_PER_SECOND;
        let time_factor = if raw > self.max_time_factor {
            debug!(
                "frame {} stalled for {:?}; clamping time factor {:.2} to {:.2}",
                self.frame, elapsed, raw, self.max_time_factor
            );
            self.max_time_factor
        } else {
            raw
        };

        self.frames_this_second += 1;
        if now_ms >= self.second_started_ms + 1000 {
            self.fps = self.frames_this_second;
            self.frames_this_second = 0;
            self.second_started_ms = now_ms;
        }

        FrameTime {
            time_factor,
            now_ms,
            frame: self.frame,
            fps: self.fps,
        }
    }

    /// Ceiling applied to the time factor
    pub fn max_time_factor(&self) -> f32 {
        self.max_time_factor
    }

    /// Frames counted during the last full second
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TIME_FACTOR)
    }
}
