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
//! Fixed-order system scheduler
//!
//! Systems run in the order they were registered, each exactly once per
//! frame, with no skipping and no reordering. Gameplay correctness depends
//! on that order (the camera must see final positions, animation must see
//! the final discrete state, event latency follows publisher/subscriber
//! order), so the list is frozen once the first frame has run.
//!
//! # Examples
//!
//! ```
//! use scroller_engine::ecs::{Scheduler, System, World};
//! use scroller_engine::frame::FrameContext;
//!
//! struct Noop;
//! impl System for Noop {
//!     fn update(&mut self, _ctx: &mut FrameContext<'_>, _world: &mut World) {}
//! }
//!
//! let mut world = World::new();
//! let mut scheduler = Scheduler::new();
//! scheduler.add_system(&mut world, Noop).unwrap();
//! assert_eq!(scheduler.system_count(), 1);
//! ```

use crate::ecs::{System, World};
use crate::error::SchedulerError;
use crate::frame::FrameContext;
use log::{debug, info};

/// Ordered list of systems run once per frame
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
    frames_run: u64,
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Scheduler {
            systems: Vec::new(),
            frames_run: 0,
        }
    }

    /// Initialise `system` against `world` and append it to the pipeline
    ///
    /// Fails once a frame has run; the order is fixed from then on.
    pub fn add_system<S: System + 'static>(
        &mut self,
        world: &mut World,
        mut system: S,
    ) -> Result<(), SchedulerError> {
        if self.frames_run > 0 {
            return Err(SchedulerError::AlreadyStarted(system.name().to_string()));
        }
        system.init(world);
        debug!("registered system #{}: {}", self.systems.len(), system.name());
        self.systems.push(Box::new(system));
        Ok(())
    }

    /// Run every system once, in registration order
    pub fn run_frame(&mut self, ctx: &mut FrameContext<'_>, world: &mut World) {
        for system in &mut self.systems {
            system.update(ctx, world);
        }
        self.frames_run += 1;
    }

    /// Get the number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Names of the registered systems, in run order
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Frames run so far
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Shut every system down in registration order and empty the pipeline
    ///
    /// The scheduler accepts registrations again afterwards.
    pub fn clear(&mut self, world: &mut World) {
        for system in &mut self.systems {
            system.shutdown(world);
        }
        info!("cleared {} system(s) after {} frame(s)", self.systems.len(), self.frames_run);
        self.systems.clear();
        self.frames_run = 0;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("systems", &self.system_names())
            .field("frames_run", &self.frames_run)
            .finish()
    }
}
