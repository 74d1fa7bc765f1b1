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
//! System interface
//!
//! A system is one pass of the frame pipeline. It is registered once, gets
//! [`System::init`] at registration (the place to open an inbox and
//! subscribe), then [`System::update`] exactly once per frame in
//! registration order.

use crate::ecs::World;
use crate::frame::FrameContext;

/// One pass of the frame pipeline
pub trait System: Send {
    /// One-time setup at registration
    fn init(&mut self, _world: &mut World) {}

    /// Per-frame logic
    fn update(&mut self, ctx: &mut FrameContext<'_>, world: &mut World);

    /// Teardown when the pipeline is cleared
    fn shutdown(&mut self, _world: &mut World) {}

    /// Get the name of this system for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
