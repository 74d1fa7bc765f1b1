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
//! # Scroller Engine
//!
//! A fixed-capacity ECS core for 2D tile-based platformers.
//!
//! ## Features
//!
//! - **ECS Architecture**: 100 entity slots, one dense array per component
//!   and a signature bitmask per slot
//! - **Event Bus**: closed event set delivered to per-system inboxes
//! - **Fixed Pipeline**: systems run once per frame in registration order
//! - **Tile Collision**: sub-stepped movement that stops exactly at walls,
//!   with contact sensors for ground and wall detection
//! - **Headless Backends**: rendering, audio and input sit behind traits
//! - **Parallelization**: optional Rayon integration for the velocity pass
//!
//! ## Example
//!
//! ```rust
//! use scroller_engine::builders::build_player;
//! use scroller_engine::ecs::{Signature, World};
//!
//! let mut world = World::new();
//! let player = build_player(&mut world, 32.0, 16.0).unwrap();
//!
//! assert!(world.has(player, Signature::TRANSFORM | Signature::CONTROLLER));
//! assert_eq!(world.query(Signature::FOCUSED), vec![player]);
//! ```

#![warn(missing_docs)]

/// Entity Component System implementation
pub mod ecs;

/// Event types and the subscription bus
pub mod events;

/// Error types
pub mod error;

/// Engine and physics settings
pub mod config;

/// Frame pacing
pub mod time;

/// Keyboard state
pub mod input;

/// Tile grid
pub mod tiles;

/// Level files
pub mod level;

/// Animation frame catalog
pub mod assets;

/// View offset
pub mod camera;

/// Rendering, audio and platform traits
pub mod backend;

/// Per-frame services handed to systems
pub mod frame;

/// Frame pipeline passes
pub mod systems;

/// Entity builders
pub mod builders;

/// Engine facade
pub mod engine;

pub use ecs::{Entity, Scheduler, Signature, System, World};
pub use engine::Engine;
pub use error::{CapacityError, EngineError, LoadError};
pub use events::Event;
