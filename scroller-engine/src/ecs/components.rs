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
//! Game components
//!
//! Plain data rows attached to entities: the [`Transform`] shared by every
//! pass, the discrete [`State`] produced by input, the [`Animation`] playback
//! cursor, and the small descriptive facets (tag, collectible, inventory,
//! text) used by gameplay reaction systems.

use crate::ecs::Component;
use std::collections::HashMap;

/// Axis-aligned box in whole world units
///
/// Bounds are inclusive: a box at `x` with width `w` covers columns
/// `x ..= x + w - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a new box
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Last column covered by the box
    pub fn right(&self) -> i32 {
        self.x + self.w - 1
    }

    /// Last row covered by the box
    pub fn bottom(&self) -> i32 {
        self.y + self.h - 1
    }

    /// Smallest box covering both `self` and `other`
    pub fn union(&self, other: Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            w: self.right().max(other.right()) - x + 1,
            h: self.bottom().max(other.bottom()) - y + 1,
        }
    }
}

/// Horizontal mirroring applied when drawing a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    /// Draw as authored
    #[default]
    None,
    /// Mirror left-right
    Horizontal,
}

/// Facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Facing right
    #[default]
    Right,
    /// Facing left
    Left,
}

/// Contact sensors just outside each edge of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sensors {
    /// A blocking tile touches the top edge
    pub top: bool,
    /// A blocking tile touches the bottom edge (standing on ground)
    pub bottom: bool,
    /// A blocking tile touches the left edge
    pub left: bool,
    /// A blocking tile touches the right edge
    pub right: bool,
}

/// The four points sampled by [`Sensors`], one pixel outside each edge midpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorPoints {
    /// Above the top edge
    pub top: (i32, i32),
    /// Below the bottom edge
    pub bottom: (i32, i32),
    /// Left of the left edge
    pub left: (i32, i32),
    /// Right of the right edge
    pub right: (i32, i32),
}

/// Position, footprint, motion and contact sensors
///
/// Position is continuous; the footprint is whole units. Speeds and
/// accelerations are expressed per 60 Hz tick and scaled by the frame's
/// time factor when integrated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Footprint width
    pub w: i32,
    /// Footprint height
    pub h: i32,
    /// Horizontal speed
    pub speed_x: f32,
    /// Vertical speed (positive is down)
    pub speed_y: f32,
    /// Horizontal acceleration
    pub accel_x: f32,
    /// Vertical acceleration
    pub accel_y: f32,
    /// Horizontal speed limit
    pub max_speed_x: f32,
    /// Vertical speed limit
    pub max_speed_y: f32,
    /// Contacts recomputed after every movement pass
    pub sensors: Sensors,
}

impl Transform {
    /// Create a transform at rest
    pub fn new(x: f32, y: f32, w: i32, h: i32) -> Self {
        Transform {
            x,
            y,
            w,
            h,
            ..Default::default()
        }
    }

    /// Set the per-axis speed limits
    pub fn with_max_speed(mut self, max_speed_x: f32, max_speed_y: f32) -> Self {
        self.max_speed_x = max_speed_x;
        self.max_speed_y = max_speed_y;
        self
    }

    /// Bounding box at the current position
    pub fn bounding_box(&self) -> Rect {
        self.box_at(self.x, self.y)
    }

    /// Bounding box this transform would have at `(x, y)`
    pub fn box_at(&self, x: f32, y: f32) -> Rect {
        Rect::new(x.floor() as i32, y.floor() as i32, self.w, self.h)
    }

    /// Points sampled by the contact sensors
    pub fn sensor_points(&self) -> SensorPoints {
        let bb = self.bounding_box();
        let mid_x = bb.x + bb.w / 2;
        let mid_y = bb.y + bb.h / 2;
        SensorPoints {
            top: (mid_x, bb.y - 1),
            bottom: (mid_x, bb.y + bb.h),
            left: (bb.x - 1, mid_y),
            right: (bb.x + bb.w, mid_y),
        }
    }

    /// Check that position and motion are finite
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.speed_x.is_finite()
            && self.speed_y.is_finite()
            && self.accel_x.is_finite()
            && self.accel_y.is_finite()
    }
}

impl Component for Transform {}

/// Logical state key selecting an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StateKey {
    /// Standing still
    #[default]
    Idle,
    /// Running left
    Left,
    /// Running right
    Right,
    /// Airborne
    Jump,
    /// Rolling along the ground
    Roll,
    /// Shooting
    Shoot,
    /// Sliding down a wall on the right
    WallRight,
    /// Sliding down a wall on the left
    WallLeft,
}

/// Discrete action flags derived from input and contact sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct State {
    /// Horizontal intent to the left
    pub move_left: bool,
    /// Horizontal intent to the right
    pub move_right: bool,
    /// Standing on a blocking tile
    pub grounded: bool,
    /// A jump is in progress
    pub jumping: bool,
    /// Rolling
    pub rolling: bool,
    /// Shooting
    pub shooting: bool,
    /// Touching a wall on the left
    pub left_slide: bool,
    /// Touching a wall on the right
    pub right_slide: bool,
    /// Touching a wall while airborne
    pub sliding: bool,
    /// Facing direction
    pub orientation: Orientation,
    /// Jumps taken since the last landing or wall contact
    pub jump_count: u8,
    /// Frames the jump key has been held during the current jump
    pub jump_frame_count: u32,
    /// Animation key selected from the flags above
    pub key: StateKey,
}

impl Component for State {}

/// How an animation asset is played back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationDescriptor {
    /// Asset name in the animation catalog
    pub asset: String,
    /// Milliseconds between frames
    pub frame_rate_ms: u32,
    /// Direction the asset was drawn facing
    pub orientation: Orientation,
    /// Mirroring applied when the entity has no orientation of its own
    pub flip: Flip,
    /// Wrap to the first frame after the last one; otherwise hold the last
    pub looping: bool,
}

impl AnimationDescriptor {
    /// Looping animation authored facing right
    pub fn looping(asset: &str, frame_rate_ms: u32) -> Self {
        AnimationDescriptor {
            asset: asset.to_string(),
            frame_rate_ms,
            orientation: Orientation::Right,
            flip: Flip::None,
            looping: true,
        }
    }

    /// Animation that stops on its last frame
    pub fn one_shot(asset: &str, frame_rate_ms: u32) -> Self {
        AnimationDescriptor {
            looping: false,
            ..Self::looping(asset, frame_rate_ms)
        }
    }

    /// Override the authored orientation
    pub fn facing(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Animation state map plus live playback cursor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Animation {
    /// Descriptor per logical state
    pub states: HashMap<StateKey, AnimationDescriptor>,
    /// State currently playing
    pub active: StateKey,
    /// Index into the active asset's frame list
    pub current_frame: usize,
    /// Timestamp of the last frame advance, in milliseconds
    pub last_advance_ms: u64,
}

impl Animation {
    /// Create an empty animation
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor for a state
    pub fn with_state(mut self, key: StateKey, descriptor: AnimationDescriptor) -> Self {
        self.states.insert(key, descriptor);
        self
    }

    /// Descriptor for the active state, if one is registered
    pub fn current_descriptor(&self) -> Option<&AnimationDescriptor> {
        self.states.get(&self.active)
    }

    /// Switch to `key`, restarting playback when the state changes
    ///
    /// Returns whether a transition happened.
    pub fn transition(&mut self, key: StateKey) -> bool {
        if self.active == key {
            return false;
        }
        self.active = key;
        self.current_frame = 0;
        true
    }
}

impl Component for Animation {}

/// String label used to look entities up by role
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tag {
    /// Label
    pub value: String,
}

impl Tag {
    /// Create a tag
    pub fn new(value: &str) -> Self {
        Tag {
            value: value.to_string(),
        }
    }
}

impl Component for Tag {}

/// Item granted to whoever touches the entity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Collectible {
    /// Item type, e.g. `"gold"` or `"health"`
    pub item: String,
    /// Amount granted
    pub value: i32,
}

impl Collectible {
    /// Create a collectible
    pub fn new(item: &str, value: i32) -> Self {
        Collectible {
            item: item.to_string(),
            value,
        }
    }
}

impl Component for Collectible {}

/// Item counts held by an entity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inventory {
    /// Count per item type
    pub items: HashMap<String, i32>,
}

impl Inventory {
    /// Add `amount` of `item` and return the new total
    pub fn add(&mut self, item: &str, amount: i32) -> i32 {
        let total = self.items.entry(item.to_string()).or_insert(0);
        *total += amount;
        *total
    }

    /// Current count of `item`
    pub fn count(&self, item: &str) -> i32 {
        self.items.get(item).copied().unwrap_or(0)
    }
}

impl Component for Inventory {}

/// Display string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    /// Text to draw
    pub value: String,
}

impl Text {
    /// Create a text component
    pub fn new(value: &str) -> Self {
        Text {
            value: value.to_string(),
        }
    }
}

impl Component for Text {}
