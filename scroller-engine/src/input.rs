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
//! Keyboard state with edge detection

use std::collections::HashSet;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Run left
    Left,
    /// Run right
    Right,
    /// Unused by the core pipeline
    Up,
    /// Roll
    Down,
    /// Jump
    Jump,
    /// Shoot
    Shoot,
    /// Leave the frame loop
    Quit,
}

/// Held keys plus the press and release edges seen this frame
///
/// The platform calls [`InputState::begin_frame`] once before feeding the
/// frame's raw key events through [`InputState::set_key`].
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    released: HashSet<Key>,
}

impl InputState {
    /// Create input with no keys held
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget last frame's edges; held keys stay held
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    /// Record a raw key transition
    ///
    /// Auto-repeat (a press while already held) is not an edge.
    pub fn set_key(&mut self, key: Key, down: bool) {
        if down {
            if self.held.insert(key) {
                self.pressed.insert(key);
            }
        } else if self.held.remove(&key) {
            self.released.insert(key);
        }
    }

    /// Shorthand for `set_key(key, true)`
    pub fn press(&mut self, key: Key) {
        self.set_key(key, true);
    }

    /// Shorthand for `set_key(key, false)`
    pub fn release(&mut self, key: Key) {
        self.set_key(key, false);
    }

    /// Key is currently down
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Key went down this frame
    pub fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Key went up this frame
    pub fn just_released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }

    /// The player asked to leave
    pub fn quit_requested(&self) -> bool {
        self.is_held(Key::Quit)
    }
}
