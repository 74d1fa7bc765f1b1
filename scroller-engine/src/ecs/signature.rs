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
//! Component signatures
//!
//! Every entity slot carries a bitmask with one bit per component kind.
//! Data components (Transform, State, ...) own a bit that says their row is
//! meaningful; marker components (Controller, Focused, ...) are nothing but
//! the bit.

use bitflags::bitflags;

bitflags! {
    /// Set of component kinds attached to an entity
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Signature: u64 {
        /// Position, footprint, speed and contact sensors
        const TRANSFORM = 1 << 0;
        /// Animation state map and playback cursor
        const ANIMATION = 1 << 1;
        /// Discrete action flags
        const STATE = 1 << 2;
        /// String label
        const TAG = 1 << 3;
        /// Item that can be picked up
        const COLLECTIBLE = 1 << 4;
        /// Item counts
        const INVENTORY = 1 << 5;
        /// Display string
        const TEXT = 1 << 6;
        /// Camera follows this entity
        const FOCUSED = 1 << 7;
        /// Driven by player input
        const CONTROLLER = 1 << 8;
        /// Blocks other movers
        const COLLIDABLE = 1 << 9;
        /// Drawn in screen space
        const HUD = 1 << 10;
        /// Moved by the velocity and movement passes
        const VELOCITY = 1 << 11;
    }
}

impl Signature {
    /// Signature of a free slot
    pub const NONE: Signature = Signature::empty();

    /// Exact-superset test: every bit of `required` is present in `self`
    ///
    /// Extra bits never disqualify an entity.
    pub fn matches(self, required: Signature) -> bool {
        self & required == required
    }

    /// Whether the slot holding this signature is free
    pub fn is_none(self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superset_matching() {
        let mask = Signature::TRANSFORM | Signature::STATE | Signature::TEXT;
        assert!(mask.matches(Signature::TRANSFORM));
        assert!(mask.matches(Signature::TRANSFORM | Signature::STATE));
        assert!(!mask.matches(Signature::TRANSFORM | Signature::CONTROLLER));
    }

    #[test]
    fn test_everything_matches_empty_requirement() {
        assert!(Signature::NONE.matches(Signature::NONE));
        assert!(Signature::HUD.matches(Signature::NONE));
    }

    #[test]
    fn test_none_is_free() {
        assert!(Signature::NONE.is_none());
        assert!(Signature::default().is_none());
        assert!(!Signature::TAG.is_none());
    }
}
