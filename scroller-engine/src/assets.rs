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
//! Animation frame catalog

use crate::ecs::components::Rect;
use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One frame of an animation inside the sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationFrame {
    /// Left edge in the sheet
    pub x: i32,
    /// Top edge in the sheet
    pub y: i32,
    /// Width in the sheet
    pub w: i32,
    /// Height in the sheet
    pub h: i32,
    /// Untrimmed source width, used for centring
    #[serde(default)]
    pub source_w: i32,
    /// Untrimmed source height, used for centring
    #[serde(default)]
    pub source_h: i32,
}

impl AnimationFrame {
    /// Frame at `(x, y)` of size `w` x `h` with no trimming
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        AnimationFrame {
            x,
            y,
            w,
            h,
            source_w: w,
            source_h: h,
        }
    }

    /// Region of the sheet to draw
    pub fn region(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Lookup of animation frames by asset name
pub trait AssetCatalog {
    /// Ordered frames of `name`; empty when the asset is unknown
    fn frames(&self, name: &str) -> &[AnimationFrame];
}

/// In-memory catalog, usually deserialised from a RON atlas file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Atlas {
    assets: HashMap<String, Vec<AnimationFrame>>,
}

impl Atlas {
    /// Create an empty atlas
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an asset
    pub fn insert(&mut self, name: &str, frames: Vec<AnimationFrame>) {
        self.assets.insert(name.to_string(), frames);
    }

    /// Builder form of [`Atlas::insert`]
    pub fn with_asset(mut self, name: &str, frames: Vec<AnimationFrame>) -> Self {
        self.insert(name, frames);
        self
    }

    /// Number of assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the atlas holds no assets
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Parse a RON map of asset name to frame list
    pub fn from_ron_str(contents: &str) -> Result<Self, LoadError> {
        ron::from_str(contents).map_err(|e| LoadError::Parse(e.to_string()))
    }

    /// Read a RON atlas file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }
}

impl AssetCatalog for Atlas {
    fn frames(&self, name: &str) -> &[AnimationFrame] {
        self.assets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}
