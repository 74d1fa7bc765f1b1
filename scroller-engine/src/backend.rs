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
//! Rendering, audio and platform boundaries
//!
//! The core never owns a window, a texture or a sound device. It calls out
//! through these traits, and the headless [`Recorder`] and
//! [`ScriptedPlatform`] stand in for real backends in tests and demos.

use crate::ecs::components::Rect;
use crate::input::{InputState, Key};
use std::collections::VecDeque;

pub use crate::ecs::components::Flip;

/// Texture the core draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    /// Sprite sheet holding every animation frame
    Sprites,
    /// Tileset image of the level
    Tileset,
}

/// Drawing surface
pub trait Renderer {
    /// Copy `src` of `texture` to `dest` on screen
    fn draw_region(&mut self, texture: TextureId, dest: Rect, src: Rect, flip: Flip);

    /// Outline `rect` in screen space
    fn draw_rect_outline(&mut self, rect: Rect);

    /// Draw `text` at `(x, y)`; `cache_key` identifies the text slot so a
    /// backend can reuse its rasterised texture
    fn draw_text(&mut self, cache_key: &str, text: &str, x: i32, y: i32);
}

/// Sound output
pub trait AudioSink {
    /// Play a one-shot clip by name
    fn play_sound(&mut self, name: &str);
}

/// Window and event source
pub trait Platform {
    /// Feed this frame's key events into `input`; returns true when the
    /// loop should stop
    fn poll_input(&mut self, input: &mut InputState) -> bool;

    /// Show the finished frame
    fn present(&mut self);
}

/// A call captured by [`Recorder`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// [`Renderer::draw_region`]
    Region {
        /// Source texture
        texture: TextureId,
        /// Screen rectangle
        dest: Rect,
        /// Texture rectangle
        src: Rect,
        /// Mirroring
        flip: Flip,
    },
    /// [`Renderer::draw_rect_outline`]
    Outline(Rect),
    /// [`Renderer::draw_text`]
    Text {
        /// Cache slot
        cache_key: String,
        /// Contents
        text: String,
        /// Screen x
        x: i32,
        /// Screen y
        y: i32,
    },
}

/// Headless renderer and audio sink that records every call
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    /// Draw calls in issue order
    pub draws: Vec<DrawCall>,
    /// Clips in play order
    pub sounds: Vec<String>,
}

impl Recorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.draws.clear();
        self.sounds.clear();
    }

    /// Region draws from `texture`
    pub fn regions(&self, texture: TextureId) -> impl Iterator<Item = &DrawCall> + '_ {
        self.draws.iter().filter(
            move |call| matches!(call, DrawCall::Region { texture: t, .. } if *t == texture),
        )
    }

    /// Text contents drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.draws
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for Recorder {
    fn draw_region(&mut self, texture: TextureId, dest: Rect, src: Rect, flip: Flip) {
        self.draws.push(DrawCall::Region {
            texture,
            dest,
            src,
            flip,
        });
    }

    fn draw_rect_outline(&mut self, rect: Rect) {
        self.draws.push(DrawCall::Outline(rect));
    }

    fn draw_text(&mut self, cache_key: &str, text: &str, x: i32, y: i32) {
        self.draws.push(DrawCall::Text {
            cache_key: cache_key.to_string(),
            text: text.to_string(),
            x,
            y,
        });
    }
}

impl AudioSink for Recorder {
    fn play_sound(&mut self, name: &str) {
        self.sounds.push(name.to_string());
    }
}

/// Platform that replays a fixed script of key events, one entry per frame
///
/// Requests quit once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlatform {
    frames: VecDeque<Vec<(Key, bool)>>,
    presented: usize,
}

impl ScriptedPlatform {
    /// Create a platform from per-frame key events
    pub fn new(frames: Vec<Vec<(Key, bool)>>) -> Self {
        ScriptedPlatform {
            frames: frames.into(),
            presented: 0,
        }
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl Platform for ScriptedPlatform {
    fn poll_input(&mut self, input: &mut InputState) -> bool {
        input.begin_frame();
        match self.frames.pop_front() {
            Some(events) => {
                for (key, down) in events {
                    input.set_key(key, down);
                }
                input.quit_requested()
            }
            None => true,
        }
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_captures_calls() {
        let mut recorder = Recorder::new();
        recorder.draw_region(
            TextureId::Tileset,
            Rect::new(0, 0, 16, 16),
            Rect::new(16, 0, 16, 16),
            Flip::None,
        );
        recorder.draw_text("3", "Coins: 0", 4, 4);
        recorder.play_sound("coin.wav");

        assert_eq!(recorder.regions(TextureId::Tileset).count(), 1);
        assert_eq!(recorder.regions(TextureId::Sprites).count(), 0);
        assert_eq!(recorder.texts(), vec!["Coins: 0"]);
        assert_eq!(recorder.sounds, vec!["coin.wav".to_string()]);

        recorder.clear();
        assert!(recorder.draws.is_empty());
    }

    #[test]
    fn test_scripted_platform_quits_when_exhausted() {
        let mut platform = ScriptedPlatform::new(vec![vec![(Key::Right, true)], vec![]]);
        let mut input = InputState::new();

        assert!(!platform.poll_input(&mut input));
        assert!(input.just_pressed(Key::Right));
        assert!(!platform.poll_input(&mut input));
        assert!(input.is_held(Key::Right));
        assert!(!input.just_pressed(Key::Right));
        assert!(platform.poll_input(&mut input));
    }
}
