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
//! Error types
//!
//! Only load-time and setup paths fail. The per-frame update path has no
//! error channel: missing frames and out-of-grid lookups are defined as
//! no-ops instead.

pub use crate::config::ConfigError;
use crate::ecs::ENTITY_COUNT;

/// Every entity slot is occupied
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no free entity slot (capacity {capacity})")]
pub struct CapacityError {
    /// Number of slots in the world
    pub capacity: usize,
}

impl Default for CapacityError {
    fn default() -> Self {
        CapacityError {
            capacity: ENTITY_COUNT,
        }
    }
}

/// Malformed level, atlas or spawn data
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Contents could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// File extension is neither `.ron` nor `.toml`
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// `format_version` is not valid semver
    #[error("Invalid format version '{0}'")]
    InvalidVersion(String),

    /// `format_version` cannot be read by this engine
    #[error("Level format {found} is incompatible with supported format {supported}")]
    IncompatibleVersion {
        /// Version declared by the file
        found: String,
        /// Version this engine reads
        supported: String,
    },

    /// Tile size of zero
    #[error("Tile size must be positive")]
    ZeroTileSize,

    /// Grid dimensions and tile list disagree
    #[error("Expected {expected} tiles for the grid, found {found}")]
    TileCountMismatch {
        /// `width * height`
        expected: usize,
        /// Length of the tile list
        found: usize,
    },

    /// Spawn request names a kind with no registered builder
    #[error("Unknown spawn kind '{0}'")]
    UnknownSpawnKind(String),

    /// The spawn list is longer than the world's capacity
    #[error("Level spawns {found} entities, capacity is {capacity}")]
    TooManySpawns {
        /// Length of the spawn list
        found: usize,
        /// Entity slots in a world
        capacity: usize,
    },

    /// The level spawns more entities than the world can hold
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

/// System registration after the frame loop has started
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Systems are fixed once the first frame runs
    #[error("cannot register system '{0}' after the first frame")]
    AlreadyStarted(String),
}

/// Top-level engine error
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Entity capacity exhausted
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    /// Level or asset data rejected
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Pipeline misuse
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_message() {
        let err = CapacityError::default();
        assert_eq!(err.to_string(), "no free entity slot (capacity 100)");
    }

    #[test]
    fn test_engine_error_wraps_sources() {
        let err: EngineError = LoadError::UnknownSpawnKind("dragon".into()).into();
        assert_eq!(err.to_string(), "Unknown spawn kind 'dragon'");

        let err: EngineError = SchedulerError::AlreadyStarted("Camera".into()).into();
        assert!(matches!(err, EngineError::Scheduler(_)));
    }
}
