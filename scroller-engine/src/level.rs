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
//! Level files
//!
//! A level is a row-major grid of tile ids plus a spawn list. Files are RON
//! or TOML, chosen by extension. Everything here runs before the frame loop;
//! any problem is a [`LoadError`] and the level is not entered.
//!
//! ```ron
//! (
//!     format_version: "0.1.0",
//!     width: 3,
//!     height: 2,
//!     tile_size: 16,
//!     tiles: [0, 0, 0, 1, 1, 1],
//!     spawns: [(kind: "player", x: 16.0, y: 0.0)],
//! )
//! ```

use crate::error::LoadError;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Level format this engine reads
pub const LEVEL_FORMAT_VERSION: &str = "0.1.0";

/// Request to build one entity of `kind` at `(x, y)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    /// Builder name
    pub kind: String,
    /// World x of the top-left corner
    pub x: f32,
    /// World y of the top-left corner
    pub y: f32,
}

impl SpawnRequest {
    /// Create a spawn request
    pub fn new(kind: &str, x: f32, y: f32) -> Self {
        SpawnRequest {
            kind: kind.to_string(),
            x,
            y,
        }
    }
}

fn default_tileset_columns() -> u32 {
    8
}

/// Parsed level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    /// Semver of the file layout
    pub format_version: String,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Tile edge in world units
    pub tile_size: u32,
    /// Columns in the tileset image, used to locate tile graphics
    #[serde(default = "default_tileset_columns")]
    pub tileset_columns: u32,
    /// Row-major tile ids: 0 is empty, `n > 0` is a blocking tile drawn
    /// with graphic `n - 1`
    pub tiles: Vec<u32>,
    /// Entities to build when the level loads
    #[serde(default)]
    pub spawns: Vec<SpawnRequest>,
}

impl LevelData {
    /// Parse RON contents
    pub fn from_ron_str(contents: &str) -> Result<Self, LoadError> {
        let level: LevelData =
            ron::from_str(contents).map_err(|e| LoadError::Parse(e.to_string()))?;
        level.check_version()?;
        Ok(level)
    }

    /// Parse TOML contents
    pub fn from_toml_str(contents: &str) -> Result<Self, LoadError> {
        let level: LevelData =
            toml::from_str(contents).map_err(|e| LoadError::Parse(e.to_string()))?;
        level.check_version()?;
        Ok(level)
    }

    /// Read a `.ron` or `.toml` level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Self::from_ron_str(&contents),
            Some("toml") => Self::from_toml_str(&contents),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Reject files written for an incompatible layout
    pub fn check_version(&self) -> Result<(), LoadError> {
        let found = Version::parse(&self.format_version)
            .map_err(|_| LoadError::InvalidVersion(self.format_version.clone()))?;
        let supported = Version::parse(LEVEL_FORMAT_VERSION)
            .map_err(|_| LoadError::InvalidVersion(LEVEL_FORMAT_VERSION.to_string()))?;

        if is_format_compatible(&found, &supported) {
            Ok(())
        } else {
            Err(LoadError::IncompatibleVersion {
                found: found.to_string(),
                supported: supported.to_string(),
            })
        }
    }
}

/// Whether a file at `found` can be read by an engine supporting `supported`
///
/// Major versions must match. For 1.x and later the file's minor version may
/// not exceed the engine's; for 0.x every minor bump is breaking.
pub fn is_format_compatible(found: &Version, supported: &Version) -> bool {
    if found.major != supported.major {
        return false;
    }
    if found.major != 0 {
        found.minor <= supported.minor
    } else {
        found.minor == supported.minor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL_RON: &str = r#"(
        format_version: "0.1.0",
        width: 3,
        height: 2,
        tile_size: 16,
        tiles: [0, 0, 0, 1, 2, 1],
        spawns: [(kind: "player", x: 16.0, y: 0.0)],
    )"#;

    #[test]
    fn test_parse_ron() {
        let level = LevelData::from_ron_str(LEVEL_RON).unwrap();
        assert_eq!(level.width, 3);
        assert_eq!(level.tileset_columns, 8);
        assert_eq!(level.spawns, vec![SpawnRequest::new("player", 16.0, 0.0)]);
    }

    #[test]
    fn test_parse_toml() {
        let contents = r#"
            format_version = "0.1.2"
            width = 2
            height = 1
            tile_size = 8
            tileset_columns = 4
            tiles = [0, 3]

            [[spawns]]
            kind = "coin"
            x = 4.0
            y = 0.0
        "#;
        let level = LevelData::from_toml_str(contents).unwrap();
        assert_eq!(level.tiles, vec![0, 3]);
        assert_eq!(level.spawns[0].kind, "coin");
    }

    #[test]
    fn test_rejects_incompatible_version() {
        let contents = LEVEL_RON.replace("0.1.0", "0.2.0");
        let err = LevelData::from_ron_str(&contents).unwrap_err();
        assert!(matches!(err, LoadError::IncompatibleVersion { .. }));
    }

    #[test]
    fn test_rejects_garbage_version() {
        let contents = LEVEL_RON.replace("0.1.0", "one");
        let err = LevelData::from_ron_str(&contents).unwrap_err();
        assert!(matches!(err, LoadError::InvalidVersion(_)));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            LevelData::from_ron_str("(width: 3"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_version_rules() {
        let v = |s: &str| Version::parse(s).unwrap();
        assert!(is_format_compatible(&v("0.1.5"), &v("0.1.0")));
        assert!(!is_format_compatible(&v("0.2.0"), &v("0.1.0")));
        assert!(is_format_compatible(&v("1.1.0"), &v("1.2.0")));
        assert!(!is_format_compatible(&v("1.3.0"), &v("1.2.0")));
        assert!(!is_format_compatible(&v("2.0.0"), &v("1.2.0")));
    }

    #[test]
    fn test_unsupported_extension() {
        let path = std::env::temp_dir().join("scroller_engine_level_test.json");
        std::fs::write(&path, "{}").unwrap();
        let err = LevelData::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }
}
