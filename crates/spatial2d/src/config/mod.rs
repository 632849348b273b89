//! Configuration system
//!
//! Simulation settings loadable from TOML or RON files, covering the
//! world region and the spatial index tuning knobs.

use crate::foundation::math::Rect;
use crate::spatial::QuadTreeConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World region covered by the spatial index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// X coordinate of the bottom-left corner
    pub x: f32,

    /// Y coordinate of the bottom-left corner
    pub y: f32,

    /// Width of the world region
    pub width: f32,

    /// Height of the world region
    pub height: f32,
}

/// Tunable settings for the spatial index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// World region covered by the index
    pub world: WorldBounds,

    /// Maximum rectangles per node before subdivision
    pub max_objects_per_node: usize,

    /// Maximum subdivision depth
    pub max_depth: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        let quadtree = QuadTreeConfig::default();
        Self {
            world: WorldBounds {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 600.0,
            },
            max_objects_per_node: quadtree.max_objects_per_node,
            max_depth: quadtree.max_depth,
        }
    }
}

impl SimulationSettings {
    /// Load settings from a `.toml` or `.ron` file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save settings to a `.toml` or `.ron` file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// World bounds as a rectangle
    pub fn world_rect(&self) -> Rect {
        Rect::new(
            self.world.x,
            self.world.y,
            self.world.width,
            self.world.height,
        )
    }

    /// Quadtree configuration slice of these settings
    pub fn quadtree_config(&self) -> QuadTreeConfig {
        QuadTreeConfig {
            max_objects_per_node: self.max_objects_per_node,
            max_depth: self.max_depth,
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
