//! Tile sets: the ordered list of tile representations a board's ranks map
//! onto. The last entry is the winning tile.
//!
//! A tile set can be loaded from TOML:
//!
//! ```toml
//! name = "GPU Edition"
//!
//! [[tiles]]
//! label = "SSD"
//! asset = "/assets/ssd.png"
//!
//! [[tiles]]
//! label = "RAM"
//! ```

use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::engine::Rank;

#[derive(thiserror::Error, Debug)]
pub enum TileSetError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("tile set has no tiles")]
    Empty,
}

/// One tile representation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Tile {
    pub label: String,
    /// Image path used by graphical front ends.
    #[serde(default)]
    pub asset: Option<String>,
}

impl Tile {
    fn new(label: &str, asset: &str) -> Self {
        Tile {
            label: label.to_string(),
            asset: Some(asset.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TileSet {
    #[serde(default = "defaults::name")]
    name: String,
    tiles: Vec<Tile>,
}

impl TileSet {
    /// The built-in set: SSD, RAM, CPU, GPU and the Nexus Cube.
    pub fn gpu_edition() -> Self {
        TileSet {
            name: defaults::name(),
            tiles: vec![
                Tile::new("SSD", "/assets/ssd.png"),
                Tile::new("RAM", "/assets/ram.png"),
                Tile::new("CPU", "/assets/cpu.png"),
                Tile::new("GPU", "/assets/gpu.png"),
                Tile::new("Nexus Cube", "/assets/nexus-cube.png"),
            ],
        }
    }

    pub fn new(name: impl Into<String>, tiles: Vec<Tile>) -> Result<Self, TileSetError> {
        if tiles.is_empty() {
            return Err(TileSetError::Empty);
        }
        Ok(TileSet {
            name: name.into(),
            tiles,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, TileSetError> {
        let set: TileSet = toml::from_str(contents)?;
        if set.tiles.is_empty() {
            return Err(TileSetError::Empty);
        }
        Ok(set)
    }

    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, TileSetError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Rank of the last tile in the set; reaching it wins the game.
    pub fn winning_rank(&self) -> Rank {
        self.tiles.len().saturating_sub(1) as Rank
    }

    pub fn get(&self, rank: Rank) -> Option<&Tile> {
        self.tiles.get(rank as usize)
    }

    /// Label for `rank`, falling back to the classic 2048 value past the end of the set.
    pub fn label(&self, rank: Rank) -> String {
        match self.get(rank) {
            Some(tile) => tile.label.clone(),
            None => format!("2^{}", rank + 1),
        }
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::gpu_edition()
    }
}

mod defaults {
    pub fn name() -> String {
        "GPU Edition".to_string()
    }
}
