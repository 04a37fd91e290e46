use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, debug, span};

use crate::{BlockPos, ChunkLocation, WorldLocation};

pub const DEFAULT_CHUNK_SIZE: i32 = 16;
pub const DEFAULT_BLOCK_SIZE: f32 = 1.0;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read config file {}!", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse config!")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Chunk size must be positive, got {0}!")]
    InvalidChunkSize(i32),
    #[error("Block size must be positive and finite, got {0}!")]
    InvalidBlockSize(f32),
}

/// World scale shared by everything that converts between block, chunk and
/// world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVoxelConfig")]
pub struct VoxelConfig {
    /// Edge length of a cubic chunk, in blocks
    chunk_size: i32,
    /// World space edge length of one block
    block_size: f32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawVoxelConfig {
    chunk_size: i32,
    block_size: f32,
}

impl Default for RawVoxelConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl TryFrom<RawVoxelConfig> for VoxelConfig {
    type Error = ConfigError;

    fn try_from(raw: RawVoxelConfig) -> Result<Self, Self::Error> {
        Self::new(raw.chunk_size, raw.block_size)
    }
}

impl Default for VoxelConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl VoxelConfig {
    pub fn new(chunk_size: i32, block_size: f32) -> Result<Self, ConfigError> {
        if chunk_size <= 0 {
            return Err(ConfigError::InvalidChunkSize(chunk_size));
        }
        if !block_size.is_finite() || block_size <= 0. {
            return Err(ConfigError::InvalidBlockSize(block_size));
        }

        debug!(chunk_size, block_size, "Created voxel config");
        Ok(Self {
            chunk_size,
            block_size,
        })
    }

    /// Parses a RON config such as `(chunk_size: 32, block_size: 0.5)`.
    /// Missing fields keep their defaults.
    pub fn from_ron_str(src: &str) -> Result<Self, ConfigError> {
        let raw: RawVoxelConfig = ron::from_str(src)?;
        Self::try_from(raw)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let _span = span!(Level::DEBUG, "Loading voxel config", path = %path.display()).entered();

        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&src)
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    pub fn with_chunk_size(self, chunk_size: i32) -> Result<Self, ConfigError> {
        Self::new(chunk_size, self.block_size)
    }

    pub fn with_block_size(self, block_size: f32) -> Result<Self, ConfigError> {
        Self::new(self.chunk_size, block_size)
    }

    #[inline]
    pub fn chunk_of(&self, pos: BlockPos) -> ChunkLocation {
        pos.containing_chunk(self.chunk_size)
    }

    #[inline]
    pub fn local_of(&self, pos: BlockPos) -> BlockPos {
        pos.local_in_chunk(self.chunk_size)
    }

    #[inline]
    pub fn to_world(&self, pos: BlockPos) -> WorldLocation {
        pos.to_world(self.block_size)
    }

    #[inline]
    pub fn to_block(&self, world: WorldLocation) -> BlockPos {
        BlockPos::from_world(world, self.block_size)
    }
}
