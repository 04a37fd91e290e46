use glam::Vec3;

pub mod block_pos;
pub mod config;
pub mod direction;

pub use block_pos::{BlockPos, ParseBlockPosError};
pub use config::{ConfigError, VoxelConfig};
pub use direction::{Direction, Directions, InvalidDirection};

/// Block-grid coordinates of a chunk's minimum corner
pub type ChunkLocation = BlockPos;
pub type WorldLocation = Vec3;
