use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec3;
use tracing_subscriber::EnvFilter;

use voxel_coords::{BlockPos, Direction, VoxelConfig};

/// Converts between block, chunk and world coordinates
#[derive(Debug, Parser)]
#[command(name = "voxel-coords", version)]
struct Cli {
    /// RON file with `chunk_size` and `block_size`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the chunk size from the config
    #[arg(long)]
    chunk_size: Option<i32>,
    /// Overrides the block size from the config
    #[arg(long)]
    block_size: Option<f32>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Containing chunk and local position of a block
    Chunk(BlockArgs),
    /// World position of a block
    World(BlockArgs),
    /// Block at a world position
    Block {
        #[arg(allow_negative_numbers = true)]
        x: f32,
        #[arg(allow_negative_numbers = true)]
        y: f32,
        #[arg(allow_negative_numbers = true)]
        z: f32,
    },
    /// Six face neighbours of a block
    Neighbors(BlockArgs),
    /// Hash code of a block
    Hash(BlockArgs),
}

#[derive(Debug, clap::Args)]
struct BlockArgs {
    #[arg(allow_negative_numbers = true)]
    x: i32,
    #[arg(allow_negative_numbers = true)]
    y: i32,
    #[arg(allow_negative_numbers = true)]
    z: i32,
}

impl From<&BlockArgs> for BlockPos {
    fn from(args: &BlockArgs) -> Self {
        BlockPos::new(args.x, args.y, args.z)
    }
}

impl Cli {
    fn voxel_config(&self) -> Result<VoxelConfig> {
        let mut config = match &self.config {
            Some(path) => VoxelConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => VoxelConfig::default(),
        };
        if let Some(chunk_size) = self.chunk_size {
            config = config
                .with_chunk_size(chunk_size)
                .context("Invalid --chunk-size")?;
        }
        if let Some(block_size) = self.block_size {
            config = config
                .with_block_size(block_size)
                .context("Invalid --block-size")?;
        }
        Ok(config)
    }
}

fn run(command: &Command, config: &VoxelConfig) -> Vec<String> {
    match command {
        Command::Chunk(args) => {
            let pos = BlockPos::from(args);
            vec![
                format!("chunk {}", config.chunk_of(pos)),
                format!("local {}", config.local_of(pos)),
            ]
        }
        Command::World(args) => {
            let world = config.to_world(BlockPos::from(args));
            vec![format!("({}, {}, {})", world.x, world.y, world.z)]
        }
        Command::Block { x, y, z } => {
            vec![config.to_block(Vec3::new(*x, *y, *z)).to_string()]
        }
        Command::Neighbors(args) => {
            let pos = BlockPos::from(args);
            Direction::ALL
                .into_iter()
                .zip(pos.neighbors())
                .map(|(d, n)| format!("{d:<5} {n}"))
                .collect()
        }
        Command::Hash(args) => vec![BlockPos::from(args).hash_code().to_string()],
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.voxel_config()?;
    tracing::debug!(?config, "Resolved configuration");

    for line in run(&cli.command, &config) {
        println!("{line}");
    }
    Ok(())
}
