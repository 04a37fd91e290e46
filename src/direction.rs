use std::fmt::Display;

use bitflags::bitflags;
use glam::IVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::BlockPos;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("{0} is not a direction, expected a value in 0..=5")]
pub struct InvalidDirection(pub u8);

/// Axis aligned face direction. North is +Z, east is +X.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Direction {
    Up = 0,
    Down = 1,
    North = 2,
    East = 3,
    South = 4,
    West = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Down,
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub const fn as_ivec3(&self) -> IVec3 {
        use Direction::*;

        match self {
            Up => IVec3::new(0, 1, 0),
            Down => IVec3::new(0, -1, 0),
            North => IVec3::new(0, 0, 1),
            East => IVec3::new(1, 0, 0),
            South => IVec3::new(0, 0, -1),
            West => IVec3::new(-1, 0, 0),
        }
    }

    #[inline]
    pub fn offset(&self) -> BlockPos {
        BlockPos::from_direction(*self)
    }

    #[inline]
    pub const fn opposite(&self) -> Self {
        use Direction::*;

        match self {
            Up => Down,
            Down => Up,
            North => South,
            East => West,
            South => North,
            West => East,
        }
    }

    #[inline]
    pub const fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub const fn name(&self) -> &'static str {
        use Direction::*;

        match self {
            Up => "up",
            Down => "down",
            North => "north",
            East => "east",
            South => "south",
            West => "west",
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(InvalidDirection(value))
    }
}

impl From<Direction> for u8 {
    fn from(value: Direction) -> Self {
        value as u8
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

bitflags! {
    /// Set of face directions, one bit per [`Direction`] discriminant
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Directions: u8 {
        const UP = 1 << Direction::Up as u8;
        const DOWN = 1 << Direction::Down as u8;
        const NORTH = 1 << Direction::North as u8;
        const EAST = 1 << Direction::East as u8;
        const SOUTH = 1 << Direction::South as u8;
        const WEST = 1 << Direction::West as u8;

        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
        const HORIZONTAL =
            Self::NORTH.bits() | Self::EAST.bits() | Self::SOUTH.bits() | Self::WEST.bits();
    }
}

impl Directions {
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |d| self.contains(Directions::from(*d)))
    }
}

impl From<Direction> for Directions {
    fn from(value: Direction) -> Self {
        Directions::from_bits_truncate(1 << value as u8)
    }
}

impl FromIterator<Direction> for Directions {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Directions::empty(), |acc, d| acc | Directions::from(d))
    }
}
