use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    num::ParseIntError,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::direction::Direction;

const HASH_SEED: i32 = 47;
const HASH_MULTIPLIER: i32 = 227;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseBlockPosError {
    #[error("block position must be wrapped in parentheses")]
    MissingParentheses,
    #[error("expected 3 components, found {0}")]
    WrongComponentCount(usize),
    #[error("component {index} is not an integer")]
    InvalidComponent {
        index: usize,
        #[source]
        source: ParseIntError,
    },
}

/// Integer position of a single block in the voxel grid.
///
/// Arithmetic wraps on overflow. Equality compares the coordinates
/// directly; [`BlockPos::hash_code`] is only used to place positions in
/// hashed containers.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[derive(Serialize, Deserialize, Pod, Zeroable)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ZERO: Self = Self::new(0, 0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.wrapping_add(dx),
            self.y.wrapping_add(dy),
            self.z.wrapping_add(dz),
        )
    }

    /// Minimum corner of the chunk containing this block.
    ///
    /// Floors towards negative infinity, so `(-1, 0, 0)` with a chunk size
    /// of 16 lands in the chunk at `(-16, 0, 0)`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    #[inline]
    pub const fn containing_chunk(&self, chunk_size: i32) -> Self {
        let local = self.local_in_chunk(chunk_size);
        Self::new(
            self.x.wrapping_sub(local.x),
            self.y.wrapping_sub(local.y),
            self.z.wrapping_sub(local.z),
        )
    }

    /// Position relative to [`BlockPos::containing_chunk`], every axis in
    /// `0..chunk_size`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    #[inline]
    pub const fn local_in_chunk(&self, chunk_size: i32) -> Self {
        Self::new(
            self.x.rem_euclid(chunk_size),
            self.y.rem_euclid(chunk_size),
            self.z.rem_euclid(chunk_size),
        )
    }

    #[inline]
    pub fn to_world(&self, block_size: f32) -> Vec3 {
        self.as_ivec3().as_vec3() * block_size
    }

    /// Block containing the world position `v`, rounding each axis to the
    /// nearest block with ties to even. Non-finite components saturate.
    #[inline]
    pub fn from_world(v: Vec3, block_size: f32) -> Self {
        let scaled = v / block_size;
        Self::new(
            scaled.x.round_ties_even() as i32,
            scaled.y.round_ties_even() as i32,
            scaled.z.round_ties_even() as i32,
        )
    }

    #[inline]
    pub const fn from_direction(direction: Direction) -> Self {
        let v = direction.as_ivec3();
        Self::new(v.x, v.y, v.z)
    }

    /// Unit offset for a raw direction discriminant, [`BlockPos::ZERO`] if
    /// it names no direction.
    pub fn from_direction_index(raw: u8) -> Self {
        Direction::try_from(raw).map_or(Self::ZERO, Self::from_direction)
    }

    #[inline]
    pub fn neighbor(&self, direction: Direction) -> Self {
        *self + Self::from_direction(direction)
    }

    /// Face neighbours in [`Direction::ALL`] order
    pub fn neighbors(&self) -> [Self; 6] {
        Direction::ALL.map(|d| self.neighbor(d))
    }

    pub const fn hash_code(&self) -> i32 {
        let mut hash = HASH_SEED;
        hash = hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(self.x);
        hash = hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(self.y);
        hash = hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(self.z);
        hash
    }

    pub const fn manhattan_distance(&self, other: &Self) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
            .saturating_add(self.z.abs_diff(other.z))
    }

    pub fn chebyshev_distance(&self, other: &Self) -> u32 {
        self.x
            .abs_diff(other.x)
            .max(self.y.abs_diff(other.y))
            .max(self.z.abs_diff(other.z))
    }

    #[inline]
    pub const fn as_ivec3(&self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }
}

impl Hash for BlockPos {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl Add for BlockPos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.offset(rhs.x, rhs.y, rhs.z)
    }
}

impl Sub for BlockPos {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(
            self.x.wrapping_sub(rhs.x),
            self.y.wrapping_sub(rhs.y),
            self.z.wrapping_sub(rhs.z),
        )
    }
}

impl AddAssign for BlockPos {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for BlockPos {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for BlockPos {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(self.x.wrapping_neg(), self.y.wrapping_neg(), self.z.wrapping_neg())
    }
}

impl Mul<i32> for BlockPos {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Self::new(
            self.x.wrapping_mul(rhs),
            self.y.wrapping_mul(rhs),
            self.z.wrapping_mul(rhs),
        )
    }
}

impl From<IVec3> for BlockPos {
    fn from(value: IVec3) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<BlockPos> for IVec3 {
    fn from(value: BlockPos) -> Self {
        value.as_ivec3()
    }
}

impl From<[i32; 3]> for BlockPos {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<BlockPos> for [i32; 3] {
    fn from(value: BlockPos) -> Self {
        [value.x, value.y, value.z]
    }
}

impl Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl FromStr for BlockPos {
    type Err = ParseBlockPosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or(ParseBlockPosError::MissingParentheses)?;

        let parts: Vec<&str> = inner.split(',').collect();
        let [x, y, z] = parts[..] else {
            return Err(ParseBlockPosError::WrongComponentCount(parts.len()));
        };

        let component = |index: usize, part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|source| ParseBlockPosError::InvalidComponent { index, source })
        };

        Ok(Self::new(component(0, x)?, component(1, y)?, component(2, z)?))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use approx::assert_relative_eq;

    use super::*;

    fn sample() -> Vec<BlockPos> {
        let values = [i32::MIN, -17, -16, -1, 0, 1, 15, 16, 1000, i32::MAX];
        let mut out = Vec::new();
        for x in values {
            for y in values {
                for z in [-3, 0, 7] {
                    out.push(BlockPos::new(x, y, z));
                }
            }
        }
        out
    }

    #[test]
    fn add_then_sub_is_identity() {
        let positions = sample();
        for a in &positions {
            for b in &positions {
                assert_eq!((*a + *b) - *b, *a, "a = {a}, b = {b}");
            }
        }
    }

    #[test]
    fn offset_matches_add() {
        let a = BlockPos::new(4, -5, 6);
        assert_eq!(a.offset(1, 2, -3), a + BlockPos::new(1, 2, -3));
        assert_eq!(a.offset(1, 2, -3), BlockPos::new(5, -3, 3));
    }

    #[test]
    fn assign_ops_neg_and_scale() {
        let mut a = BlockPos::new(1, 2, 3);
        a += BlockPos::new(10, 10, 10);
        assert_eq!(a, BlockPos::new(11, 12, 13));
        a -= BlockPos::new(1, 2, 3);
        assert_eq!(a, BlockPos::new(10, 10, 10));
        assert_eq!(-a, BlockPos::new(-10, -10, -10));
        assert_eq!(a * 3, BlockPos::new(30, 30, 30));
    }

    #[test]
    fn arithmetic_wraps() {
        let max = BlockPos::new(i32::MAX, 0, 0);
        assert_eq!(max + BlockPos::new(1, 0, 0), BlockPos::new(i32::MIN, 0, 0));
        assert_eq!(-BlockPos::new(i32::MIN, 0, 0), BlockPos::new(i32::MIN, 0, 0));
    }

    #[test]
    fn equality_is_componentwise() {
        let a = BlockPos::new(1, 2, 3);
        let b = BlockPos::new(1, 2, 3);
        let c = BlockPos::new(1, 2, 3);
        assert_eq!(a, a);
        assert_eq!(a == b, b == a);
        assert!(a == b && b == c && a == c);
        assert_ne!(a, BlockPos::new(3, 2, 1));
    }

    #[test]
    fn hash_collision_does_not_imply_equality() {
        // x + 1 and y - 227 cancel in the polynomial
        let a = BlockPos::new(0, 0, 0);
        let b = BlockPos::new(1, -227, 0);
        assert_eq!(a.hash_code(), b.hash_code());
        assert_ne!(a, b);

        let set: HashSet<BlockPos> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn hash_code_follows_polynomial() {
        assert_eq!(BlockPos::ZERO.hash_code(), 549762901);
        assert_eq!(BlockPos::new(1, 2, 3).hash_code(), 549814887);
        assert_eq!(BlockPos::new(-1, -1, -1).hash_code(), 549711144);

        for p in sample() {
            let expected = ((((HASH_SEED as i64 * HASH_MULTIPLIER as i64 + p.x as i64)
                * HASH_MULTIPLIER as i64
                + p.y as i64)
                * HASH_MULTIPLIER as i64
                + p.z as i64) as u64
                & 0xffff_ffff) as u32 as i32;
            assert_eq!(p.hash_code(), expected, "{p}");
        }
    }

    #[test]
    fn equal_positions_share_a_set_slot() {
        let mut set = HashSet::new();
        set.insert(BlockPos::new(5, 6, 7));
        assert!(set.contains(&BlockPos::new(5, 6, 7)));
        assert!(!set.insert(BlockPos::new(2, 3, 4) + BlockPos::new(3, 3, 3)));
    }

    #[test]
    fn containing_chunk_floors_negative_coordinates() {
        let chunk = |x| BlockPos::new(x, 0, 0).containing_chunk(16).x;
        assert_eq!(chunk(-1), -16);
        assert_eq!(chunk(-16), -16);
        assert_eq!(chunk(-17), -32);
        assert_eq!(chunk(0), 0);
        assert_eq!(chunk(15), 0);
        assert_eq!(chunk(16), 16);
        assert_eq!(
            BlockPos::new(-1, 33, -40).containing_chunk(16),
            BlockPos::new(-16, 32, -48)
        );
    }

    #[test]
    fn chunk_plus_local_is_position() {
        for size in [1, 3, 10, 16, 32] {
            for p in sample() {
                let chunk = p.containing_chunk(size);
                let local = p.local_in_chunk(size);
                assert_eq!(chunk + local, p, "size {size}, {p}");
                for axis in <[i32; 3]>::from(local) {
                    assert!((0..size).contains(&axis));
                }
            }
        }
    }

    #[test]
    fn grid_world_grid_round_trips() {
        for block_size in [0.1, 0.25, 0.5, 1.0, 2.0, 3.0] {
            for x in -64..64 {
                let p = BlockPos::new(x, -x, x / 2);
                assert_eq!(BlockPos::from_world(p.to_world(block_size), block_size), p);
            }
        }
    }

    #[test]
    fn to_world_scales_by_block_size() {
        let w = BlockPos::new(1, -2, 3).to_world(0.5);
        assert_relative_eq!(w.x, 0.5);
        assert_relative_eq!(w.y, -1.0);
        assert_relative_eq!(w.z, 1.5);
    }

    #[test]
    fn from_world_rounds_to_nearest() {
        assert_eq!(
            BlockPos::from_world(Vec3::new(0.4, 0.6, -0.6), 1.0),
            BlockPos::new(0, 1, -1)
        );
        assert_eq!(
            BlockPos::from_world(Vec3::new(1.1, 1.4, -1.4), 0.5),
            BlockPos::new(2, 3, -3)
        );
        assert_eq!(
            BlockPos::from_world(Vec3::new(0.5, 1.5, -2.5), 1.0),
            BlockPos::new(0, 2, -2)
        );
    }

    #[test]
    fn direction_offsets() {
        use Direction::*;

        assert_eq!(BlockPos::from_direction(Up), BlockPos::new(0, 1, 0));
        assert_eq!(BlockPos::from_direction(Down), BlockPos::new(0, -1, 0));
        assert_eq!(BlockPos::from_direction(North), BlockPos::new(0, 0, 1));
        assert_eq!(BlockPos::from_direction(East), BlockPos::new(1, 0, 0));
        assert_eq!(BlockPos::from_direction(South), BlockPos::new(0, 0, -1));
        assert_eq!(BlockPos::from_direction(West), BlockPos::new(-1, 0, 0));
    }

    #[test]
    fn unknown_direction_index_is_zero() {
        for d in Direction::ALL {
            assert_eq!(BlockPos::from_direction_index(d as u8), d.offset());
        }
        assert_eq!(BlockPos::from_direction_index(6), BlockPos::ZERO);
        assert_eq!(BlockPos::from_direction_index(u8::MAX), BlockPos::ZERO);
    }

    #[test]
    fn neighbors_are_one_step_away() {
        let p = BlockPos::new(10, -4, 2);
        let neighbors = p.neighbors();
        assert_eq!(neighbors[0], BlockPos::new(10, -3, 2));
        for (d, n) in Direction::ALL.into_iter().zip(neighbors) {
            assert_eq!(p.manhattan_distance(&n), 1);
            assert_eq!(n.neighbor(d.opposite()), p);
        }
    }

    #[test]
    fn distances() {
        let a = BlockPos::new(1, 2, 3);
        let b = BlockPos::new(-2, 6, 3);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(a.chebyshev_distance(&b), 4);
        assert_eq!(
            BlockPos::new(i32::MIN, 0, 0).manhattan_distance(&BlockPos::new(i32::MAX, 0, 0)),
            u32::MAX
        );
    }

    #[test]
    fn display_and_parse() {
        let p = BlockPos::new(1, 2, 3);
        assert_eq!(p.to_string(), "(1, 2, 3)");
        assert_eq!(format!("block at {p} is broken"), "block at (1, 2, 3) is broken");
        assert_eq!("(1, 2, 3)".parse::<BlockPos>(), Ok(p));
        assert_eq!(
            "  (-1,0 , 7) ".parse::<BlockPos>(),
            Ok(BlockPos::new(-1, 0, 7))
        );

        let extremes = BlockPos::new(i32::MIN, 0, i32::MAX);
        assert_eq!(extremes.to_string().parse::<BlockPos>(), Ok(extremes));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "1, 2, 3".parse::<BlockPos>(),
            Err(ParseBlockPosError::MissingParentheses)
        );
        assert_eq!(
            "(1, 2)".parse::<BlockPos>(),
            Err(ParseBlockPosError::WrongComponentCount(2))
        );
        assert!(matches!(
            "(1, x, 3)".parse::<BlockPos>(),
            Err(ParseBlockPosError::InvalidComponent { index: 1, .. })
        ));
    }

    #[test]
    fn lossless_conversions() {
        let p = BlockPos::new(-7, 8, 9);
        assert_eq!(BlockPos::from(IVec3::from(p)), p);
        assert_eq!(BlockPos::from(<[i32; 3]>::from(p)), p);
        assert_eq!(bytemuck::cast::<BlockPos, [i32; 3]>(p), [-7, 8, 9]);
    }
}
