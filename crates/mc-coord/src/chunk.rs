//! Chunk positions and packed chunk keys.

use std::fmt;

/// log2 of the chunk width in blocks.
pub const CHUNK_SHIFT: u32 = 4;

/// Chunk width in blocks.
pub const CHUNK_SIZE: i32 = 1 << CHUNK_SHIFT;

/// Packed chunk coordinate, usable as a single hash key.
///
/// The upper 32 bits hold the chunk X, the lower 32 bits the chunk Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkIndex(pub u64);

impl ChunkIndex {
    /// Unpack into chunk coordinates.
    #[must_use]
    pub const fn pos(self) -> ChunkPos {
        ChunkPos {
            x: (self.0 >> 32) as u32 as i32,
            z: self.0 as u32 as i32,
        }
    }
}

/// Chunk column coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the given block coordinates.
    #[must_use]
    pub fn containing(block_x: f64, block_z: f64) -> Self {
        Self {
            x: block_to_chunk(block_x),
            z: block_to_chunk(block_z),
        }
    }

    /// Pack into a [`ChunkIndex`].
    #[must_use]
    pub const fn index(self) -> ChunkIndex {
        ChunkIndex(((self.x as u32 as u64) << 32) | (self.z as u32 as u64))
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Grid (Chebyshev) distance in chunks.
    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dz = self.z.abs_diff(other.z);
        if dx > dz { dx } else { dz }
    }

    /// Whether `other` lies within `radius` chunks of `self` on the grid.
    #[must_use]
    pub const fn within(self, other: Self, radius: u32) -> bool {
        self.chebyshev_distance(other) <= radius
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

/// Convert a block coordinate into a chunk coordinate, rounding toward negative infinity.
#[inline]
#[must_use]
pub fn block_to_chunk(block: f64) -> i32 {
    (block.floor() as i32) >> CHUNK_SHIFT
}
