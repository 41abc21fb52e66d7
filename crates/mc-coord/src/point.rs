//! World-space points.

use crate::chunk::{ChunkPos, block_to_chunk};

/// A position in block space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    #[must_use]
    pub fn chunk_x(self) -> i32 {
        block_to_chunk(self.x)
    }

    #[must_use]
    pub fn chunk_z(self) -> i32 {
        block_to_chunk(self.z)
    }

    /// The chunk column containing this point.
    #[must_use]
    pub fn chunk(self) -> ChunkPos {
        ChunkPos::containing(self.x, self.z)
    }

    /// Whether both points fall in the same chunk column.
    #[must_use]
    pub fn same_chunk(self, other: Self) -> bool {
        self.chunk() == other.chunk()
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}
