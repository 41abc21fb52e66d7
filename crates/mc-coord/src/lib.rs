//! Chunk Coordinates
//!
//! Divides the world into 16x16 columns ("chunks") so entities can be bucketed
//! by the chunk that contains them. Chunk coordinates pack into a single
//! [`ChunkIndex`] for use as a hash key, and [`range`] enumerates the square
//! neighbourhood around a chunk used for view-distance queries.

pub mod chunk;
pub mod point;
pub mod range;

pub use chunk::{CHUNK_SHIFT, CHUNK_SIZE, ChunkIndex, ChunkPos};
pub use point::Point;
pub use range::{chunk_count, chunks_in_range, chunks_in_range_differing};
