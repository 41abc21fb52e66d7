//! Square chunk neighbourhoods.
//!
//! A neighbourhood of radius `r` around a chunk is every chunk whose grid
//! (Chebyshev) distance to the center is at most `r`:
//!
//! ```text
//! radius 1:        radius 2:
//! ┌───┬───┬───┐    25 chunks, (2r + 1)^2 in general
//! │   │   │   │
//! ├───┼───┼───┤
//! │   │ C │   │
//! ├───┼───┼───┤
//! │   │   │   │
//! └───┴───┴───┘
//! ```

use crate::chunk::ChunkPos;

/// Number of chunks in a neighbourhood of the given radius, saturating at
/// `usize::MAX`.
#[must_use]
pub const fn chunk_count(radius: u32) -> usize {
    let side = (radius as usize).saturating_mul(2).saturating_add(1);
    side.saturating_mul(side)
}

/// Iterate every chunk within `radius` of `center`, row by row.
///
/// The neighbourhood is clipped to the `i32` chunk grid.
pub fn chunks_in_range(center: ChunkPos, radius: u32) -> impl Iterator<Item = ChunkPos> {
    let r = i32::try_from(radius).unwrap_or(i32::MAX);
    let (min_x, max_x) = (center.x.saturating_sub(r), center.x.saturating_add(r));
    let (min_z, max_z) = (center.z.saturating_sub(r), center.z.saturating_add(r));
    (min_z..=max_z).flat_map(move |z| (min_x..=max_x).map(move |x| ChunkPos::new(x, z)))
}

/// Walk the symmetric difference of two neighbourhoods of equal radius.
///
/// `added` receives every chunk around `new_center` that is not around
/// `old_center`; `removed` receives every chunk around `old_center` that is not
/// around `new_center`. Chunks in both neighbourhoods are skipped, and neither
/// neighbourhood is materialized.
pub fn chunks_in_range_differing(
    new_center: ChunkPos,
    old_center: ChunkPos,
    radius: u32,
    mut added: impl FnMut(ChunkPos),
    mut removed: impl FnMut(ChunkPos),
) {
    if new_center == old_center {
        return;
    }

    for chunk in chunks_in_range(new_center, radius) {
        if !chunk.within(old_center, radius) {
            added(chunk);
        }
    }

    for chunk in chunks_in_range(old_center, radius) {
        if !chunk.within(new_center, radius) {
            removed(chunk);
        }
    }
}
