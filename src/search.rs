//! Candidate enumeration: which rotations and placements of a tile are
//! legal against the current grid.
//!
//! The rotation search walks a fixed table of 24 proper cube orientations,
//! re-anchors each rotated tile at the origin corner, and keeps the ones
//! that still admit at least one placement. The placement search drops the
//! tile along the i axis for every free (j, k) offset, keeping the deepest
//! collision-free position per column.

use rustc_hash::FxHashSet;

use crate::grid::{translate, VoxelGrid};
use crate::tile::{bounding_hull, rotate, Axis, Tile};

/// Quarter-turn counts for the 24 proper rotations of a cube, applied
/// about axis I, then K, then J. The first 16 entries sweep I-turns
/// against J-turns; the two half-entries about K supply the remaining
/// pair of faces.
const ORIENTATIONS: [[u32; 3]; 24] = [
    [0, 0, 0], [0, 0, 1], [0, 0, 2], [0, 0, 3],
    [1, 0, 0], [1, 0, 1], [1, 0, 2], [1, 0, 3],
    [2, 0, 0], [2, 0, 1], [2, 0, 2], [2, 0, 3],
    [3, 0, 0], [3, 0, 1], [3, 0, 2], [3, 0, 3],
    [0, 1, 0], [0, 1, 1], [0, 1, 2], [0, 1, 3],
    [0, 3, 0], [0, 3, 1], [0, 3, 2], [0, 3, 3],
];

/// Applies one orientation-table entry to a tile.
fn orient(tile: Tile, entry: [u32; 3]) -> Tile {
    let t = rotate(tile, Axis::I, entry[0]);
    let t = rotate(t, Axis::K, entry[1]);
    rotate(t, Axis::J, entry[2])
}

/// Enumerates the distinct corner-anchored rotations of a tile that admit
/// at least one placement in the grid.
///
/// Each rotated shape is normalized back to the origin corner by shifting
/// it left by the leading-zero count of its identically rotated bounding
/// hull (minus the 5 unused high bits). Duplicates produced by tile
/// symmetry are removed by exact shape equality, preserving first-seen
/// order from the orientation table.
pub fn valid_rotations(tile: &Tile, grid: &VoxelGrid) -> Vec<Tile> {
    let hull = Tile::new(bounding_hull(tile.dims), tile.dims);

    let mut rotations = Vec::new();
    let mut seen_shapes: FxHashSet<u32> = FxHashSet::default();

    for entry in ORIENTATIONS {
        let rotated = orient(*tile, entry);
        let rotated_hull = orient(hull, entry);

        // move the rotated shape to the 0,0,0 corner
        let shift = rotated_hull.shape.leading_zeros() - 5;
        let candidate = Tile::new(rotated.shape << shift, rotated.dims);

        if valid_translations(&candidate, grid).is_empty() {
            continue;
        }
        if seen_shapes.insert(candidate.shape) {
            rotations.push(candidate);
        }
    }
    rotations
}

/// Enumerates all legal placements of a corner-anchored tile in the grid.
///
/// For every free offset pair `(j, k)` the tile is dropped along the i
/// axis: starting from the deepest in-bounds offset `3 - dims[0]` and
/// rising, the first collision-free translation is kept. Offsets where
/// every depth collides contribute nothing. Result order follows the
/// (j, k) enumeration.
pub fn valid_translations(tile: &Tile, grid: &VoxelGrid) -> Vec<u32> {
    let w = 4 - tile.dims[1] as u32;
    let h = 4 - tile.dims[2] as u32;
    let deepest = 3 - tile.dims[0] as u32;

    let mut placements = Vec::new();
    for c in 0..w * h {
        let j = c % w;
        let k = c / w;

        let dropped = (0..=deepest)
            .rev()
            .map(|i| translate(tile.shape, i, j, k))
            .find(|&p| !grid.collides(p));
        if let Some(pattern) = dropped {
            placements.push(pattern);
        }
    }
    placements
}
