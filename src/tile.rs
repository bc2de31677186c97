//! Polycube tiles and their 90-degree rotations.
//!
//! A tile is a packed occupancy pattern in local, corner-anchored
//! coordinates plus the dimensions of its axis-aligned bounding box.
//! Rotation permutes both: the shape bits move through a fixed per-axis
//! coordinate map and the two box dimensions orthogonal to the rotation
//! axis swap. The occupied cells are assumed to fill the bounding box;
//! tiles with internal notches get their hull computed on the box, which
//! is the intended puzzle semantics.

use crate::grid::{cell_bit, has_cell};

/// The three lattice axes, in bit-layout order (i varies slowest).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    I,
    J,
    K,
}

/// A polycube piece: packed shape plus bounding-box dimensions.
///
/// Wire format: the shape is a 32-bit integer with only bits 26..0
/// significant, and each dimension is in 1..=3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub shape: u32,
    pub dims: [u8; 3],
}

impl Tile {
    pub const fn new(shape: u32, dims: [u8; 3]) -> Self {
        Self { shape, dims }
    }
}

/// Maps cell `(i, j, k)` through one quarter turn about `axis`.
#[inline]
const fn quarter_turn_cell(axis: Axis, i: u32, j: u32, k: u32) -> (u32, u32, u32) {
    match axis {
        Axis::I => (i, k, 2 - j),
        Axis::J => (2 - k, j, i),
        Axis::K => (j, 2 - i, k),
    }
}

/// Applies one quarter turn about `axis` to a packed shape pattern.
fn quarter_turn(shape: u32, axis: Axis) -> u32 {
    let mut out = 0;
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                if has_cell(shape, i, j, k) {
                    let (ni, nj, nk) = quarter_turn_cell(axis, i, j, k);
                    out |= cell_bit(ni, nj, nk);
                }
            }
        }
    }
    out
}

/// Rotates a tile by `quarter_turns` 90-degree steps about `axis`.
///
/// Each step permutes the shape bits and swaps the two `dims` components
/// orthogonal to the axis. Four steps about one axis is the identity on
/// both shape and dims.
pub fn rotate(tile: Tile, axis: Axis, quarter_turns: u32) -> Tile {
    let mut out = tile;
    for _ in 0..quarter_turns % 4 {
        out.shape = quarter_turn(out.shape, axis);
        match axis {
            Axis::I => out.dims.swap(1, 2),
            Axis::J => out.dims.swap(0, 2),
            Axis::K => out.dims.swap(0, 1),
        }
    }
    out
}

/// Synthetic pattern filling the tile's bounding box at the origin corner.
///
/// Built by OR-expanding the corner bit outward `dims[n] - 1` steps along
/// each axis. Rotated alongside a tile, its leading-zero count gives the
/// shift that re-anchors the rotated tile at the origin corner.
pub fn bounding_hull(dims: [u8; 3]) -> u32 {
    let mut hull = crate::grid::CORNER_BIT;
    for _ in 1..dims[0] {
        hull |= hull >> 9;
    }
    for _ in 1..dims[1] {
        hull |= hull >> 3;
    }
    for _ in 1..dims[2] {
        hull |= hull >> 1;
    }
    hull
}
