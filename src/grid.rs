//! Bit-packed 3x3x3 voxel grid and the shift algebra over its patterns.
//!
//! The 27 cells of the cube live in the low 27 bits of a `u32`. For
//! `i, j, k` in `0..3` the cell `(i, j, k)` sits at bit
//! `26 - (9*i + 3*j + k)`: a base-3 positional code, most significant bit
//! first, with axis `i` varying slowest. Puzzle solvability depends on the
//! exact bit outcomes of `translate`, including its boundary-clearing
//! masks, so those formulas are fixed.

/// Bitmask with every cell of the 3x3x3 grid occupied.
pub const FULL_GRID: u32 = 0x7FF_FFFF;

/// Bit for the origin corner cell (0, 0, 0).
pub const CORNER_BIT: u32 = 0x400_0000;

/// Unit j-step mask: clears the j = 2 face of every i-plane so a 3-bit
/// shift drops those cells instead of wrapping them into the next plane.
const J_STEP_MASK: u32 = 0x7E3_F1F8;

/// Unit k-step mask: clears the k = 2 column of every 3-bit row.
const K_STEP_MASK: u32 = 0x6DB_6DB6;

/// Bit position of cell `(i, j, k)` within a packed pattern.
#[inline(always)]
pub const fn bit_index(i: u32, j: u32, k: u32) -> u32 {
    26 - (9 * i + 3 * j + k)
}

/// Single-bit pattern occupying only cell `(i, j, k)`.
#[inline(always)]
pub const fn cell_bit(i: u32, j: u32, k: u32) -> u32 {
    1 << bit_index(i, j, k)
}

/// Whether cell `(i, j, k)` is set in a packed pattern.
#[inline(always)]
pub const fn has_cell(pattern: u32, i: u32, j: u32, k: u32) -> bool {
    pattern & cell_bit(i, j, k) != 0
}

/// Translates a packed pattern by `(di, dj, dk)` unit cells.
///
/// Each unit step masks off the bit-plane being vacated before shifting,
/// so cells pushed past the grid boundary drop out rather than wrapping
/// into an adjacent row or plane. A shift of 3 or more along any single
/// axis therefore clears the pattern entirely.
pub fn translate(pattern: u32, di: u32, dj: u32, dk: u32) -> u32 {
    let mut p = pattern;
    for _ in 0..di {
        // a full 9-bit plane falls off the low end, no mask needed
        p >>= 9;
    }
    for _ in 0..dj {
        p = (p & J_STEP_MASK) >> 3;
    }
    for _ in 0..dk {
        p = (p & K_STEP_MASK) >> 1;
    }
    p & FULL_GRID
}

/// The 3x3x3 occupancy set for one play session.
///
/// Monotonic: committed placements are only ever OR'ed in. The grid is
/// zeroed only when a session (re)starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoxelGrid {
    cells: u32,
}

impl VoxelGrid {
    pub const fn new() -> Self {
        Self { cells: 0 }
    }

    /// Raw packed occupancy bits.
    pub const fn cells(&self) -> u32 {
        self.cells
    }

    /// Whether a candidate placement overlaps any occupied cell.
    pub const fn collides(&self, pattern: u32) -> bool {
        self.cells & pattern != 0
    }

    /// Commits a placement into the grid.
    pub fn occupy(&mut self, pattern: u32) {
        self.cells |= pattern & FULL_GRID;
    }

    pub const fn is_full(&self) -> bool {
        self.cells == FULL_GRID
    }

    pub const fn has_cell(&self, i: u32, j: u32, k: u32) -> bool {
        has_cell(self.cells, i, j, k)
    }
}

/// Formats a packed pattern as three i-slices side by side.
///
/// Occupied cells show as '#', empty as '.'. Rows run j = 0 at the top,
/// columns k = 0 at the left.
pub fn format_pattern(pattern: u32) -> String {
    let mut output = String::new();
    for i in 0..3 {
        if i > 0 {
            output.push_str("  ");
        }
        output.push_str(&format!("i={i}  "));
    }
    output.push('\n');

    for j in 0..3 {
        for i in 0..3 {
            if i > 0 {
                output.push_str("  ");
            }
            for k in 0..3 {
                output.push(if has_cell(pattern, i, j, k) { '#' } else { '.' });
            }
        }
        output.push('\n');
    }
    output
}
