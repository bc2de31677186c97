//! Built-in level definitions.
//!
//! Each level is a fixed sequence of tiles drawn from a small catalogue
//! of polycubes, at most three cells long in any direction so every tile
//! fits the 3x3x3 grid in its identity orientation. Some levels are
//! solvable packings, some are deliberately impossible.

use crate::tile::Tile;

/// Single voxel.
pub const UNIT: Tile = Tile::new(0x400_0000, [1, 1, 1]);
/// Two-cell bar.
pub const BAR2: Tile = Tile::new(0x600_0000, [1, 1, 2]);
/// Corner tromino.
pub const VEE3: Tile = Tile::new(0x680_0000, [1, 2, 2]);
/// Three-cell bar.
pub const BAR3: Tile = Tile::new(0x700_0000, [1, 1, 3]);
/// L tetromino.
pub const ELL4: Tile = Tile::new(0x720_0000, [1, 2, 3]);
/// T tetromino.
pub const TEE4: Tile = Tile::new(0x740_0000, [1, 2, 3]);
/// U pentomino.
pub const YOU5: Tile = Tile::new(0x7A0_0000, [1, 2, 3]);
/// S tetromino.
pub const ESS4: Tile = Tile::new(0x660_0000, [1, 2, 3]);
/// Corner tetracube, the only tile spanning two i-planes.
pub const POD4: Tile = Tile::new(0x682_0000, [2, 2, 2]);

/// Number of built-in levels.
pub const LEVEL_COUNT: usize = 8;

/// The tile sequence for a level, or `None` for an unknown level number.
pub fn level_tiles(level: usize) -> Option<Vec<Tile>> {
    let tiles: &[Tile] = match level {
        0 => &[
            TEE4, ELL4, UNIT, BAR3, BAR2, BAR2, BAR2, UNIT, BAR3, BAR3, BAR2,
        ],
        1 => &[VEE3; 9],
        2 => &[BAR3, TEE4, VEE3, BAR3, ELL4, TEE4, VEE3, VEE3, VEE3],
        3 => &[TEE4, TEE4, YOU5, YOU5, ELL4, VEE3, BAR2],
        4 => &[ESS4, ESS4, ESS4, ESS4, BAR3, YOU5, BAR3],
        5 => &[YOU5, YOU5, YOU5, YOU5, YOU5, UNIT, UNIT],
        6 => &[POD4, POD4, POD4, POD4, POD4, VEE3, BAR3, UNIT],
        7 => &[ESS4, TEE4, ELL4, YOU5, POD4, POD4, BAR2],
        _ => return None,
    };
    Some(tiles.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::FULL_GRID;

    #[test]
    fn test_every_level_is_defined() {
        for level in 0..LEVEL_COUNT {
            let tiles = level_tiles(level).unwrap_or_else(|| panic!("level {level} missing"));
            assert!(!tiles.is_empty(), "level {level} has no tiles");
        }
        assert!(level_tiles(LEVEL_COUNT).is_none());
    }

    #[test]
    fn test_catalogue_tiles_fit_their_dims() {
        let catalogue = [UNIT, BAR2, VEE3, BAR3, ELL4, TEE4, YOU5, ESS4, POD4];
        for tile in catalogue {
            assert_eq!(tile.shape & !FULL_GRID, 0, "{tile:?} has stray bits");
            let hull = crate::tile::bounding_hull(tile.dims);
            assert_eq!(tile.shape & !hull, 0, "{tile:?} exceeds its dims");
        }
    }

    #[test]
    fn test_catalogue_cell_counts() {
        assert_eq!(UNIT.shape.count_ones(), 1);
        assert_eq!(BAR2.shape.count_ones(), 2);
        assert_eq!(VEE3.shape.count_ones(), 3);
        assert_eq!(BAR3.shape.count_ones(), 3);
        assert_eq!(ELL4.shape.count_ones(), 4);
        assert_eq!(TEE4.shape.count_ones(), 4);
        assert_eq!(YOU5.shape.count_ones(), 5);
        assert_eq!(ESS4.shape.count_ones(), 4);
        assert_eq!(POD4.shape.count_ones(), 4);
    }

    #[test]
    fn test_all_vee_level_holds_exactly_27_cells() {
        let cells: u32 = level_tiles(1)
            .unwrap()
            .iter()
            .map(|t| t.shape.count_ones())
            .sum();
        assert_eq!(cells, 27);
    }
}
