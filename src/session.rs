//! Per-tick puzzle state machine.
//!
//! A session owns the voxel grid, the level's tile sequence, and the
//! cached candidate lists for the active tile. Each tick consumes one
//! snapshot of edge-triggered inputs, moves the rotation/translation
//! selection cursors, derives the Playing/Won/Lost status, and commits
//! placements into the grid.
//!
//! Candidate lists are length-checked before any modulo indexing; an
//! empty rotation list is a game outcome (won or lost), never an error.

use log::{debug, info};

use crate::grid::VoxelGrid;
use crate::search::{valid_rotations, valid_translations};
use crate::tile::Tile;

/// Game outcome for the current tick. `Won` and `Lost` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

/// One tick's worth of edge-triggered input, already snapshotted.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputEvents {
    pub rotate_next: bool,
    pub rotate_prev: bool,
    pub translate_next: bool,
    pub translate_prev: bool,
    pub commit: bool,
}

/// At-most-one-pending mailbox for the five game inputs.
///
/// Producers (button handlers, a terminal reader, a test script) post
/// signals at any time; the controller drains the mailbox exactly once
/// per tick. Multiple posts of the same signal between ticks coalesce
/// into one logical event.
#[derive(Debug, Default)]
pub struct InputMailbox {
    pending: InputEvents,
}

impl InputMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post_rotate_next(&mut self) {
        self.pending.rotate_next = true;
    }

    pub fn post_rotate_prev(&mut self) {
        self.pending.rotate_prev = true;
    }

    pub fn post_translate_next(&mut self) {
        self.pending.translate_next = true;
    }

    pub fn post_translate_prev(&mut self) {
        self.pending.translate_prev = true;
    }

    pub fn post_commit(&mut self) {
        self.pending.commit = true;
    }

    /// Takes the pending events, clearing the mailbox.
    pub fn take(&mut self) -> InputEvents {
        std::mem::take(&mut self.pending)
    }
}

/// One play session: grid, tile sequence, and cached candidates.
#[derive(Debug)]
pub struct PuzzleSession {
    grid: VoxelGrid,
    tiles: Vec<Tile>,
    active: usize,
    rotations: Vec<Tile>,
    translations: Vec<u32>,
    rot_cursor: isize,
    loc_cursor: isize,
}

impl PuzzleSession {
    /// Starts a session over a level's tile sequence.
    pub fn new(tiles: Vec<Tile>) -> Self {
        let mut session = Self {
            grid: VoxelGrid::new(),
            tiles,
            active: 0,
            rotations: Vec::new(),
            translations: Vec::new(),
            rot_cursor: 0,
            loc_cursor: 0,
        };
        session.refresh_candidates();
        session
    }

    /// Resets the session to the start of the same level.
    pub fn reset(&mut self) {
        self.grid = VoxelGrid::new();
        self.active = 0;
        self.rot_cursor = 0;
        self.loc_cursor = 0;
        self.refresh_candidates();
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Tiles still to be placed, including the active one.
    pub fn remaining(&self) -> usize {
        self.tiles.len().saturating_sub(self.active)
    }

    /// The tiles queued after the active one, for the preview panel.
    pub fn upcoming(&self) -> &[Tile] {
        if self.active + 1 < self.tiles.len() {
            &self.tiles[self.active + 1..]
        } else {
            &[]
        }
    }

    /// The rotation currently selected by the rotation cursor.
    fn selected_rotation(&self) -> Option<&Tile> {
        if self.rotations.is_empty() {
            return None;
        }
        let index = self.rot_cursor.rem_euclid(self.rotations.len() as isize);
        Some(&self.rotations[index as usize])
    }

    /// The placement pattern currently selected by both cursors.
    ///
    /// `None` whenever a candidate list is empty: no tile is rendered and
    /// commits are ignored while the status resolves.
    pub fn candidate(&self) -> Option<u32> {
        self.selected_rotation()?;
        if self.translations.is_empty() {
            return None;
        }
        let index = self.loc_cursor.rem_euclid(self.translations.len() as isize);
        Some(self.translations[index as usize])
    }

    /// Status derived from the cached candidates, independent of inputs.
    pub fn status(&self) -> Status {
        if self.rotations.is_empty() {
            if self.grid.is_full() {
                Status::Won
            } else {
                Status::Lost
            }
        } else {
            Status::Playing
        }
    }

    /// Recomputes both candidate lists for the active tile.
    fn refresh_candidates(&mut self) {
        match self.tiles.get(self.active).copied() {
            Some(tile) => {
                self.rotations = valid_rotations(&tile, &self.grid);
                self.translations = match self.selected_rotation().copied() {
                    Some(rotation) => valid_translations(&rotation, &self.grid),
                    None => Vec::new(),
                };
            }
            None => {
                self.rotations.clear();
                self.translations.clear();
            }
        }
    }

    /// Advances the session by one tick.
    ///
    /// Cursor moves apply first (a rotation change recomputes the
    /// translation list; the translation cursor is kept and only
    /// re-wrapped against the new length on use). Status is evaluated
    /// before any commit, so a terminal outcome is reported even when a
    /// commit arrives on the same tick.
    pub fn tick(&mut self, events: InputEvents) -> Status {
        if events.rotate_next {
            self.rot_cursor += 1;
        }
        if events.rotate_prev {
            self.rot_cursor -= 1;
        }
        if events.rotate_next || events.rotate_prev {
            if let Some(rotation) = self.selected_rotation().copied() {
                self.translations = valid_translations(&rotation, &self.grid);
                debug!(
                    "rotation cursor {} -> {} placements",
                    self.rot_cursor,
                    self.translations.len()
                );
            }
        }
        if events.translate_next {
            self.loc_cursor += 1;
        }
        if events.translate_prev {
            self.loc_cursor -= 1;
        }

        let status = self.status();
        if status != Status::Playing {
            return status;
        }

        if events.commit {
            if let Some(pattern) = self.candidate() {
                self.grid.occupy(pattern);
                info!(
                    "committed tile {} as {:#09x}, grid {:#09x}",
                    self.active,
                    pattern,
                    self.grid.cells()
                );
                // saturate on the last tile; repeated commits re-use it
                if self.active + 1 < self.tiles.len() {
                    self.active += 1;
                }
                self.refresh_candidates();
            }
        }

        Status::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{cell_bit, CORNER_BIT};

    fn commit() -> InputEvents {
        InputEvents {
            commit: true,
            ..InputEvents::default()
        }
    }

    fn unit_tile() -> Tile {
        Tile::new(CORNER_BIT, [1, 1, 1])
    }

    /// 2x2x2 corner tetracube; 27 cells are not divisible by 4, so a
    /// level made only of these can never fill the grid.
    fn pod_tile() -> Tile {
        Tile::new(
            cell_bit(0, 0, 0) | cell_bit(0, 0, 1) | cell_bit(0, 1, 0) | cell_bit(1, 0, 0),
            [2, 2, 2],
        )
    }

    #[test]
    fn test_unit_tiles_fill_the_grid_to_a_win() {
        let mut session = PuzzleSession::new(vec![unit_tile()]);
        for tick in 0..27 {
            assert_eq!(session.tick(commit()), Status::Playing, "tick {tick}");
        }
        assert!(session.grid().is_full());
        // the win is reported on the tick after the final commit
        assert_eq!(session.tick(InputEvents::default()), Status::Won);
        assert_eq!(session.status(), Status::Won);
    }

    #[test]
    fn test_impossible_remainder_is_a_loss() {
        let mut session = PuzzleSession::new(vec![pod_tile()]);
        let mut last = Status::Playing;
        for _ in 0..40 {
            last = session.tick(commit());
            if last != Status::Playing {
                break;
            }
        }
        assert_eq!(last, Status::Lost);
        assert!(!session.grid().is_full());
    }

    #[test]
    fn test_commit_advances_and_saturates_tile_index() {
        let mut session = PuzzleSession::new(vec![unit_tile(), unit_tile()]);
        assert_eq!(session.remaining(), 2);
        assert_eq!(session.upcoming().len(), 1);
        session.tick(commit());
        assert_eq!(session.remaining(), 1);
        assert!(session.upcoming().is_empty());
        // further commits keep re-using the last tile
        session.tick(commit());
        session.tick(commit());
        assert_eq!(session.remaining(), 1);
        assert_eq!(session.grid().cells().count_ones(), 3);
    }

    #[test]
    fn test_commit_places_the_selected_candidate() {
        let mut session = PuzzleSession::new(vec![unit_tile()]);
        let candidate = session.candidate().expect("unit tile must have candidates");
        session.tick(commit());
        assert!(session.grid().collides(candidate));
    }

    #[test]
    fn test_translate_cursor_wraps_both_directions() {
        let mut session = PuzzleSession::new(vec![unit_tile()]);
        let first = session.candidate().unwrap();
        session.tick(InputEvents {
            translate_prev: true,
            ..InputEvents::default()
        });
        let last = session.candidate().unwrap();
        assert_ne!(first, last);
        // nine placements: stepping forward again returns to the start
        session.tick(InputEvents {
            translate_next: true,
            ..InputEvents::default()
        });
        assert_eq!(session.candidate().unwrap(), first);
    }

    #[test]
    fn test_rotation_change_recomputes_translations() {
        // 1x1x2 bar: three corner-anchored rotations with different drops
        let bar = Tile::new(CORNER_BIT | cell_bit(0, 0, 1), [1, 1, 2]);
        let mut session = PuzzleSession::new(vec![bar]);
        let before = session.candidate().unwrap();
        session.tick(InputEvents {
            rotate_next: true,
            ..InputEvents::default()
        });
        let after = session.candidate().unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_mailbox_coalesces_and_clears() {
        let mut mailbox = InputMailbox::new();
        mailbox.post_commit();
        mailbox.post_commit();
        mailbox.post_rotate_next();
        let events = mailbox.take();
        assert!(events.commit);
        assert!(events.rotate_next);
        assert!(!events.translate_next);
        let drained = mailbox.take();
        assert!(!drained.commit && !drained.rotate_next);
    }

    #[test]
    fn test_reset_restores_the_initial_state() {
        let mut session = PuzzleSession::new(vec![unit_tile(), unit_tile()]);
        session.tick(commit());
        session.tick(commit());
        assert_ne!(session.grid().cells(), 0);
        session.reset();
        assert_eq!(session.grid().cells(), 0);
        assert_eq!(session.remaining(), 2);
        assert_eq!(session.status(), Status::Playing);
    }

    #[test]
    fn test_empty_tile_sequence_is_an_immediate_loss() {
        let session = PuzzleSession::new(Vec::new());
        assert_eq!(session.status(), Status::Lost);
        assert_eq!(session.candidate(), None);
    }
}
