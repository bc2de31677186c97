//! Frame composition: turns session state into rasterizer draw calls
//! plus the 2D overlay (tile preview panel and remaining-tile counter).
//!
//! The camera is a fixed isometric-style view baked into a single
//! orientation quaternion; there is no separate projection step because
//! the rasterizer treats transformed x and y as screen pixels directly.

use std::f32::consts::FRAC_PI_4;

use crate::display::{DisplaySink, RectStyle};
use crate::grid::has_cell;
use crate::math::{Quat, Vec3};
use crate::mesh::MeshId;
use crate::raster::{FillMode, FrameRasterizer, RenderObject};
use crate::session::PuzzleSession;
use crate::tile::Tile;

/// Camera placement for the 3D portion of the frame.
#[derive(Clone, Copy, Debug)]
pub struct View {
    pub location: Vec3,
    pub orientation: Quat,
    pub scale: Vec3,
}

impl Default for View {
    /// The stock view: grid centered on screen, tilted a quarter turn on
    /// each axis so three faces of the cube are visible.
    fn default() -> Self {
        Self {
            location: Vec3::new(42.0, 24.0, 0.0),
            orientation: Quat::from_euler(-FRAC_PI_4, FRAC_PI_4, -FRAC_PI_4),
            scale: Vec3::splat(35.0),
        }
    }
}

impl View {
    /// Orbits the camera by an incremental pitch/roll step, accumulated
    /// onto the current orientation.
    pub fn orbit(&mut self, pitch: f32, roll: f32) {
        self.orientation = Quat::from_euler(0.0, pitch, roll) * self.orientation;
    }
}

/// Local-space center of the voxel at grid cell `(i, j, k)`.
///
/// Grid i runs along the drop axis, which the camera sees as screen-space
/// depth after rotation; the axis flips map grid handedness onto the
/// view's.
fn voxel_center(i: u32, j: u32, k: u32) -> Vec3 {
    Vec3::new(
        (1 - i as i32) as f32 * 2.0,
        (k as i32 - 1) as f32 * 2.0,
        (j as i32 - 1) as f32 * 2.0,
    )
}

/// Draws the whole session view: committed voxels, the floating candidate,
/// the boundary frame, the upcoming-tile panel, and the remaining count.
pub fn draw_session(
    session: &PuzzleSession,
    view: &View,
    raster: &mut FrameRasterizer,
    sink: &mut dyn DisplaySink,
) {
    sink.clear();
    raster.begin_frame();

    let committed = session.grid().cells();
    let candidate = session.candidate().unwrap_or(0);
    let voxel_scale = view.scale / 6.0;

    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                // screen-facing cells sit at high i, mirrored from grid i
                let fill = if has_cell(committed, 2 - i, j, k) {
                    FillMode::Solid(true)
                } else if has_cell(candidate, 2 - i, j, k) {
                    FillMode::Wireframe
                } else {
                    continue;
                };
                raster.draw(
                    &RenderObject {
                        mesh: MeshId::Cube,
                        location: view.location,
                        relative: voxel_center(i, j, k),
                        orientation: view.orientation,
                        scale: voxel_scale,
                        fill,
                    },
                    sink,
                );
            }
        }
    }

    // boundary frame, slightly larger than the voxel lattice
    raster.draw(
        &RenderObject {
            mesh: MeshId::Frame,
            location: view.location,
            relative: Vec3::ZERO,
            orientation: view.orientation,
            scale: view.scale / Vec3::new(1.9, 1.9, 2.0),
            fill: FillMode::Wireframe,
        },
        sink,
    );

    draw_tile_panel(session, sink);
    sink.print_string(&session.remaining().to_string(), 0, 0);
}

/// Draws the side panel previewing up to four upcoming tiles.
///
/// Each preview flattens the tile to its i = 0 plane and renders every
/// occupied cell as a 2x2 pixel block, centered in its slot by the tile's
/// j and k extents.
pub fn draw_tile_panel(session: &PuzzleSession, sink: &mut dyn DisplaySink) {
    sink.draw_rect(71, 5, 12, 38, RectStyle::Outline);

    for (index, tile) in session.upcoming().iter().take(4).enumerate() {
        draw_tile_preview(tile, index, sink);
    }
}

fn draw_tile_preview(tile: &Tile, slot: usize, sink: &mut dyn DisplaySink) {
    for n in 0..9u32 {
        let j = n / 3;
        let k = n % 3;
        if has_cell(tile.shape, 0, j, k) {
            let x = j as usize * 2 + 74 + (3 - tile.dims[1] as usize);
            let y = k as usize * 2 + slot * 8 + 9 + (3 - tile.dims[2] as usize);
            sink.draw_rect(x, y, 2, 2, RectStyle::Fill);
        }
    }
}
