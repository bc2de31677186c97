//! Depth-buffered software quad rasterizer.
//!
//! Quads are transformed, backface-culled, and scan-filled directly into
//! a display sink. Projection is orthographic and baked into the vertex
//! transform: x and y of a transformed vertex are already screen pixels,
//! z is depth only, with larger z nearer the viewer.
//!
//! Two buffers drive the fill. The depth buffer holds one float per
//! pixel and persists across every face of every object within a frame;
//! `begin_frame` resets it to negative infinity. The fill buffer is a
//! per-column bitmask of rasterized edge crossings, scratch state scoped
//! to a single quad and fully consumed by the span fill before the next
//! quad runs.

use crate::display::{DisplaySink, FRAME_HEIGHT, FRAME_WIDTH};
use crate::math::{Quat, Vec3};
use crate::mesh::{self, MeshId};

/// How a face's interior is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillMode {
    /// Depth-tested interior fill with the given pixel value.
    Solid(bool),
    /// Edge pixels only; never culled and never writes depth, so it
    /// overlays solid geometry without occluding it.
    Wireframe,
}

/// One draw call: a registry mesh plus its placement and paint mode.
#[derive(Clone, Copy, Debug)]
pub struct RenderObject {
    pub mesh: MeshId,
    pub location: Vec3,
    pub relative: Vec3,
    pub orientation: Quat,
    pub scale: Vec3,
    pub fill: FillMode,
}

impl RenderObject {
    /// Transforms a local-space vertex to screen space.
    ///
    /// The order is fixed: offset, rotate, scale, then translate. x and y
    /// land on pixel coordinates, z becomes the depth value.
    fn transform_vertex(&self, v: Vec3) -> Vec3 {
        self.orientation.rotate(v + self.relative) * self.scale + self.location
    }
}

/// Owns the frame-scoped depth buffer and quad-scoped fill scratch.
pub struct FrameRasterizer {
    /// Nearest depth seen per pixel this frame, indexed `[x][y]`.
    depth: [[f32; FRAME_HEIGHT]; FRAME_WIDTH],
    /// Edge-crossing bitmask per column, bit y set when an edge of the
    /// current quad passes through `(x, y)`.
    fill: [u64; FRAME_WIDTH],
}

impl Default for FrameRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRasterizer {
    pub fn new() -> Self {
        Self {
            depth: [[f32::NEG_INFINITY; FRAME_HEIGHT]; FRAME_WIDTH],
            fill: [0; FRAME_WIDTH],
        }
    }

    /// Resets the depth buffer for a new frame. Called once per frame,
    /// not per object.
    pub fn begin_frame(&mut self) {
        for column in &mut self.depth {
            column.fill(f32::NEG_INFINITY);
        }
    }

    /// Current depth at a pixel, for tests and debugging overlays.
    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth[x][y]
    }

    /// Draws every face of an object into the sink.
    pub fn draw(&mut self, object: &RenderObject, sink: &mut dyn DisplaySink) {
        let asset = mesh::lookup(object.mesh);
        for face in 0..asset.face_count() {
            if let Some(local) = asset.face_vertices(face) {
                let quad = local.map(|v| object.transform_vertex(v));
                self.draw_quad(quad, object.fill, sink);
            }
        }
        debug_assert!(
            self.fill.iter().all(|&column| column == 0),
            "fill scratch must be consumed after every quad"
        );
    }

    /// Rasterizes one screen-space quad.
    fn draw_quad(&mut self, quad: [Vec3; 4], fill: FillMode, sink: &mut dyn DisplaySink) {
        // unnormalized face normal; only its orientation matters
        let normal = (quad[2] - quad[0]).cross(quad[1] - quad[0]);

        // backface culling: wireframe faces are processed regardless so
        // overlays show through from any side
        if normal.z >= 0.0 && fill != FillMode::Wireframe {
            return;
        }

        let left = quad.iter().map(|v| v.x).fold(f32::INFINITY, f32::min) as i32;
        let right = quad.iter().map(|v| v.x).fold(f32::NEG_INFINITY, f32::max) as i32;
        let top = quad.iter().map(|v| v.y).fold(f32::INFINITY, f32::min) as i32;
        let bottom = quad.iter().map(|v| v.y).fold(f32::NEG_INFINITY, f32::max) as i32;

        // entirely off-frame faces are skipped before touching scratch
        if right < 0 || left >= FRAME_WIDTH as i32 || top >= FRAME_HEIGHT as i32 || bottom < 0 {
            return;
        }
        let left = left.max(0);
        let right = right.min(FRAME_WIDTH as i32 - 1);

        self.mark_edge(quad[0], quad[1]);
        self.mark_edge(quad[1], quad[2]);
        self.mark_edge(quad[2], quad[3]);
        self.mark_edge(quad[3], quad[0]);

        self.fill_spans(left, right, quad[0], normal, fill, sink);
    }

    /// Marks one boundary edge into the fill buffer as a single-pixel
    /// line, stepping along whichever axis spans more pixels.
    ///
    /// Endpoints are ordered by x so a shared edge rasterizes to the same
    /// pixels regardless of winding direction.
    fn mark_edge(&mut self, a: Vec3, b: Vec3) {
        let (x0f, y0f, x1f, y1f) = if a.x >= b.x {
            (a.x, a.y, b.x, b.y)
        } else {
            (b.x, b.y, a.x, a.y)
        };
        let (x0, y0, x1, y1) = (x0f as i32, y0f as i32, x1f as i32, y1f as i32);

        let x_range = x1 - x0;
        let y_range = y1 - y0;

        if x_range.abs() > y_range.abs() {
            let (start, stop) = if x_range > 0 { (x0, x1) } else { (x1, x0) };
            for x in start..=stop {
                let dx = x - x0;
                let y = y0 + y_range * dx / x_range;
                self.mark(x, y);
            }
        } else if y_range != 0 {
            let (start, stop) = if y_range > 0 { (y0, y1) } else { (y1, y0) };
            for y in start..=stop {
                let dy = y - y0;
                let x = x0 + x_range * dy / y_range;
                self.mark(x, y);
            }
        } else {
            // degenerate edge collapsed to a point
            self.mark(x0, y0);
        }
    }

    /// Sets one fill bit, clamped into the frame.
    fn mark(&mut self, x: i32, y: i32) {
        let x = x.clamp(0, FRAME_WIDTH as i32 - 1) as usize;
        let y = y.clamp(0, FRAME_HEIGHT as i32 - 1) as usize;
        self.fill[x] |= 1 << y;
    }

    /// Fills the quad interior column by column, consuming the fill
    /// buffer, depth-testing each pixel against the frame's depth buffer.
    ///
    /// The first and last edge bits of a column delimit the interior;
    /// this holds because the quad is convex and the only marks in the
    /// buffer are its own four edges. Depth follows the face's plane
    /// equation from `vert` and the unnormalized `normal`.
    fn fill_spans(
        &mut self,
        left: i32,
        right: i32,
        vert: Vec3,
        normal: Vec3,
        fill: FillMode,
        sink: &mut dyn DisplaySink,
    ) {
        for x in left..=right {
            let column = self.fill[x as usize];
            if column == 0 {
                continue;
            }
            let first = column.trailing_zeros() as i32;
            let last = 63 - column.leading_zeros() as i32;

            for y in first..=last {
                let z = vert.z
                    - ((x as f32 - vert.x) * normal.x + (y as f32 - vert.y) * normal.y)
                        / normal.z;
                if self.depth[x as usize][y as usize] < z {
                    match fill {
                        FillMode::Solid(on) => {
                            self.depth[x as usize][y as usize] = z;
                            sink.set_pixel(x as usize, y as usize, on);
                        }
                        FillMode::Wireframe => {
                            if column & (1 << y) != 0 {
                                sink.set_pixel(x as usize, y as usize, true);
                            }
                        }
                    }
                }
            }
            // column consumed; scratch is clean for the next quad
            self.fill[x as usize] = 0;
        }
    }
}
