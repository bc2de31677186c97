//! Immutable mesh assets for the renderer.
//!
//! Vertex and face tables are constant data, shared by reference across
//! draws and never copied or mutated. Faces are quads, stored as groups
//! of four vertex indices; access goes through bounds-checked views so a
//! bad index table yields a skipped face, not an out-of-bounds read.

use crate::math::Vec3;

/// A read-only quad mesh: shared vertex table plus face index table.
#[derive(Debug)]
pub struct MeshAsset {
    verts: &'static [Vec3],
    faces: &'static [[u16; 4]],
}

impl MeshAsset {
    pub const fn new(verts: &'static [Vec3], faces: &'static [[u16; 4]]) -> Self {
        Self { verts, faces }
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// The four corner vertices of a face, in winding order.
    ///
    /// Returns `None` for an out-of-range face or a face index table
    /// entry that points past the vertex table.
    pub fn face_vertices(&self, face: usize) -> Option<[Vec3; 4]> {
        let indices = self.faces.get(face)?;
        Some([
            *self.verts.get(indices[0] as usize)?,
            *self.verts.get(indices[1] as usize)?,
            *self.verts.get(indices[2] as usize)?,
            *self.verts.get(indices[3] as usize)?,
        ])
    }
}

/// Identifier into the mesh-asset registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshId {
    /// Unit cube, drawn once per voxel.
    Cube,
    /// Game-space boundary cube, drawn as a wireframe overlay.
    Frame,
}

/// Looks up a registry asset. Assets live for the whole program.
pub fn lookup(id: MeshId) -> &'static MeshAsset {
    match id {
        MeshId::Cube => &CUBE,
        MeshId::Frame => &FRAME,
    }
}

/// Corners of the canonical [-1, 1] cube.
static CUBE_VERTS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Six quad faces wound so outward-facing normals cull correctly.
static CUBE_FACES: [[u16; 4]; 6] = [
    [0, 1, 3, 2],
    [2, 3, 7, 6],
    [6, 7, 5, 4],
    [4, 5, 1, 0],
    [2, 6, 4, 0],
    [7, 3, 1, 5],
];

static CUBE: MeshAsset = MeshAsset::new(&CUBE_VERTS, &CUBE_FACES);

/// The boundary frame shares the cube geometry; only its draw mode
/// differs (wireframe, never culled).
static FRAME: MeshAsset = MeshAsset::new(&CUBE_VERTS, &CUBE_FACES);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_faces_are_in_range() {
        let cube = lookup(MeshId::Cube);
        assert_eq!(cube.face_count(), 6);
        for face in 0..cube.face_count() {
            assert!(cube.face_vertices(face).is_some(), "face {face} unreadable");
        }
        assert!(cube.face_vertices(6).is_none());
    }

    #[test]
    fn test_every_cube_vertex_appears_in_some_face() {
        let mut used = [false; 8];
        for face in &CUBE_FACES {
            for &idx in face {
                used[idx as usize] = true;
            }
        }
        assert!(used.iter().all(|&u| u));
    }

    #[test]
    fn test_bad_index_entry_is_rejected() {
        static BAD_FACES: [[u16; 4]; 1] = [[0, 1, 2, 99]];
        let mesh = MeshAsset::new(&CUBE_VERTS, &BAD_FACES);
        assert!(mesh.face_vertices(0).is_none());
    }
}
