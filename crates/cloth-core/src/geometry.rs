use glam::{Vec2, Vec3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::mesh::ClothMesh;

/// Interleaved vertex for GPU upload: 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderVertex {
    pub position: [f32; 3], // 12 bytes
    pub normal: [f32; 3],   // 12 bytes
    pub uv: [f32; 2],       //  8 bytes
}

/// Triangle surface of a cloth, regenerated from knot positions each frame.
///
/// Each grid quad is split into two counter-clockwise triangles (seen from
/// the side the grid's rows and columns form a right-handed frame with).
/// Vertex normals are the normalized sum of the incident face normals.
pub struct ClothGeometry {
    knots_per_side: usize,
    indices: Vec<u32>,
    uvs: Vec<Vec2>,
    positions: Vec<Vec3>,
    face_normals: Vec<Vec3>,
    vertex_normals: Vec<Vec3>,
}

impl ClothGeometry {
    pub fn new(mesh: &ClothMesh) -> Self {
        let mut geometry = Self {
            knots_per_side: 0,
            indices: Vec::new(),
            uvs: Vec::new(),
            positions: Vec::new(),
            face_normals: Vec::new(),
            vertex_normals: Vec::new(),
        };
        geometry.update(mesh);
        geometry
    }

    /// Refresh positions and normals from the mesh's current knot positions.
    /// A mesh with a different grid size rebuilds the triangles and UVs first.
    pub fn update(&mut self, mesh: &ClothMesh) {
        if mesh.knots_per_side() != self.knots_per_side {
            self.rebuild_grid(mesh.knots_per_side());
        }
        self.positions.clear();
        self.positions.extend(mesh.knots().iter().map(|k| k.position()));
        self.update_face_normals();
        self.update_vertex_normals();
    }

    fn rebuild_grid(&mut self, n: usize) {
        self.indices.clear();
        self.indices.reserve((n - 1) * (n - 1) * 6);
        for row in 0..n - 1 {
            for col in 0..n - 1 {
                let bl = (row * n + col) as u32;
                let br = bl + 1;
                let tl = bl + n as u32;
                let tr = tl + 1;
                self.indices.extend_from_slice(&[bl, br, tr, bl, tr, tl]);
            }
        }

        let scale = 1.0 / (n - 1) as f32;
        self.uvs = (0..n * n)
            .map(|i| Vec2::new((i % n) as f32 * scale, (i / n) as f32 * scale))
            .collect();
        self.knots_per_side = n;
    }

    fn update_face_normals(&mut self) {
        let positions = &self.positions;
        let face_normal = |tri: &[u32]| {
            let a = positions[tri[0] as usize];
            let b = positions[tri[1] as usize];
            let c = positions[tri[2] as usize];
            (b - a).cross(c - a).normalize_or_zero()
        };

        #[cfg(feature = "parallel")]
        {
            self.face_normals = self.indices.par_chunks(3).map(face_normal).collect();
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.face_normals = self.indices.chunks(3).map(face_normal).collect();
        }
    }

    fn update_vertex_normals(&mut self) {
        self.vertex_normals.clear();
        self.vertex_normals.resize(self.positions.len(), Vec3::ZERO);
        for (tri, normal) in self.indices.chunks(3).zip(&self.face_normals) {
            for &v in tri {
                self.vertex_normals[v as usize] += *normal;
            }
        }
        for normal in self.vertex_normals.iter_mut() {
            *normal = normal.try_normalize().unwrap_or(Vec3::Z);
        }
    }

    /// Interleaved vertex buffer, one vertex per knot, in knot order.
    pub fn vertices(&self) -> Vec<RenderVertex> {
        self.positions
            .iter()
            .zip(&self.vertex_normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| RenderVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    pub fn vertex_normals(&self) -> &[Vec3] {
        &self.vertex_normals
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
