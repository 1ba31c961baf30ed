//! Height field triangulation
//!
//! An `n x n` field becomes `(n + 1) x (n + 1)` vertices so the surface
//! covers the whole domain; the last row and column reuse the heights of
//! the boundary samples. Each quad is split into two triangles.

use glam::Vec3;

use super::vertex::SurfaceVertex;
use crate::sim::HeightField;

/// CPU-side mesh ready for upload
#[derive(Debug, Clone, Default)]
pub struct SurfaceMesh {
    pub vertices: Vec<SurfaceVertex>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex data as raw bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Triangulate `field` over `[-width, width]^2`.
///
/// Vertex `(i, j)` sits at `x = j * step - width`, `z = i * step - width`
/// with height `field[min(i, n-1)][min(j, n-1)]`.
pub fn build_surface(field: &HeightField, width: f32) -> SurfaceMesh {
    let n = field.resolution();
    if n == 0 {
        return SurfaceMesh::default();
    }

    let step = 2.0 * width / n as f32;
    let stride = n + 1;

    let mut vertices = Vec::with_capacity(stride * stride);
    for i in 0..=n {
        for j in 0..=n {
            let height = field.get_clamped(i, j);
            let position = Vec3::new(j as f32 * step - width, height, i as f32 * step - width);
            vertices.push(SurfaceVertex::new(position, Vec3::Y));
        }
    }

    let mut indices = Vec::with_capacity(n * n * 6);
    for row in 0..n {
        for col in 0..n {
            let top_left = (row * stride + col) as u32;
            let top_right = top_left + 1;
            let bottom_left = top_left + stride as u32;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[top_left, bottom_left, bottom_right]);
            indices.extend_from_slice(&[top_left, bottom_right, top_right]);
        }
    }

    SurfaceMesh { vertices, indices }
}
