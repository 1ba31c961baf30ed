//! Vertex type for the water surface mesh

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Position, normal and texture coordinate, laid out for direct upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl SurfaceVertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: [0.0, 0.0],
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<SurfaceVertex>(), 32);
        let v = SurfaceVertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 32);
        assert_eq!(v.position(), Vec3::new(1.0, 2.0, 3.0));
    }
}
