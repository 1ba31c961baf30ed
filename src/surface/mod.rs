//! Surface mesh export
//!
//! Turns a height field into plain vertex/index arrays. Uploading and
//! drawing them is left to the renderer.

pub mod mesh;
pub mod vertex;

pub use mesh::{SurfaceMesh, build_surface};
pub use vertex::SurfaceVertex;
