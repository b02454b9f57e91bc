//! CPU-side mesh generation.
//!
//! Meshes here are plain data: non-interleaved `f32` streams plus `u16`
//! indices. `render::MeshBuffers` packs them into GPU buffers.

pub mod cone;
pub mod primitives;
mod streams;

pub use cone::{ConeMesh, DEFAULT_CONE_COLOR, MAX_CONE_SEGMENTS, MIN_CONE_SEGMENTS};
pub use primitives::MeshData;
pub use streams::{Attribute, RegionLayout, VertexStreams};
