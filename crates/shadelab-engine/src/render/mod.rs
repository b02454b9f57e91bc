//! GPU rendering on top of wgpu.
//!
//! - [`ShaderProgram`]: a pipeline plus a named uniform block
//! - [`MeshBuffers`]: a packed vertex buffer with one region per stream
//! - [`GpuCone`]: a cone mesh whose normal region can be rewritten in place
//! - [`FillRenderer`]: scissored solid fills in physical pixels
//!
//! Every pass carries the frame's depth attachment.

mod cone;
mod ctx;
mod fill;
mod mesh_buffers;
mod program;
pub mod programs;

pub use cone::GpuCone;
pub use ctx::{RenderCtx, RenderTarget};
pub use fill::FillRenderer;
pub use mesh_buffers::MeshBuffers;
pub use program::{DepthMode, ProgramDesc, ShaderProgram, UniformField, UniformKind, UniformLayout};
