//! GPU device, surface and depth attachment.
//!
//! Creates the wgpu Instance/Adapter/Device/Queue for one window, keeps the
//! surface configured across resizes and hands out per-frame encoders.

mod depth;
mod gpu;

pub use depth::DEPTH_FORMAT;
pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
