//! Shadelab engine crate.
//!
//! Mesh generation (the cone with flat and smooth normal sets), the wgpu
//! render backend, and the single-window runtime the demos are built on.

pub mod camera;
pub mod core;
pub mod coords;
pub mod device;
pub mod error;
pub mod input;
pub mod logging;
pub mod mesh;
pub mod paint;
pub mod render;
pub mod shading;
pub mod time;
pub mod window;

pub use error::Error;
