//! Color representation shared by demos and renderers.

pub mod color;

pub use color::Color;
