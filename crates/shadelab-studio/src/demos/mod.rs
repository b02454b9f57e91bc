//! The demos, one `App` each.

mod cone;
mod quadrants;
mod solar;

pub use cone::ConeDemo;
pub use quadrants::QuadrantsDemo;
pub use solar::SolarDemo;
