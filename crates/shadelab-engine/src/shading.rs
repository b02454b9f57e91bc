//! Shading and lighting mode selectors.
//!
//! The two axes are independent: `ShadingMode` picks which normal set a mesh
//! feeds to the GPU, `LightingModel` picks where the lighting equation runs.

use std::fmt;

/// Which normals a mesh exposes to the rasterizer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ShadingMode {
    /// One normal per triangle; faceted look.
    #[default]
    Flat,
    /// Per-vertex normals interpolated across the surface.
    Smooth,
}

impl ShadingMode {
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            ShadingMode::Flat => ShadingMode::Smooth,
            ShadingMode::Smooth => ShadingMode::Flat,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ShadingMode::Flat => "FLAT",
            ShadingMode::Smooth => "SMOOTH",
        }
    }
}

/// Where lighting is evaluated.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum LightingModel {
    /// Per-fragment lighting with interpolated normals.
    #[default]
    Phong,
    /// Per-vertex lighting with interpolated colors.
    Gouraud,
}

impl LightingModel {
    pub const ALL: [LightingModel; 2] = [LightingModel::Phong, LightingModel::Gouraud];

    /// Dense index for strategy tables keyed by lighting model.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            LightingModel::Phong => 0,
            LightingModel::Gouraud => 1,
        }
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            LightingModel::Phong => LightingModel::Gouraud,
            LightingModel::Gouraud => LightingModel::Phong,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LightingModel::Phong => "PHONG",
            LightingModel::Gouraud => "GOURAUD",
        }
    }
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for LightingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
