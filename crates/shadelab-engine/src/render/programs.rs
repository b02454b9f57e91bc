//! Built-in shader programs.
//!
//! Each WGSL file declares one `Uniforms` struct; the matching
//! [`UniformLayout`] here lists the same fields in the same order.

use crate::mesh::Attribute;
use crate::render::program::{DepthMode, ProgramDesc, ShaderProgram, UniformKind, UniformLayout};
use crate::render::RenderCtx;
use crate::shading::LightingModel;

const PHONG_WGSL: &str = include_str!("shaders/phong.wgsl");
const GOURAUD_WGSL: &str = include_str!("shaders/gouraud.wgsl");
const LAMP_WGSL: &str = include_str!("shaders/lamp.wgsl");
const UNLIT_WGSL: &str = include_str!("shaders/unlit.wgsl");
const FILL_WGSL: &str = include_str!("shaders/fill.wgsl");

/// Uniforms shared by the Phong and Gouraud programs.
///
/// `normal_matrix` must be the inverse-transpose of `model`.
pub fn lighting_uniforms() -> UniformLayout {
    use UniformKind::*;
    UniformLayout::new(&[
        ("model", Mat4),
        ("view", Mat4),
        ("projection", Mat4),
        ("normal_matrix", Mat4),
        ("view_pos", Vec3),
        ("shininess", Float),
        ("light_position", Vec3),
        ("light_ambient", Vec3),
        ("light_diffuse", Vec3),
        ("light_specular", Vec3),
        ("material_diffuse", Vec3),
        ("material_specular", Vec3),
    ])
}

pub fn lamp_uniforms() -> UniformLayout {
    UniformLayout::new(&[
        ("model", UniformKind::Mat4),
        ("view", UniformKind::Mat4),
        ("projection", UniformKind::Mat4),
    ])
}

pub fn unlit_uniforms() -> UniformLayout {
    UniformLayout::new(&[
        ("model", UniformKind::Mat4),
        ("projection", UniformKind::Mat4),
        ("color", UniformKind::Vec4),
    ])
}

pub fn fill_uniforms() -> UniformLayout {
    UniformLayout::new(&[("color", UniformKind::Vec4)])
}

/// Lit triangle program for `model` (positions + normals).
pub fn lit_program(ctx: &RenderCtx<'_>, model: LightingModel) -> ShaderProgram {
    let (label, wgsl) = match model {
        LightingModel::Phong => ("phong", PHONG_WGSL),
        LightingModel::Gouraud => ("gouraud", GOURAUD_WGSL),
    };
    ShaderProgram::new(
        ctx,
        ProgramDesc {
            label,
            wgsl,
            uniforms: lighting_uniforms(),
            attributes: &[Attribute::Position, Attribute::Normal],
            topology: wgpu::PrimitiveTopology::TriangleList,
            depth: DepthMode::TestAndWrite,
        },
    )
}

/// Solid white program for the light marker (positions only).
pub fn lamp_program(ctx: &RenderCtx<'_>) -> ShaderProgram {
    ShaderProgram::new(
        ctx,
        ProgramDesc {
            label: "lamp",
            wgsl: LAMP_WGSL,
            uniforms: lamp_uniforms(),
            attributes: &[Attribute::Position],
            topology: wgpu::PrimitiveTopology::TriangleList,
            depth: DepthMode::TestAndWrite,
        },
    )
}

/// Vertex-colored 2D program (positions + colors) without depth testing.
pub fn unlit_program(
    ctx: &RenderCtx<'_>,
    label: &str,
    topology: wgpu::PrimitiveTopology,
) -> ShaderProgram {
    ShaderProgram::new(
        ctx,
        ProgramDesc {
            label,
            wgsl: UNLIT_WGSL,
            uniforms: unlit_uniforms(),
            attributes: &[Attribute::Position, Attribute::Color],
            topology,
            depth: DepthMode::Ignore,
        },
    )
}

pub(crate) fn fill_program(ctx: &RenderCtx<'_>) -> ShaderProgram {
    ShaderProgram::new(
        ctx,
        ProgramDesc {
            label: "fill",
            wgsl: FILL_WGSL,
            uniforms: fill_uniforms(),
            attributes: &[],
            topology: wgpu::PrimitiveTopology::TriangleList,
            depth: DepthMode::Ignore,
        },
    )
}
