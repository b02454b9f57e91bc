use std::collections::HashSet;
use std::num::NonZeroU64;

use glam::{Mat4, Vec3, Vec4};

use crate::mesh::Attribute;
use crate::render::RenderCtx;

/// Scalar and vector types a program's uniform block may contain.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UniformKind {
    Float,
    Vec3,
    Vec4,
    Mat4,
}

impl UniformKind {
    /// Byte size inside a WGSL uniform struct.
    pub const fn size(self) -> u64 {
        match self {
            UniformKind::Float => 4,
            UniformKind::Vec3 => 12,
            UniformKind::Vec4 => 16,
            UniformKind::Mat4 => 64,
        }
    }

    /// WGSL alignment (uniform address space).
    pub const fn align(self) -> u64 {
        match self {
            UniformKind::Float => 4,
            UniformKind::Vec3 | UniformKind::Vec4 | UniformKind::Mat4 => 16,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformField {
    pub name: &'static str,
    pub kind: UniformKind,
    pub offset: u64,
}

/// Byte layout of a program's single uniform struct, in declaration order.
///
/// Offsets follow WGSL rules, so a `f32` declared right after a `vec3<f32>`
/// packs into the vec3's trailing four bytes.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct UniformLayout {
    fields: Vec<UniformField>,
    size: u64,
}

impl UniformLayout {
    pub fn new(fields: &[(&'static str, UniformKind)]) -> Self {
        let mut offset = 0u64;
        let fields = fields
            .iter()
            .map(|&(name, kind)| {
                offset = align_to(offset, kind.align());
                let field = UniformField { name, kind, offset };
                offset += kind.size();
                field
            })
            .collect();

        // Struct size rounds up to its largest member alignment; never zero.
        Self { fields, size: align_to(offset, 16).max(16) }
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn fields(&self) -> &[UniformField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&UniformField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Depth behavior of a program's pipeline.
///
/// Every pass carries a depth attachment, so "ignore" still declares one.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DepthMode {
    #[default]
    TestAndWrite,
    Ignore,
}

pub struct ProgramDesc<'a> {
    pub label: &'a str,
    pub wgsl: &'a str,
    pub uniforms: UniformLayout,
    /// Vertex inputs in buffer-slot order.
    pub attributes: &'a [Attribute],
    pub topology: wgpu::PrimitiveTopology,
    pub depth: DepthMode,
}

/// A compiled pipeline plus its named uniform block.
///
/// Setters write into a CPU staging copy. `bind` commits the staging copy into
/// a fresh per-draw slot of a dynamic-offset uniform buffer, so several draws
/// with different uniforms can share one frame. Slots are recycled when the
/// frame index changes and the buffer doubles when a frame runs out.
pub struct ShaderProgram {
    label: String,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,

    layout: UniformLayout,
    staging: Vec<u8>,
    attributes: Vec<Attribute>,

    slot_stride: u64,
    slot_capacity: u32,
    next_slot: u32,
    slot_frame: u64,

    warned: HashSet<String>,
}

const INITIAL_SLOTS: u32 = 8;

impl ShaderProgram {
    pub fn new(ctx: &RenderCtx<'_>, desc: ProgramDesc<'_>) -> Self {
        let ProgramDesc { label, wgsl, uniforms, attributes, topology, depth } = desc;

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{label} shader")),
            source: wgpu::ShaderSource::Wgsl(wgsl.into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label} bgl")),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: Some(block_size(&uniforms)),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{label} pipeline layout")),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let buffers: Vec<wgpu::VertexBufferLayout<'static>> =
            attributes.iter().map(|&attr| vertex_layout(attr)).collect();

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{label} pipeline")),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Generated meshes do not share a winding convention.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(depth_state(ctx.depth_format, depth)),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let alignment = u64::from(ctx.device.limits().min_uniform_buffer_offset_alignment);
        let slot_stride = align_to(uniforms.size(), alignment);
        let (uniform_buffer, bind_group) = create_slots(
            ctx.device,
            label,
            &bind_group_layout,
            &uniforms,
            slot_stride,
            INITIAL_SLOTS,
        );

        log::debug!(
            "{label}: pipeline ready ({} uniform bytes, {} vertex inputs)",
            uniforms.size(),
            attributes.len()
        );

        Self {
            label: label.to_owned(),
            pipeline,
            bind_group_layout,
            bind_group,
            uniform_buffer,
            staging: vec![0; uniforms.size() as usize],
            layout: uniforms,
            attributes: attributes.to_vec(),
            slot_stride,
            slot_capacity: INITIAL_SLOTS,
            next_slot: 0,
            slot_frame: u64::MAX,
            warned: HashSet::new(),
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Vertex inputs the pipeline consumes, in buffer-slot order.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    #[inline]
    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    pub fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.write(name, UniformKind::Mat4, bytemuck::bytes_of(&value.to_cols_array()));
    }

    pub fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.write(name, UniformKind::Vec3, bytemuck::bytes_of(&value.to_array()));
    }

    pub fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.write(name, UniformKind::Vec4, bytemuck::bytes_of(&value.to_array()));
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.write(name, UniformKind::Float, bytemuck::bytes_of(&value));
    }

    /// Makes this program current on `pass` with the uniforms set so far.
    pub fn bind(&mut self, ctx: &RenderCtx<'_>, pass: &mut wgpu::RenderPass<'_>) {
        if self.slot_frame != ctx.frame_index {
            self.slot_frame = ctx.frame_index;
            self.next_slot = 0;
        }
        if self.next_slot >= self.slot_capacity {
            self.grow(ctx.device);
        }

        let offset = u64::from(self.next_slot) * self.slot_stride;
        ctx.queue.write_buffer(&self.uniform_buffer, offset, &self.staging);
        self.next_slot += 1;

        pass.set_pipeline(&self.pipeline);
        // Offsets stay far below u32::MAX: slot counts track draws per frame.
        pass.set_bind_group(0, &self.bind_group, &[offset as u32]);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn write(&mut self, name: &str, kind: UniformKind, bytes: &[u8]) {
        let field = self.layout.field(name).map(|f| (f.kind, f.offset as usize));
        match field {
            Some((expected, offset)) if expected == kind => {
                self.staging[offset..offset + bytes.len()].copy_from_slice(bytes);
            }
            Some((expected, _)) => self.warn_once(name, &format!(
                "uniform `{name}` is {expected:?}, ignoring {kind:?} write"
            )),
            None => self.warn_once(name, &format!("no uniform named `{name}`")),
        }
    }

    fn warn_once(&mut self, name: &str, message: &str) {
        if self.warned.insert(name.to_owned()) {
            log::warn!("{}: {message}", self.label);
        }
    }

    fn grow(&mut self, device: &wgpu::Device) {
        let capacity = self.slot_capacity * 2;
        log::debug!(
            "{}: growing uniform slots {} -> {capacity}",
            self.label,
            self.slot_capacity
        );
        let (buffer, bind_group) = create_slots(
            device,
            &self.label,
            &self.bind_group_layout,
            &self.layout,
            self.slot_stride,
            capacity,
        );
        self.uniform_buffer = buffer;
        self.bind_group = bind_group;
        self.slot_capacity = capacity;
    }
}

fn align_to(value: u64, align: u64) -> u64 {
    value.div_ceil(align) * align
}

fn block_size(layout: &UniformLayout) -> NonZeroU64 {
    NonZeroU64::new(layout.size()).unwrap_or(NonZeroU64::MIN)
}

fn create_slots(
    device: &wgpu::Device,
    label: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    layout: &UniformLayout,
    stride: u64,
    capacity: u32,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("{label} uniforms")),
        size: stride * u64::from(capacity),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label} bind group")),
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: Some(block_size(layout)),
            }),
        }],
    });

    (buffer, bind_group)
}

fn depth_state(format: wgpu::TextureFormat, mode: DepthMode) -> wgpu::DepthStencilState {
    let (depth_write_enabled, depth_compare) = match mode {
        DepthMode::TestAndWrite => (true, wgpu::CompareFunction::Less),
        DepthMode::Ignore => (false, wgpu::CompareFunction::Always),
    };
    wgpu::DepthStencilState {
        format,
        depth_write_enabled,
        depth_compare,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const NORMAL_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x4];
const TEX_COORD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![3 => Float32x2];

/// One tightly packed buffer per attribute.
pub(crate) fn vertex_layout(attr: Attribute) -> wgpu::VertexBufferLayout<'static> {
    let attributes: &'static [wgpu::VertexAttribute] = match attr {
        Attribute::Position => &POSITION_ATTRS,
        Attribute::Normal => &NORMAL_ATTRS,
        Attribute::Color => &COLOR_ATTRS,
        Attribute::TexCoord => &TEX_COORD_ATTRS,
    };
    wgpu::VertexBufferLayout {
        array_stride: attr.byte_stride(),
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn float_after_vec3_packs_into_tail() {
        let layout = UniformLayout::new(&[
            ("eye", UniformKind::Vec3),
            ("shininess", UniformKind::Float),
            ("tint", UniformKind::Vec3),
        ]);
        assert_eq!(layout.field("eye").map(|f| f.offset), Some(0));
        assert_eq!(layout.field("shininess").map(|f| f.offset), Some(12));
        assert_eq!(layout.field("tint").map(|f| f.offset), Some(16));
        assert_eq!(layout.size(), 32);
    }

    #[test]
    fn vec3_after_float_realigns() {
        let layout = UniformLayout::new(&[
            ("t", UniformKind::Float),
            ("v", UniformKind::Vec3),
        ]);
        assert_eq!(layout.field("v").map(|f| f.offset), Some(16));
        assert_eq!(layout.size(), 32);
    }

    #[test]
    fn matrices_stack_at_64_bytes() {
        let layout = UniformLayout::new(&[
            ("model", UniformKind::Mat4),
            ("view", UniformKind::Mat4),
            ("color", UniformKind::Vec4),
        ]);
        assert_eq!(layout.field("view").map(|f| f.offset), Some(64));
        assert_eq!(layout.field("color").map(|f| f.offset), Some(128));
        assert_eq!(layout.size(), 144);
    }

    #[test]
    fn size_rounds_up_to_16() {
        let layout = UniformLayout::new(&[("t", UniformKind::Float)]);
        assert_eq!(layout.size(), 16);
        assert_eq!(UniformLayout::new(&[]).size(), 16);
    }

    #[test]
    fn unknown_field_is_none() {
        let layout = UniformLayout::new(&[("model", UniformKind::Mat4)]);
        assert!(layout.field("projection").is_none());
    }

    // ── vertex layouts ────────────────────────────────────────────────────

    #[test]
    fn vertex_layout_locations_match_attributes() {
        for attr in Attribute::ALL {
            let layout = vertex_layout(attr);
            assert_eq!(layout.attributes.len(), 1);
            assert_eq!(layout.attributes[0].shader_location, attr.location());
            assert_eq!(layout.attributes[0].offset, 0);
            assert_eq!(layout.attributes[0].format.size(), attr.byte_stride());
            assert_eq!(layout.array_stride, attr.byte_stride());
        }
    }

    #[test]
    fn align_to_rounds_up() {
        assert_eq!(align_to(0, 256), 0);
        assert_eq!(align_to(1, 256), 256);
        assert_eq!(align_to(368, 256), 512);
    }
}
