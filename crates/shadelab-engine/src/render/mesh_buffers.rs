use std::collections::HashSet;

use wgpu::util::DeviceExt;

use crate::error::Error;
use crate::mesh::{Attribute, RegionLayout, VertexStreams};
use crate::render::ShaderProgram;

/// GPU copy of a mesh: one vertex buffer holding every stream as a contiguous
/// region, plus a `u16` index buffer.
///
/// Regions are laid out by [`VertexStreams::region_layout`]. A draw binds only
/// the regions the program consumes, each as its own vertex buffer slot.
pub struct MeshBuffers {
    label: String,
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    layout: RegionLayout,
    index_count: u32,
    warned_missing: HashSet<Attribute>,
}

impl MeshBuffers {
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        streams: &VertexStreams<'_>,
        indices: &[u16],
    ) -> Result<Self, Error> {
        streams.validate()?;

        if indices.is_empty() {
            return Err(Error::invalid("indices", "mesh has no indices"));
        }
        let vertex_count = streams.vertex_count();
        if let Some(&bad) = indices.iter().find(|&&i| usize::from(i) >= vertex_count) {
            return Err(Error::invalid(
                "indices",
                format!("index {bad} out of range for {vertex_count} vertices"),
            ));
        }

        let layout = streams.region_layout();
        let mut contents = Vec::with_capacity(layout.total_size() as usize);
        for attr in Attribute::ALL {
            if let Some(bytes) = streams.bytes(attr) {
                contents.extend_from_slice(bytes);
            }
        }

        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: &contents,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} ibo")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "{label}: uploaded {vertex_count} vertices ({} bytes), {} indices",
            layout.total_size(),
            indices.len()
        );

        Ok(Self {
            label: label.to_owned(),
            vbo,
            ibo,
            layout,
            index_count: indices.len() as u32,
            warned_missing: HashSet::new(),
        })
    }

    #[inline]
    pub fn layout(&self) -> &RegionLayout {
        &self.layout
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Overwrites the region of `attr` in place. `bytes` must cover the whole
    /// region.
    pub fn write_region(
        &self,
        queue: &wgpu::Queue,
        attr: Attribute,
        bytes: &[u8],
    ) -> Result<(), Error> {
        let Some(region) = self.layout.region(attr) else {
            return Err(Error::invalid(
                "attribute",
                format!("{} has no {attr:?} region", self.label),
            ));
        };

        let expected = region.end - region.start;
        if bytes.len() as u64 != expected {
            return Err(Error::invalid(
                "bytes",
                format!("{attr:?} region is {expected} bytes, got {}", bytes.len()),
            ));
        }

        queue.write_buffer(&self.vbo, region.start, bytes);
        Ok(())
    }

    pub fn write_normals(&self, queue: &wgpu::Queue, normals: &[[f32; 3]]) -> Result<(), Error> {
        self.write_region(queue, Attribute::Normal, bytemuck::cast_slice(normals))
    }

    /// Issues an indexed draw with the program's attribute set.
    ///
    /// The program must already be bound on `pass`. Returns `false` (and warns
    /// once per attribute) when the mesh lacks a stream the program needs.
    pub fn draw(&mut self, pass: &mut wgpu::RenderPass<'_>, program: &ShaderProgram) -> bool {
        if let Some(&missing) = program.attributes().iter().find(|&&a| !self.layout.contains(a)) {
            if self.warned_missing.insert(missing) {
                log::warn!(
                    "{}: program `{}` needs {missing:?}, which the mesh does not have; skipping draw",
                    self.label,
                    program.label()
                );
            }
            return false;
        }

        for (slot, &attr) in program.attributes().iter().enumerate() {
            let Some(region) = self.layout.region(attr) else { continue };
            pass.set_vertex_buffer(slot as u32, self.vbo.slice(region));
        }
        pass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
        true
    }

    /// Releases the GPU buffers now instead of when the last handle drops.
    pub fn dispose(self) {
        log::debug!("{}: disposing mesh buffers", self.label);
        self.vbo.destroy();
        self.ibo.destroy();
    }
}
