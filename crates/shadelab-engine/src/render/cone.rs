use crate::error::Error;
use crate::mesh::ConeMesh;
use crate::render::{MeshBuffers, ShaderProgram};
use crate::shading::ShadingMode;

/// A [`ConeMesh`] together with its GPU buffers.
///
/// Switching shading only rewrites the normal region of the vertex buffer.
/// Positions, colors and indices are uploaded once.
pub struct GpuCone {
    mesh: ConeMesh,
    buffers: MeshBuffers,
}

impl GpuCone {
    pub fn new(device: &wgpu::Device, mesh: ConeMesh) -> Result<Self, Error> {
        let label = format!("cone[{}]", mesh.segments());
        let buffers = MeshBuffers::new(device, &label, &mesh.streams(), mesh.indices())?;
        Ok(Self { mesh, buffers })
    }

    #[inline]
    pub fn mesh(&self) -> &ConeMesh {
        &self.mesh
    }

    #[inline]
    pub fn shading(&self) -> ShadingMode {
        self.mesh.shading()
    }

    pub fn use_face_normals(&mut self, queue: &wgpu::Queue) -> Result<(), Error> {
        self.set_shading(queue, ShadingMode::Flat)
    }

    pub fn use_vertex_normals(&mut self, queue: &wgpu::Queue) -> Result<(), Error> {
        self.set_shading(queue, ShadingMode::Smooth)
    }

    /// Selects a normal set and pushes it to the GPU.
    pub fn set_shading(&mut self, queue: &wgpu::Queue, mode: ShadingMode) -> Result<(), Error> {
        self.mesh.set_shading(mode);
        self.upload_normals(queue)
    }

    /// Writes the active normals if they changed since the last upload.
    pub fn upload_normals(&mut self, queue: &wgpu::Queue) -> Result<(), Error> {
        if !self.mesh.normals_dirty() {
            return Ok(());
        }
        self.buffers.write_normals(queue, self.mesh.active_normals())?;
        self.mesh.mark_normals_uploaded();
        log::debug!("cone normals now {}", self.mesh.shading());
        Ok(())
    }

    /// Draws with `program`, which must already be bound on `pass`.
    pub fn draw(&mut self, pass: &mut wgpu::RenderPass<'_>, program: &ShaderProgram) -> bool {
        self.buffers.draw(pass, program)
    }

    pub fn dispose(self) {
        self.buffers.dispose();
    }
}
