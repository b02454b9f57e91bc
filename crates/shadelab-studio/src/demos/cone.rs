use glam::{Mat4, Vec3};

use shadelab_engine::camera::Camera;
use shadelab_engine::core::{App, AppControl, FrameCtx};
use shadelab_engine::error::Error;
use shadelab_engine::input::{InputEvent, Key, KeyState};
use shadelab_engine::mesh::primitives::unit_cube;
use shadelab_engine::mesh::ConeMesh;
use shadelab_engine::paint::Color;
use shadelab_engine::render::programs::{lamp_program, lit_program};
use shadelab_engine::render::{GpuCone, MeshBuffers, RenderCtx, RenderTarget, ShaderProgram};
use shadelab_engine::shading::{LightingModel, ShadingMode};

const CLEAR: Color = Color::rgb(0.1, 0.1, 0.1);

const LIGHT_POSITION: Vec3 = Vec3::new(1.0, 0.7, 1.0);
const LIGHT_AMBIENT: Vec3 = Vec3::splat(0.2);
const LIGHT_DIFFUSE: Vec3 = Vec3::splat(0.7);
const LIGHT_SPECULAR: Vec3 = Vec3::splat(1.0);
const LAMP_SCALE: f32 = 0.1;

const MATERIAL_DIFFUSE: Vec3 = Vec3::new(1.0, 0.5, 0.31);
const MATERIAL_SPECULAR: Vec3 = Vec3::splat(0.5);
const MATERIAL_SHININESS: f32 = 16.0;

/// Turntable speed in degrees per second.
const SPIN_SPEED: f32 = 45.0;

/// Interaction state of the cone demo, independent of the GPU.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ConeDemoState {
    pub shading: ShadingMode,
    pub lighting: LightingModel,
    pub spinning: bool,
    /// Turntable angle about +Y, radians.
    pub angle: f32,
}

impl ConeDemoState {
    /// Applies one key press.
    pub fn handle_key(&mut self, key: Key) -> AppControl {
        match key {
            Key::Char('s') => self.shading = ShadingMode::Smooth,
            Key::Char('f') => self.shading = ShadingMode::Flat,
            Key::Char('g') => self.lighting = LightingModel::Gouraud,
            Key::Char('p') => self.lighting = LightingModel::Phong,
            Key::Char('r') => self.angle = 0.0,
            Key::Space => self.spinning = !self.spinning,
            Key::Escape => return AppControl::Exit,
            _ => {}
        }
        AppControl::Continue
    }

    pub fn advance(&mut self, dt: f32) {
        if self.spinning {
            self.angle = (self.angle + SPIN_SPEED.to_radians() * dt) % std::f32::consts::TAU;
        }
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.angle)
    }

    pub fn title(&self) -> String {
        format!("shading mode: {} ({})", self.shading, self.lighting)
    }
}

/// Inverse-transpose of the model's upper 3x3, as a `Mat4` for the shaders.
pub fn normal_matrix(model: Mat4) -> Mat4 {
    Mat4::from_mat3(glam::Mat3::from_mat4(model).inverse().transpose())
}

struct ConeGpu {
    cone: GpuCone,
    /// Indexed by `LightingModel::index`.
    lit: [ShaderProgram; 2],
    lamp_program: ShaderProgram,
    lamp: MeshBuffers,
}

impl ConeGpu {
    fn new(rctx: &RenderCtx<'_>, mesh: ConeMesh) -> Result<Self, Error> {
        let cube = unit_cube();
        Ok(Self {
            cone: GpuCone::new(rctx.device, mesh)?,
            lit: LightingModel::ALL.map(|model| lit_program(rctx, model)),
            lamp_program: lamp_program(rctx),
            lamp: MeshBuffers::new(rctx.device, "lamp", &cube.streams(), &cube.indices)?,
        })
    }

    fn draw(
        &mut self,
        rctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &Camera,
        state: &ConeDemoState,
    ) -> Result<(), Error> {
        if self.cone.shading() != state.shading {
            self.cone.set_shading(rctx.queue, state.shading)?;
        }

        let view = camera.view();
        let projection = camera.projection(rctx.viewport.aspect());
        let model = state.model();

        let program = &mut self.lit[state.lighting.index()];
        program.set_mat4("model", model);
        program.set_mat4("view", view);
        program.set_mat4("projection", projection);
        program.set_mat4("normal_matrix", normal_matrix(model));
        program.set_vec3("view_pos", camera.position);
        program.set_float("shininess", MATERIAL_SHININESS);
        program.set_vec3("light_position", LIGHT_POSITION);
        program.set_vec3("light_ambient", LIGHT_AMBIENT);
        program.set_vec3("light_diffuse", LIGHT_DIFFUSE);
        program.set_vec3("light_specular", LIGHT_SPECULAR);
        program.set_vec3("material_diffuse", MATERIAL_DIFFUSE);
        program.set_vec3("material_specular", MATERIAL_SPECULAR);

        let lamp_model = Mat4::from_translation(LIGHT_POSITION) * Mat4::from_scale(Vec3::splat(LAMP_SCALE));
        self.lamp_program.set_mat4("model", lamp_model);
        self.lamp_program.set_mat4("view", view);
        self.lamp_program.set_mat4("projection", projection);

        let mut pass = target.begin_pass("cone");
        program.bind(rctx, &mut pass);
        self.cone.draw(&mut pass, program);
        self.lamp_program.bind(rctx, &mut pass);
        self.lamp.draw(&mut pass, &self.lamp_program);
        Ok(())
    }
}

/// A lit cone next to its light, switchable between flat/smooth normals and
/// Phong/Gouraud lighting.
pub struct ConeDemo {
    state: ConeDemoState,
    camera: Camera,
    /// CPU mesh waiting for the first frame's device.
    pending: Option<ConeMesh>,
    gpu: Option<ConeGpu>,
    title: String,
}

impl ConeDemo {
    pub fn new(segments: u32) -> Result<Self, Error> {
        let mesh = ConeMesh::new(segments)?;
        log::info!("cone demo: {segments} segments; keys s/f shading, g/p lighting, space spin, r reset");
        Ok(Self {
            state: ConeDemoState::default(),
            camera: Camera::default(),
            pending: Some(mesh),
            gpu: None,
            title: String::new(),
        })
    }

    fn apply_input(&mut self, events: &[InputEvent]) -> AppControl {
        for event in events {
            if let InputEvent::Key { key, state: KeyState::Pressed, repeat: false } = event
                && self.state.handle_key(*key) == AppControl::Exit
            {
                return AppControl::Exit;
            }
        }
        AppControl::Continue
    }
}

impl App for ConeDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.apply_input(&ctx.input_frame.events) == AppControl::Exit {
            return AppControl::Exit;
        }
        self.state.advance(ctx.time.dt);

        let title = self.state.title();
        if title != self.title {
            log::info!("{title}");
            ctx.window.set_title(&title);
            self.title = title;
        }

        let (slot, pending) = (&mut self.gpu, &mut self.pending);
        let (camera, state) = (&self.camera, &self.state);
        let mut failure = None;

        let control = ctx.render(CLEAR, |rctx, target| {
            let gpu = match (slot.take(), pending.take()) {
                (Some(gpu), _) => gpu,
                (None, Some(mesh)) => match ConeGpu::new(rctx, mesh) {
                    Ok(gpu) => gpu,
                    Err(err) => {
                        failure = Some(err);
                        return;
                    }
                },
                (None, None) => return,
            };
            if let Err(err) = slot.insert(gpu).draw(rctx, target, camera, state) {
                failure = Some(err);
            }
        });

        if let Some(err) = failure {
            log::error!("cone demo: {err}");
            return AppControl::Exit;
        }
        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_flat_phong_still() {
        let state = ConeDemoState::default();
        assert_eq!(state.shading, ShadingMode::Flat);
        assert_eq!(state.lighting, LightingModel::Phong);
        assert!(!state.spinning);
        assert_eq!(state.title(), "shading mode: FLAT (PHONG)");
    }

    #[test]
    fn keys_select_modes() {
        let mut state = ConeDemoState::default();
        state.handle_key(Key::Char('s'));
        state.handle_key(Key::Char('g'));
        assert_eq!(state.title(), "shading mode: SMOOTH (GOURAUD)");

        state.handle_key(Key::Char('f'));
        state.handle_key(Key::Char('p'));
        assert_eq!((state.shading, state.lighting), (ShadingMode::Flat, LightingModel::Phong));
    }

    #[test]
    fn repeated_selection_is_stable() {
        let mut state = ConeDemoState::default();
        state.handle_key(Key::Char('s'));
        state.handle_key(Key::Char('s'));
        assert_eq!(state.shading, ShadingMode::Smooth);
    }

    #[test]
    fn escape_exits_and_unknown_keys_do_nothing() {
        let mut state = ConeDemoState::default();
        assert_eq!(state.handle_key(Key::Escape), AppControl::Exit);
        assert_eq!(state.handle_key(Key::Char('x')), AppControl::Continue);
        assert_eq!(state, ConeDemoState::default());
    }

    #[test]
    fn spin_advances_only_when_enabled() {
        let mut state = ConeDemoState::default();
        state.advance(1.0);
        assert_eq!(state.angle, 0.0);

        state.handle_key(Key::Space);
        state.advance(2.0);
        assert!((state.angle - 90f32.to_radians()).abs() < 1e-5);

        state.handle_key(Key::Char('r'));
        assert_eq!(state.angle, 0.0);
        assert!(state.spinning);
    }

    #[test]
    fn normal_matrix_of_rotation_is_the_rotation() {
        let model = Mat4::from_rotation_y(0.7);
        let n = normal_matrix(model);
        let v = Vec3::new(0.3, -0.2, 0.9);
        assert!((n.transform_vector3(v) - model.transform_vector3(v)).length() < 1e-5);
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let n = normal_matrix(model).transform_vector3(Vec3::new(1.0, 1.0, 0.0));
        assert!((n - Vec3::new(0.5, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn lit_programs_are_indexed_by_lighting_model() {
        assert_eq!(LightingModel::Phong.index(), 0);
        assert_eq!(LightingModel::Gouraud.index(), 1);
    }

    #[test]
    fn demo_rejects_bad_segment_count() {
        assert!(ConeDemo::new(2).is_err());
        assert!(ConeDemo::new(3).is_ok());
    }
}
