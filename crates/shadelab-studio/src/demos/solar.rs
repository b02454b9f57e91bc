use glam::{Mat4, Vec3, Vec4};

use shadelab_engine::coords::Viewport;
use shadelab_engine::core::{App, AppControl, FrameCtx};
use shadelab_engine::error::Error;
use shadelab_engine::input::Key;
use shadelab_engine::mesh::primitives::{axes, unit_square};
use shadelab_engine::paint::Color;
use shadelab_engine::render::programs::unlit_program;
use shadelab_engine::render::{MeshBuffers, RenderCtx, RenderTarget, ShaderProgram};

const BACKGROUND: Color = Color::rgb(0.2, 0.3, 0.4);

const SUN_SIZE: f32 = 0.2;
const EARTH_SIZE: f32 = 0.1;
const MOON_SIZE: f32 = 0.05;

const EARTH_ORBIT_RADIUS: f32 = 0.7;
const MOON_ORBIT_RADIUS: f32 = 0.2;

// Degrees per second.
const SUN_SPIN_SPEED: f32 = 45.0;
const EARTH_ORBIT_SPEED: f32 = 30.0;
const EARTH_SPIN_SPEED: f32 = 180.0;
const MOON_ORBIT_SPEED: f32 = 360.0;
const MOON_SPIN_SPEED: f32 = 180.0;

/// One drawable body: a unit square placed by `model`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Body {
    pub model: Mat4,
    pub color: Color,
}

/// Animation state of the sun, earth and moon. Angles in radians.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SolarSystem {
    pub sun_spin: f32,
    pub earth_orbit: f32,
    pub earth_spin: f32,
    pub moon_orbit: f32,
    pub moon_spin: f32,
}

impl SolarSystem {
    pub fn advance(&mut self, dt: f32) {
        self.sun_spin += SUN_SPIN_SPEED.to_radians() * dt;
        self.earth_orbit += EARTH_ORBIT_SPEED.to_radians() * dt;
        self.earth_spin += EARTH_SPIN_SPEED.to_radians() * dt;
        self.moon_orbit += MOON_ORBIT_SPEED.to_radians() * dt;
        self.moon_spin += MOON_SPIN_SPEED.to_radians() * dt;
    }

    /// Sun, earth and moon, in draw order.
    ///
    /// Orbits compose: the moon's anchor is built on top of the earth's
    /// position, so it follows the earth without knowing the earth's orbit.
    pub fn bodies(&self) -> [Body; 3] {
        let earth_anchor =
            Mat4::from_rotation_z(self.earth_orbit) * Mat4::from_translation(Vec3::X * EARTH_ORBIT_RADIUS);
        let earth_pos = earth_anchor.transform_point3(Vec3::ZERO);

        let moon_anchor = Mat4::from_translation(earth_pos)
            * Mat4::from_rotation_z(self.moon_orbit)
            * Mat4::from_translation(Vec3::X * MOON_ORBIT_RADIUS);
        let moon_pos = moon_anchor.transform_point3(Vec3::ZERO);

        [
            Body { model: place(Vec3::ZERO, self.sun_spin, SUN_SIZE), color: Color::RED },
            Body { model: place(earth_pos, self.earth_spin, EARTH_SIZE), color: Color::CYAN },
            Body { model: place(moon_pos, self.moon_spin, MOON_SIZE), color: Color::YELLOW },
        ]
    }
}

/// Translate, then spin about +Z, then scale in XY.
fn place(position: Vec3, spin: f32, size: f32) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_rotation_z(spin)
        * Mat4::from_scale(Vec3::new(size, size, 1.0))
}

/// Orthographic projection that keeps `[-1, 1]` visible on the short axis.
pub fn aspect_projection(viewport: Viewport) -> Mat4 {
    let aspect = viewport.aspect();
    if aspect >= 1.0 {
        Mat4::orthographic_rh(-aspect, aspect, -1.0, 1.0, -1.0, 1.0)
    } else {
        Mat4::orthographic_rh(-1.0, 1.0, -1.0 / aspect, 1.0 / aspect, -1.0, 1.0)
    }
}

struct SolarGpu {
    bodies_program: ShaderProgram,
    axes_program: ShaderProgram,
    square: MeshBuffers,
    axes: MeshBuffers,
}

impl SolarGpu {
    fn new(rctx: &RenderCtx<'_>) -> Result<Self, Error> {
        let square = unit_square().with_uniform_color(Color::WHITE);
        let axes_mesh = axes(1.0);

        Ok(Self {
            bodies_program: unlit_program(rctx, "solar bodies", wgpu::PrimitiveTopology::TriangleList),
            axes_program: unlit_program(rctx, "solar axes", wgpu::PrimitiveTopology::LineList),
            square: MeshBuffers::new(rctx.device, "square", &square.streams(), &square.indices)?,
            axes: MeshBuffers::new(rctx.device, "axes", &axes_mesh.streams(), &axes_mesh.indices)?,
        })
    }

    fn draw(&mut self, rctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, bodies: &[Body]) {
        let projection = aspect_projection(rctx.viewport);
        let mut pass = target.begin_pass("solar");

        self.axes_program.set_mat4("model", Mat4::IDENTITY);
        self.axes_program.set_mat4("projection", projection);
        self.axes_program.set_vec4("color", Vec4::ONE);
        self.axes_program.bind(rctx, &mut pass);
        self.axes.draw(&mut pass, &self.axes_program);

        for body in bodies {
            self.bodies_program.set_mat4("model", body.model);
            self.bodies_program.set_mat4("projection", projection);
            self.bodies_program.set_vec4("color", body.color.to_vec4());
            self.bodies_program.bind(rctx, &mut pass);
            self.square.draw(&mut pass, &self.bodies_program);
        }
    }
}

/// Sun, earth and moon squares turning over a pair of axes.
#[derive(Default)]
pub struct SolarDemo {
    system: SolarSystem,
    gpu: Option<SolarGpu>,
}

impl SolarDemo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl App for SolarDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }

        self.system.advance(ctx.time.dt);
        let bodies = self.system.bodies();

        let slot = &mut self.gpu;
        let mut failure = None;
        let control = ctx.render(BACKGROUND, |rctx, target| {
            let gpu = match slot.take() {
                Some(gpu) => gpu,
                None => match SolarGpu::new(rctx) {
                    Ok(gpu) => gpu,
                    Err(err) => {
                        failure = Some(err);
                        return;
                    }
                },
            };
            slot.insert(gpu).draw(rctx, target, &bodies);
        });

        if let Some(err) = failure {
            log::error!("solar demo: {err}");
            return AppControl::Exit;
        }
        control
    }
}
