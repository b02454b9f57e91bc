use crate::coords::PixelRect;
use crate::paint::Color;
use crate::render::program::ShaderProgram;
use crate::render::programs::fill_program;
use crate::render::RenderCtx;

/// Solid rectangle fills in physical pixels.
///
/// Each fill is a fullscreen triangle clipped by a scissor rect. Rects are
/// clamped to the viewport; a rect with no area left draws nothing.
#[derive(Default)]
pub struct FillRenderer {
    program_format: Option<wgpu::TextureFormat>,
    program: Option<ShaderProgram>,
}

impl FillRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills `rect` with `color`. Returns whether anything was drawn.
    pub fn fill(
        &mut self,
        ctx: &RenderCtx<'_>,
        pass: &mut wgpu::RenderPass<'_>,
        rect: PixelRect,
        color: Color,
    ) -> bool {
        let Some(scissor) = rect.clamp_to(ctx.viewport) else { return false };

        self.ensure_program(ctx);
        let Some(program) = self.program.as_mut() else { return false };

        program.set_vec4("color", color.to_vec4());
        program.bind(ctx, pass);
        pass.set_scissor_rect(scissor.x, scissor.y, scissor.width, scissor.height);
        pass.draw(0..3, 0..1);

        // Later draws in the same pass expect the full viewport.
        pass.set_scissor_rect(0, 0, ctx.viewport.width, ctx.viewport.height);
        true
    }

    fn ensure_program(&mut self, ctx: &RenderCtx<'_>) {
        if self.program_format == Some(ctx.surface_format) && self.program.is_some() {
            return;
        }
        self.program = Some(fill_program(ctx));
        self.program_format = Some(ctx.surface_format);
    }
}
