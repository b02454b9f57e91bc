use shadelab_engine::coords::{PixelRect, Viewport};
use shadelab_engine::core::{App, AppControl, FrameCtx};
use shadelab_engine::input::Key;
use shadelab_engine::paint::Color;
use shadelab_engine::render::FillRenderer;

/// Fills the four quadrants of the window, re-split every frame.
#[derive(Default)]
pub struct QuadrantsDemo {
    fills: FillRenderer,
}

impl QuadrantsDemo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl App for QuadrantsDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }

        let fills = &mut self.fills;
        ctx.render(Color::BLACK, |rctx, target| {
            let mut pass = target.begin_pass("quadrants");
            for (rect, color) in quadrant_fills(rctx.viewport) {
                fills.fill(rctx, &mut pass, rect, color);
            }
        })
    }
}

/// Quadrant rects (top-left origin) and their colors.
///
/// Odd sizes give the extra pixel to the right and bottom halves.
pub fn quadrant_fills(viewport: Viewport) -> [(PixelRect, Color); 4] {
    let left = viewport.width / 2;
    let top = viewport.height / 2;
    let right = viewport.width - left;
    let bottom = viewport.height - top;

    [
        (PixelRect::new(0, 0, left, top), Color::RED),
        (PixelRect::new(left, 0, right, top), Color::GREEN),
        (PixelRect::new(0, top, left, bottom), Color::BLUE),
        (PixelRect::new(left, top, right, bottom), Color::YELLOW),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(rect: PixelRect) -> u64 {
        u64::from(rect.width) * u64::from(rect.height)
    }

    #[test]
    fn even_split() {
        let fills = quadrant_fills(Viewport::new(800, 600));
        assert_eq!(fills[0], (PixelRect::new(0, 0, 400, 300), Color::RED));
        assert_eq!(fills[1], (PixelRect::new(400, 0, 400, 300), Color::GREEN));
        assert_eq!(fills[2], (PixelRect::new(0, 300, 400, 300), Color::BLUE));
        assert_eq!(fills[3], (PixelRect::new(400, 300, 400, 300), Color::YELLOW));
    }

    #[test]
    fn odd_sizes_tile_exactly() {
        let vp = Viewport::new(801, 599);
        let fills = quadrant_fills(vp);

        let total: u64 = fills.iter().map(|&(r, _)| area(r)).sum();
        assert_eq!(total, 801 * 599);
        assert_eq!(fills[3].0.width, 401);
        assert_eq!(fills[3].0.height, 300);
        assert_eq!(fills[3].0.right(), 801);
        assert_eq!(fills[3].0.bottom(), 599);
    }

    #[test]
    fn one_pixel_window_keeps_only_bottom_right() {
        let fills = quadrant_fills(Viewport::new(1, 1));
        assert!(fills[0].0.is_empty());
        assert!(fills[1].0.is_empty());
        assert!(fills[2].0.is_empty());
        assert_eq!(fills[3].0, PixelRect::new(0, 0, 1, 1));
    }
}
