use super::Viewport;

/// Axis-aligned rectangle in physical pixels (top-left origin, +Y down).
///
/// This is the coordinate space of `wgpu::RenderPass::set_scissor_rect`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// The rect covering the whole viewport.
    #[inline]
    pub const fn full(viewport: Viewport) -> Self {
        Self::new(0, 0, viewport.width, viewport.height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn right(self) -> u32 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub fn bottom(self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// Clips the rect to the viewport.
    ///
    /// Returns `None` when nothing remains; wgpu rejects zero-area scissor
    /// rects, so callers skip the draw in that case.
    pub fn clamp_to(self, viewport: Viewport) -> Option<PixelRect> {
        let x0 = self.x.min(viewport.width);
        let y0 = self.y.min(viewport.height);
        let x1 = self.right().min(viewport.width);
        let y1 = self.bottom().min(viewport.height);

        let clipped = PixelRect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0));
        if clipped.is_empty() { None } else { Some(clipped) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: u32, y: u32, w: u32, h: u32) -> PixelRect { PixelRect::new(x, y, w, h) }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(10, 10, 5, 5).contains(10, 10));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(10, 10, 5, 5).contains(15, 15));
        assert!(r(10, 10, 5, 5).contains(14, 14));
    }

    // ── clamp_to ──────────────────────────────────────────────────────────

    #[test]
    fn clamp_inside_is_identity() {
        let vp = Viewport::new(100, 100);
        assert_eq!(r(10, 20, 30, 40).clamp_to(vp), Some(r(10, 20, 30, 40)));
    }

    #[test]
    fn clamp_overhanging_edge() {
        let vp = Viewport::new(100, 50);
        assert_eq!(r(80, 40, 50, 50).clamp_to(vp), Some(r(80, 40, 20, 10)));
    }

    #[test]
    fn clamp_outside_returns_none() {
        let vp = Viewport::new(100, 100);
        assert_eq!(r(100, 0, 10, 10).clamp_to(vp), None);
    }

    #[test]
    fn clamp_zero_area_returns_none() {
        let vp = Viewport::new(100, 100);
        assert_eq!(r(0, 0, 0, 10).clamp_to(vp), None);
    }

    #[test]
    fn full_covers_viewport() {
        let vp = Viewport::new(640, 480);
        assert_eq!(PixelRect::full(vp), r(0, 0, 640, 480));
    }
}
