/// Drawable size in physical pixels.
///
/// Scissor rects and projection aspect ratios are derived from this value.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width over height. A zero-height viewport reports `1.0`.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_wide_viewport() {
        assert_eq!(Viewport::new(1600, 800).aspect(), 2.0);
    }

    #[test]
    fn aspect_of_degenerate_viewport_is_one() {
        assert_eq!(Viewport::new(640, 0).aspect(), 1.0);
        assert!(!Viewport::new(640, 0).is_valid());
    }
}
