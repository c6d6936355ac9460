use super::Vec2;

/// Axis-aligned rectangle in layout pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn translate(self, by: Vec2) -> Rect {
        Rect { origin: self.origin + by, size: self.size }
    }

    /// Smallest rectangle covering both. Zero-size rects still contribute
    /// their origin, so whitespace glyphs extend the bounds horizontally.
    pub fn union(self, other: Rect) -> Rect {
        let min_x = self.min().x.min(other.min().x);
        let min_y = self.min().y.min(other.min().y);
        let max_x = self.max().x.max(other.max().x);
        let max_y = self.max().y.max(other.max().y);
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}
