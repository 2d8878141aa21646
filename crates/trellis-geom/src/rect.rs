use super::Point;

/// A rectangle with a signed origin and unsigned size, in cell coordinates.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// Construct a zero-sized rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Does this rect have a zero size?
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.tl.x + self.w as i32
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.tl.y + self.h as i32
    }

    /// Does the rectangle contain the point?
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.tl.x && p.x < self.right() && p.y >= self.tl.y && p.y < self.bottom()
    }

    /// Return this rectangle moved to a new origin.
    pub fn at(&self, tl: Point) -> Self {
        Self { tl, ..*self }
    }

    /// Return this rectangle shifted by a signed delta.
    pub fn shift(&self, delta: Point) -> Self {
        Self {
            tl: self.tl + delta,
            ..*self
        }
    }
}

impl From<(i32, i32, u32, u32)> for Rect {
    #[inline]
    fn from(v: (i32, i32, u32, u32)) -> Self {
        Self::new(v.0, v.1, v.2, v.3)
    }
}
