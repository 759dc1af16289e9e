use crate::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T> Rect<T> {
    pub const fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl<T: std::ops::Add<Output = T> + Copy> Rect<T> {
    pub fn max(&self) -> Vec2<T> {
        self.origin + self.size
    }
}

impl Rect<usize> {
    /// A rectangle of `size` centered in `bounds`, shrunk to fit where it does not.
    ///
    /// The origin on each axis is `(bounds - size) / 2`, rounded down, and zero
    /// when `size` exceeds `bounds`.
    pub fn centered(bounds: Vec2<usize>, size: Vec2<usize>) -> Self {
        let size = size.min(bounds);
        Self::new(Vec2::new((bounds.x - size.x) / 2, (bounds.y - size.y) / 2), size)
    }

    pub fn fits_in(&self, bounds: Vec2<usize>) -> bool {
        let max = self.max();
        max.x <= bounds.x && max.y <= bounds.y
    }
}
