/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Build a point from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle, `min` inclusive and `max` exclusive.
///
/// `min <= max` holds componentwise for every value of this type. A rectangle whose
/// `min` equals its `max` on either axis is empty but valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    min: Point,
    max: Point,
}

impl Rect {
    /// Build a rectangle from its corners. A `max` below `min` collapses onto `min`.
    pub fn new(min: Point, max: Point) -> Self {
        Self {
            min,
            max: Point::new(max.x.max(min.x), max.y.max(min.y)),
        }
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(width: u32, height: u32) -> Self {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        Self::new(Point::new(0, 0), Point::new(w, h))
    }

    /// Inclusive top-left corner.
    pub fn min(self) -> Point {
        self.min
    }

    /// Exclusive bottom-right corner.
    pub fn max(self) -> Point {
        self.max
    }

    /// Number of columns.
    pub fn width(self) -> u32 {
        self.max.x.abs_diff(self.min.x)
    }

    /// Number of rows.
    pub fn height(self) -> u32 {
        self.max.y.abs_diff(self.min.y)
    }

    /// `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// `true` when `(x, y)` lies inside the rectangle.
    pub fn contains(self, x: i32, y: i32) -> bool {
        self.min.x <= x && x < self.max.x && self.min.y <= y && y < self.max.y
    }

    /// All points of the rectangle in row-major order.
    pub fn points(self) -> impl Iterator<Item = Point> {
        (self.min.y..self.max.y)
            .flat_map(move |y| (self.min.x..self.max.x).map(move |x| Point::new(x, y)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geom.rs"]
mod tests;
