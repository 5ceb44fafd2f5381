//! Integer point primitive

use std::ops::{Add, Sub};

/// A location, or displacement, on a discrete 2D plane.
///
/// Arithmetic uses plain `i32` operators: overflow panics when overflow
/// checks are enabled and wraps otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct Point2D {
    x: i32,
    y: i32,
}

impl Point2D {
    /// Create a point from both coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// x coordinate
    pub fn x(&self) -> i32 {
        self.x
    }

    /// y coordinate
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Overwrite the x coordinate
    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    /// Overwrite the y coordinate
    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, other: Point2D) -> Point2D {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Add<&Point2D> for &Point2D {
    type Output = Point2D;

    fn add(self, other: &Point2D) -> Point2D {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

/// Component-wise difference `one - other`
pub fn sub(one: &Point2D, other: &Point2D) -> Point2D {
    Point2D::new(one.x() - other.x(), one.y() - other.y())
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, other: Point2D) -> Point2D {
        sub(&self, &other)
    }
}

impl Sub<&Point2D> for &Point2D {
    type Output = Point2D;

    fn sub(self, other: &Point2D) -> Point2D {
        sub(self, other)
    }
}
