//! Hand-written point with explicit trait impls

use std::ops::{Add, Sub};

/// A 2D point
pub struct Point2D {
    x: i32,
    y: i32,
}

/// Extent of a rectangle
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Default for Point2D {
    /// The origin
    fn default() -> Self {
        Point2D { x: 0, y: 0 }
    }
}

impl Point2D {
    /// Create a point
    pub fn new(x: i32, y: i32) -> Self {
        Point2D { x, y }
    }

    /// x coordinate
    pub fn x(&self) -> i32 {
        self.x
    }

    /// y coordinate
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Set x
    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    /// Set y
    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    fn swapped(&self) -> Point2D {
        Point2D::new(self.y, self.x)
    }
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Size { width, height }
    }
}

/// Translation
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

/// Difference that does not go through the free function
impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, other: Point2D) -> Point2D {
        let p = Point2D::new(self.x - other.x, self.y - other.y);
        p
    }
}

/// Component-wise difference
pub fn sub(one: &Point2D, other: &Point2D) -> Point2D {
    Point2D::new(one.x() - other.x(), one.y() - other.y())
}

/// Not an operator: wrong arity
pub fn mirror(p: &Point2D) -> Point2D {
    Point2D::new(-p.x(), -p.y())
}

fn private_sub(one: &Point2D, other: &Point2D) -> Point2D {
    sub(one, other)
}
