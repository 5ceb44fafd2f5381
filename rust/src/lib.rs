pub mod inspector;
pub mod point;

// Re-export the point type and its free operator
pub use point::{sub, Point2D};
