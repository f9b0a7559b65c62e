//! Geometric primitives for diagram children.
//!
//! Archi stores the placement of every diagram node as a `bounds` record with
//! `x`, `y`, `width` and `height`. Coordinates follow the screen convention:
//! origin at the top-left, Y increasing downward.

/// A rectangle positioned in view coordinates.
///
/// A width or height of `-1` is the Archi convention for "use the default
/// figure size" and is kept as-is.
///
/// # Examples
///
/// ```
/// # use archimate_core::geometry::Bounds;
/// let bounds = Bounds::new(50.0, 50.0, 120.0, 55.0);
/// assert_eq!(bounds.right(), 170.0);
/// assert_eq!(bounds.bottom(), 105.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Creates new bounds from position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the x-coordinate of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the y-coordinate of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns a copy moved to the given position, keeping the size.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds_are_zero() {
        let bounds = Bounds::default();
        assert_eq!(bounds, Bounds::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_with_position_keeps_size() {
        let moved = Bounds::new(1.0, 2.0, 30.0, 40.0).with_position(10.0, 20.0);
        assert_eq!(moved, Bounds::new(10.0, 20.0, 30.0, 40.0));
    }
}
