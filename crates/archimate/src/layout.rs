//! Automatic placement of diagram objects in generated views.
//!
//! Each algorithm maps the index of an element within the list being laid
//! out to its [`Bounds`]. All algorithms use the same object size.

use std::{
    f64::consts::PI,
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use archimate_core::Bounds;

/// Width of a generated diagram object.
pub const OBJECT_WIDTH: f64 = 120.0;
/// Height of a generated diagram object.
pub const OBJECT_HEIGHT: f64 = 55.0;

const MARGIN: f64 = 50.0;
const COLUMN_STEP: f64 = 140.0;
const ROW_STEP: f64 = 75.0;
const CIRCLE_CENTER: f64 = 300.0;
const MIN_RADIUS: f64 = 150.0;
const RADIUS_PER_OBJECT: f64 = 20.0;

/// Placement strategy for generated views.
///
/// The names match external configuration strings (snake_case).
///
/// # Variants
///
/// - `Grid` - Rows of `ceil(sqrt(n))` columns (default)
/// - `Circular` - Evenly spaced on a circle that grows with `n`
/// - `Hierarchical` - A single column, in input order
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutAlgorithm {
    #[default]
    Grid,
    Circular,
    Hierarchical,
}

impl LayoutAlgorithm {
    /// Returns the bounds of the object at `index` out of `total`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use archimate::layout::LayoutAlgorithm;
    /// let bounds = LayoutAlgorithm::Grid.position(2, 3);
    /// assert_eq!((bounds.x, bounds.y), (50.0, 125.0));
    /// ```
    pub fn position(self, index: usize, total: usize) -> Bounds {
        let (x, y) = match self {
            LayoutAlgorithm::Grid => grid_position(index, total),
            LayoutAlgorithm::Circular => circular_position(index, total),
            LayoutAlgorithm::Hierarchical => (MARGIN, index as f64 * ROW_STEP + MARGIN),
        };
        Bounds::new(x, y, OBJECT_WIDTH, OBJECT_HEIGHT)
    }
}

fn grid_position(index: usize, total: usize) -> (f64, f64) {
    let columns = ((total as f64).sqrt().ceil() as usize).max(1);
    let row = index / columns;
    let column = index % columns;
    (
        column as f64 * COLUMN_STEP + MARGIN,
        row as f64 * ROW_STEP + MARGIN,
    )
}

fn circular_position(index: usize, total: usize) -> (f64, f64) {
    let total = total.max(1) as f64;
    let angle = 2.0 * PI * index as f64 / total;
    let radius = MIN_RADIUS.max(total * RADIUS_PER_OBJECT);
    (
        angle.cos() * radius + CIRCLE_CENTER,
        angle.sin() * radius + CIRCLE_CENTER,
    )
}

impl FromStr for LayoutAlgorithm {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Self::Grid),
            "circular" => Ok(Self::Circular),
            "hierarchical" => Ok(Self::Hierarchical),
            _ => Err("Unsupported layout algorithm"),
        }
    }
}

impl From<LayoutAlgorithm> for &'static str {
    fn from(val: LayoutAlgorithm) -> Self {
        match val {
            LayoutAlgorithm::Grid => "grid",
            LayoutAlgorithm::Circular => "circular",
            LayoutAlgorithm::Hierarchical => "hierarchical",
        }
    }
}

impl Display for LayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_grid_layout() {
        let positions: Vec<_> = (0..3)
            .map(|i| {
                let bounds = LayoutAlgorithm::Grid.position(i, 3);
                (bounds.x, bounds.y)
            })
            .collect();
        assert_eq!(positions, vec![(50.0, 50.0), (190.0, 50.0), (50.0, 125.0)]);
    }

    #[test]
    fn test_circular_layout() {
        let first = LayoutAlgorithm::Circular.position(0, 2);
        let second = LayoutAlgorithm::Circular.position(1, 2);

        assert!(approx_eq!(f64, first.x, 450.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, first.y, 300.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, second.x, 150.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, second.y, 300.0, epsilon = 1e-9));
    }

    #[test]
    fn test_circular_radius_grows() {
        let bounds = LayoutAlgorithm::Circular.position(0, 10);
        assert!(approx_eq!(f64, bounds.x, 500.0, epsilon = 1e-9));
    }

    #[test]
    fn test_hierarchical_layout() {
        let bounds = LayoutAlgorithm::Hierarchical.position(4, 5);
        assert_eq!(bounds, Bounds::new(50.0, 350.0, OBJECT_WIDTH, OBJECT_HEIGHT));
    }

    #[test]
    fn test_algorithm_names() {
        for algorithm in [
            LayoutAlgorithm::Grid,
            LayoutAlgorithm::Circular,
            LayoutAlgorithm::Hierarchical,
        ] {
            assert_eq!(algorithm.to_string().parse::<LayoutAlgorithm>(), Ok(algorithm));
        }
        assert!("spiral".parse::<LayoutAlgorithm>().is_err());
    }
}
