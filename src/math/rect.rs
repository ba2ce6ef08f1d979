use super::Point2d;
use crate::util::Interval;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in map coordinates.
///
/// The `y` axis points down the map, so `top` is the smaller `y` value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// The horizontal extents.
    pub x: Interval<f64>,
    /// The vertical extents.
    pub y: Interval<f64>,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            x: Interval::new(left, left + width),
            y: Interval::new(top, top + height),
        }
    }

    /// Creates the square of the given half-width centred on a point.
    pub fn square(centre: Point2d, half_width: f64) -> Self {
        Self {
            x: Interval::disc(centre.x, half_width),
            y: Interval::disc(centre.y, half_width),
        }
    }

    /// Returns true if the two rectangles overlap.
    /// Rectangles which only share an edge or corner do not overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x.overlaps(&other.x) && self.y.overlaps(&other.y)
    }

    /// Returns true if the point lies inside or on the boundary of the rectangle.
    pub fn contains(&self, point: Point2d) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y)
    }

    /// The centre of the rectangle.
    pub fn centre(&self) -> Point2d {
        Point2d::new(self.x.midpoint(), self.y.midpoint())
    }

    pub fn width(&self) -> f64 {
        self.x.length()
    }

    pub fn height(&self) -> f64 {
        self.y.length()
    }
}
