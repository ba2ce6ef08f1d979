//! Miscellaneous utility structs and functions.

use std::fmt::Debug;

use cgmath::num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An interval on the real number line.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: std::cmp::PartialOrd> Interval<T> {
    /// Returns true if this interval overlaps with the other.
    /// Intervals which only share an end point do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.max > other.min && other.max > self.min
    }

    /// Returns true if this interval contains the value.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl<T: std::ops::Sub<T, Output = T> + Copy> Interval<T> {
    /// Gets the magnitude of the interval.
    pub fn length(&self) -> T {
        self.max - self.min
    }
}

impl<T: Float> Interval<T> {
    /// Creates an interval with the given centre and radius.
    pub fn disc(centre: T, radius: T) -> Self {
        Self {
            min: centre - radius,
            max: centre + radius,
        }
    }

    /// Returns the centre/mid-point of the interval.
    pub fn midpoint(&self) -> T {
        (self.min + self.max) / (T::one() + T::one())
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}

#[cfg(test)]
mod test {
    use super::Interval;

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = Interval::new(0.0, 10.0);
        assert!(!a.overlaps(&Interval::new(10.0, 20.0)));
        assert!(!Interval::new(-5.0, 0.0).overlaps(&a));
        assert!(a.overlaps(&Interval::new(9.5, 20.0)));
        assert!(a.overlaps(&Interval::new(2.0, 3.0)));
    }

    #[test]
    fn disc_is_centred() {
        let disc = Interval::disc(50.0, 10.0);
        assert_eq!(disc, Interval::new(40.0, 60.0));
        assert_eq!(disc.midpoint(), 50.0);
        assert_eq!(disc.length(), 20.0);
    }
}
