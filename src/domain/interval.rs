//! Closed integer intervals.
//!
//! An [`Interval`] is a closed range `[min, max]` over `i64`, the engine's
//! integral domain. All operations are pure value operations; the only
//! "failure" is an empty result, expressed as `Option` or as an empty
//! [`DistinctIntervalSet`].

use std::fmt;

use crate::domain::DistinctIntervalSet;

/// A closed integer range `[min, max]` with `min <= max`.
///
/// The constructor normalizes swapped bounds, so the invariant always holds
/// and an `Interval` is never empty.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    min: i64,
    max: i64,
}

impl Interval {
    /// The full integral domain.
    pub const FULL: Self = Self {
        min: i64::MIN,
        max: i64::MAX,
    };

    /// Creates an interval from two bounds, swapping them if given reversed.
    #[must_use]
    pub const fn new(a: i64, b: i64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Creates a single-value interval `[value, value]`.
    #[must_use]
    pub const fn point(value: i64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(self) -> i64 {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(self) -> i64 {
        self.max
    }

    /// Returns `true` if `value` lies within the interval.
    #[must_use]
    pub const fn contains(self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Returns `true` if the two intervals share at least one value.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Intersects two intervals.
    ///
    /// # Returns
    ///
    /// The overlapping range, or `None` when the intervals are disjoint.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        if self.intersects(other) {
            Some(Self {
                min: self.min.max(other.min),
                max: self.max.min(other.max),
            })
        } else {
            None
        }
    }

    /// Unions two intervals when the result is still a single interval.
    ///
    /// # Returns
    ///
    /// The combined range when the intervals overlap or are exactly adjacent
    /// (`a.max + 1 == b.min`), otherwise `None`.
    #[must_use]
    pub fn try_union(self, other: Self) -> Option<Self> {
        if self.intersects(other) || self.is_adjacent_to(other) {
            Some(Self {
                min: self.min.min(other.min),
                max: self.max.max(other.max),
            })
        } else {
            None
        }
    }

    /// Returns `true` if the intervals touch without overlapping.
    #[must_use]
    pub fn is_adjacent_to(self, other: Self) -> bool {
        self.max.checked_add(1) == Some(other.min) || other.max.checked_add(1) == Some(self.min)
    }

    /// Complements the interval relative to the full integral domain.
    ///
    /// # Returns
    ///
    /// Zero, one, or two intervals: the values below `min` and the values
    /// above `max`, whichever exist.
    #[must_use]
    pub fn complement(self) -> DistinctIntervalSet {
        let mut pieces = Vec::with_capacity(2);
        if self.min > i64::MIN {
            pieces.push(Self::new(i64::MIN, self.min - 1));
        }
        if self.max < i64::MAX {
            pieces.push(Self::new(self.max + 1, i64::MAX));
        }
        DistinctIntervalSet::from_intervals(pieces)
    }

    /// Shifts both bounds up by one, saturating at the domain maximum.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self {
            min: self.min.saturating_add(1),
            max: self.max.saturating_add(1),
        }
    }

    /// Shifts both bounds down by one, saturating at the domain minimum.
    #[must_use]
    pub const fn decrement(self) -> Self {
        Self {
            min: self.min.saturating_sub(1),
            max: self.max.saturating_sub(1),
        }
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swapped_bounds_normalized() {
        let i = Interval::new(10, 3);
        assert_eq!(i.min(), 3);
        assert_eq!(i.max(), 10);
    }

    #[test]
    fn test_intersect() {
        let a = Interval::new(0, 10);
        let b = Interval::new(5, 20);
        assert_eq!(a.intersect(b), Some(Interval::new(5, 10)));

        let c = Interval::new(11, 20);
        assert!(!a.intersects(c));
        assert_eq!(a.intersect(c), None);
    }

    #[test]
    fn test_try_union_overlapping() {
        let a = Interval::new(0, 10);
        let b = Interval::new(5, 20);
        assert_eq!(a.try_union(b), Some(Interval::new(0, 20)));
    }

    #[test]
    fn test_try_union_adjacent() {
        let a = Interval::new(0, 4);
        let b = Interval::new(5, 9);
        assert_eq!(a.try_union(b), Some(Interval::new(0, 9)));
        assert_eq!(b.try_union(a), Some(Interval::new(0, 9)));
    }

    #[test]
    fn test_try_union_disjoint() {
        let a = Interval::new(0, 3);
        let b = Interval::new(5, 9);
        assert_eq!(a.try_union(b), None);
    }

    #[test]
    fn test_complement_interior() {
        let pieces = Interval::new(0, 5).complement();
        assert_eq!(
            pieces.intervals(),
            &[
                Interval::new(i64::MIN, -1),
                Interval::new(6, i64::MAX),
            ]
        );
    }

    #[test]
    fn test_complement_at_domain_edges() {
        assert!(Interval::FULL.complement().is_empty());

        let low = Interval::new(i64::MIN, 0).complement();
        assert_eq!(low.intervals(), &[Interval::new(1, i64::MAX)]);
    }

    #[test]
    fn test_increment_saturates() {
        let i = Interval::new(i64::MAX - 1, i64::MAX).increment();
        assert_eq!(i, Interval::new(i64::MAX, i64::MAX));

        let j = Interval::new(i64::MIN, i64::MIN + 1).decrement();
        assert_eq!(j, Interval::new(i64::MIN, i64::MIN));
    }

    #[test]
    fn test_adjacency_no_overflow() {
        let a = Interval::new(0, i64::MAX);
        let b = Interval::new(-5, -1);
        assert!(b.is_adjacent_to(a));
        assert!(a.is_adjacent_to(b));
        assert!(!a.is_adjacent_to(Interval::new(-10, -7)));
    }
}
