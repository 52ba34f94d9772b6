//! Unions of disjoint integer ranges.
//!
//! A [`DistinctIntervalSet`] represents an arbitrary union of integer ranges
//! as a minimal, sorted list of pairwise disjoint, non-adjacent
//! [`Interval`]s. The merge routine runs on every construction, so the set is
//! always maximally coalesced: `[0,4] ∪ [5,9]` is stored as `[0,9]`, and two
//! sets denoting the same values always compare equal.

use std::fmt;

use crate::domain::Interval;

/// A minimal set of pairwise disjoint, non-adjacent intervals.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistinctIntervalSet {
    intervals: Vec<Interval>,
}

impl DistinctIntervalSet {
    /// Creates the empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Creates the set covering the full integral domain.
    #[must_use]
    pub fn full() -> Self {
        Self {
            intervals: vec![Interval::FULL],
        }
    }

    /// Creates a set holding a single interval.
    #[must_use]
    pub fn of(interval: Interval) -> Self {
        Self {
            intervals: vec![interval],
        }
    }

    /// Creates a set from arbitrary intervals, sorting and coalescing them.
    ///
    /// Overlapping or adjacent inputs are merged, so the invariant (disjoint,
    /// non-adjacent, sorted) holds regardless of the input.
    #[must_use]
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut sorted: Vec<Interval> = intervals.into_iter().collect();
        sorted.sort();

        let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
        for interval in sorted {
            match merged.last_mut() {
                Some(last) => match last.try_union(interval) {
                    Some(combined) => *last = combined,
                    None => merged.push(interval),
                },
                None => merged.push(interval),
            }
        }

        Self { intervals: merged }
    }

    /// Returns the member intervals, sorted by lower bound.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Returns `true` if the set denotes no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns `true` if `value` lies in one of the member intervals.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.intervals.iter().any(|i| i.contains(value))
    }

    /// Intersects two sets by distributing intersection pairwise.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let mut pieces = Vec::new();
        for a in &self.intervals {
            for b in &other.intervals {
                if let Some(i) = a.intersect(*b) {
                    pieces.push(i);
                }
            }
        }
        Self::from_intervals(pieces)
    }

    /// Complements the set relative to the full integral domain.
    #[must_use]
    pub fn complement(&self) -> Self {
        self.intervals
            .iter()
            .fold(Self::full(), |acc, i| acc.intersect(&i.complement()))
    }

    /// Returns `true` if every value of `other` is also in this set.
    ///
    /// Defined as `intersect(other) == other`; the canonical representation
    /// makes the comparison structural.
    #[must_use]
    pub fn fully_contains(&self, other: &Self) -> bool {
        self.intersect(other) == *other
    }

    /// Shifts every member up by one, saturating at the domain maximum.
    #[must_use]
    pub fn increment(&self) -> Self {
        Self::from_intervals(self.intervals.iter().map(|i| i.increment()))
    }

    /// Shifts every member down by one, saturating at the domain minimum.
    #[must_use]
    pub fn decrement(&self) -> Self {
        Self::from_intervals(self.intervals.iter().map(|i| i.decrement()))
    }
}

impl fmt::Debug for DistinctIntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, interval) in self.intervals.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{interval:?}")?;
        }
        write!(f, "}}")
    }
}
