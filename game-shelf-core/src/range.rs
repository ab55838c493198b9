use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bound::Bound;

/// An immutable player-count interval with optionally unbounded ends and a
/// "must be a multiple of N" constraint.
///
/// Construction rounds the low end up and the high end down to the nearest
/// multiple of `multiple_of`, so every value the range admits is reachable.
/// A range whose rounded low exceeds its rounded high is empty; emptiness is
/// an observable state (it renders as `"none"`), not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    low: Bound,
    high: Bound,
    multiple_of: u32,
}

impl Range {
    /// Create a range admitting every count between `low` and `high` inclusive.
    pub fn new(low: impl Into<Bound>, high: impl Into<Bound>) -> Self {
        Self::with_multiple_of(low, high, 1)
    }

    /// Create a range whose members must also be a multiple of `multiple_of`.
    ///
    /// Panics if `multiple_of` is zero; a zero step is a caller bug, not a
    /// recoverable condition.
    pub fn with_multiple_of(low: impl Into<Bound>, high: impl Into<Bound>, multiple_of: u32) -> Self {
        assert!(multiple_of > 0, "multiple_of must be positive");
        let low = low.into();
        let high = high.into();
        debug_assert!(low != Bound::Greatest, "low bound cannot be Greatest");
        debug_assert!(high != Bound::Least, "high bound cannot be Least");
        Self {
            low: low.round_up_to_multiple(multiple_of),
            high: high.round_down_to_multiple(multiple_of),
            multiple_of,
        }
    }

    pub fn low(&self) -> Bound {
        self.low
    }

    pub fn high(&self) -> Bound {
        self.high
    }

    pub fn multiple_of(&self) -> u32 {
        self.multiple_of
    }

    /// True if no count satisfies the range.
    pub fn is_empty(&self) -> bool {
        self.low > self.high
    }

    /// True if `count` lies between both ends and satisfies the multiple-of
    /// constraint.
    pub fn contains(&self, count: u32) -> bool {
        self.low <= Bound::Finite(count)
            && Bound::Finite(count) <= self.high
            && count % self.multiple_of == 0
    }

    /// Narrow this range against implicit contextual bounds.
    ///
    /// The implicit bounds are rounded to this range's `multiple_of` and
    /// intersected with it. A degenerate intersection (empty or a single
    /// count) is returned as-is. Otherwise, an end that merely coincides
    /// with its rounded implicit counterpart carried no information of its
    /// own and becomes unbounded; the other end stays finite.
    pub fn narrow(&self, implicit_low: impl Into<Bound>, implicit_high: impl Into<Bound>) -> Self {
        let implicit_low = implicit_low.into();
        let implicit_high = implicit_high.into();
        debug_assert!(implicit_low != Bound::Greatest, "low bound cannot be Greatest");
        debug_assert!(implicit_high != Bound::Least, "high bound cannot be Least");

        let implicit_low = implicit_low.round_up_to_multiple(self.multiple_of);
        let implicit_high = implicit_high.round_down_to_multiple(self.multiple_of);

        let low = self.low.max(implicit_low);
        let high = self.high.min(implicit_high);

        if low >= high {
            // Empty or a single count
            return Self::new(low, high);
        }

        Self::with_multiple_of(
            if low == implicit_low { Bound::Least } else { low },
            if high == implicit_high { Bound::Greatest } else { high },
            self.multiple_of,
        )
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }

        let body = match (self.low, self.high) {
            (Bound::Least, Bound::Greatest) => "any".to_string(),
            (Bound::Least, Bound::Finite(high)) => format!("up to {high}"),
            (Bound::Finite(low), Bound::Greatest) => format!("{low}+"),
            (Bound::Finite(low), Bound::Finite(high)) if low == high => {
                return write!(f, "{low}");
            }
            (Bound::Finite(low), Bound::Finite(high)) => format!("{low}..{high}"),
            // Inverted sentinels are rejected at construction; kept total
            // for release builds
            _ => "any".to_string(),
        };

        match self.multiple_of {
            1 => f.write_str(&body),
            2 => write!(f, "{body} even"),
            n => write!(f, "{body} multiple of {n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_respects_bounds_and_multiple() {
        let range = Range::new(2, 6);
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(range.contains(6));
        assert!(!range.contains(7));

        let even = Range::with_multiple_of(2, 6, 2);
        assert!(even.contains(2));
        assert!(!even.contains(3));
        assert!(even.contains(6));
    }

    #[test]
    fn contains_with_unbounded_ends() {
        let open_high = Range::new(3, Bound::Greatest);
        assert!(!open_high.contains(2));
        assert!(open_high.contains(3));
        assert!(open_high.contains(1000));

        let open_low = Range::new(Bound::Least, 5);
        assert!(open_low.contains(0));
        assert!(open_low.contains(5));
        assert!(!open_low.contains(6));
    }

    #[test]
    fn construction_rounds_to_multiple() {
        let range = Range::with_multiple_of(3, 7, 2);
        assert_eq!(range.low(), Bound::Finite(4));
        assert_eq!(range.high(), Bound::Finite(6));
    }

    #[test]
    fn empty_when_low_exceeds_high() {
        let range = Range::new(5, 2);
        assert!(range.is_empty());
        assert!(!range.contains(3));
        assert_eq!(range.to_string(), "none");

        // Rounding can empty a range that looked inhabited
        let range = Range::with_multiple_of(5, 6, 4);
        assert!(range.is_empty());
    }

    #[test]
    fn rounding_past_the_top_of_u32_yields_an_empty_range() {
        // The low end has no even multiple at or above it, so nothing can
        // satisfy the range; construction must not wrap or panic.
        let range = Range::with_multiple_of(u32::MAX, u32::MAX, 2);
        assert!(range.is_empty());
        assert_eq!(range.to_string(), "none");
        assert!(!range.contains(0));
        assert!(!range.contains(u32::MAX));

        let open = Range::with_multiple_of(u32::MAX, Bound::Greatest, 2);
        assert!(!open.contains(u32::MAX - 1));
        assert!(!open.contains(u32::MAX));
    }

    #[test]
    fn rendering() {
        assert_eq!(Range::new(Bound::Least, Bound::Greatest).to_string(), "any");
        assert_eq!(Range::new(3, Bound::Greatest).to_string(), "3+");
        assert_eq!(Range::new(Bound::Least, 5).to_string(), "up to 5");
        assert_eq!(Range::new(4, 4).to_string(), "4");
        assert_eq!(Range::new(2, 6).to_string(), "2..6");
        assert_eq!(Range::with_multiple_of(2, 6, 2).to_string(), "2..6 even");
        assert_eq!(
            Range::with_multiple_of(3, 9, 3).to_string(),
            "3..9 multiple of 3"
        );
    }

    #[test]
    fn narrow_drops_ends_matching_the_implicit_bounds() {
        assert_eq!(
            Range::new(1, 4).narrow(1, 6),
            Range::new(Bound::Least, 4)
        );
        assert_eq!(
            Range::new(2, 6).narrow(1, 6),
            Range::new(2, Bound::Greatest)
        );
        assert_eq!(
            Range::new(1, 4).narrow(1, 4),
            Range::new(Bound::Least, Bound::Greatest)
        );
    }

    #[test]
    fn narrow_keeps_informative_ends() {
        assert_eq!(Range::new(2, 4).narrow(1, 6), Range::new(2, 4));
    }

    #[test]
    fn narrow_returns_degenerate_intersections_verbatim() {
        // Single count
        assert_eq!(Range::new(4, 8).narrow(1, 4), Range::new(4, 4));
        // Empty
        let narrowed = Range::new(6, 8).narrow(1, 4);
        assert!(narrowed.is_empty());
    }

    #[test]
    fn narrow_preserves_the_multiple_constraint() {
        // Implicit low 1 rounds up to 2, matching the range's own low, so the
        // low end is dropped; the high end stays informative.
        let narrowed = Range::with_multiple_of(2, 8, 2).narrow(1, 10);
        assert_eq!(narrowed, Range::with_multiple_of(Bound::Least, 8, 2));
        assert_eq!(narrowed.multiple_of(), 2);
    }

    #[test]
    #[should_panic(expected = "multiple_of must be positive")]
    fn zero_multiple_panics() {
        Range::with_multiple_of(1, 4, 0);
    }

    #[test]
    #[should_panic(expected = "low bound cannot be Greatest")]
    fn inverted_sentinel_low_is_rejected() {
        Range::new(Bound::Greatest, Bound::Greatest);
    }

    #[test]
    #[should_panic(expected = "high bound cannot be Least")]
    fn inverted_sentinel_high_is_rejected() {
        Range::new(Bound::Least, Bound::Least);
    }
}
