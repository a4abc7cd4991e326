//! Inclusive numeric ranges used by the range filters

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Closed interval `[low, high]`, never inverted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRange")]
pub struct NumericRange {
    low: f64,
    high: f64,
}

#[derive(Deserialize)]
struct RawRange {
    low: f64,
    high: f64,
}

impl From<RawRange> for NumericRange {
    fn from(raw: RawRange) -> Self {
        Self::new(raw.low, raw.high)
    }
}

impl Default for NumericRange {
    fn default() -> Self {
        Self::DEGENERATE
    }
}

impl NumericRange {
    /// The `(0, 0)` bounds reported for an empty catalogue
    pub const DEGENERATE: NumericRange = NumericRange {
        low: 0.0,
        high: 0.0,
    };

    /// Build a range, swapping the ends when `low > high`.
    ///
    /// A NaN end is read as "open on that side".
    pub fn new(low: f64, high: f64) -> Self {
        let low = if low.is_nan() { f64::NEG_INFINITY } else { low };
        let high = if high.is_nan() { f64::INFINITY } else { high };

        if low > high {
            Self {
                low: high,
                high: low,
            }
        } else {
            Self { low, high }
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Smallest range holding all `values`, or `DEGENERATE` when there are none
    pub fn spanning<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut span: Option<(f64, f64)> = None;
        for value in values {
            span = Some(match span {
                Some((low, high)) => (low.min(value), high.max(value)),
                None => (value, value),
            });
        }

        span.map(|(low, high)| Self::new(low, high))
            .unwrap_or(Self::DEGENERATE)
    }
}

impl From<(f64, f64)> for NumericRange {
    fn from((low, high): (f64, f64)) -> Self {
        Self::new(low, high)
    }
}

impl From<[f64; 2]> for NumericRange {
    fn from([low, high]: [f64; 2]) -> Self {
        Self::new(low, high)
    }
}

impl From<RangeInclusive<f64>> for NumericRange {
    fn from(range: RangeInclusive<f64>) -> Self {
        let (low, high) = range.into_inner();
        Self::new(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_swaps_inverted_ends() {
        let range = NumericRange::new(10.0, 1.0);
        assert_eq!(range.low(), 1.0);
        assert_eq!(range.high(), 10.0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = NumericRange::new(1.0, 4.0);
        assert!(range.contains(1.0));
        assert!(range.contains(4.0));
        assert!(range.contains(2.5));
        assert!(!range.contains(0.999));
        assert!(!range.contains(4.001));
    }

    #[test]
    fn test_nan_ends_are_open() {
        let range = NumericRange::new(f64::NAN, 5.0);
        assert!(range.contains(-1e12));
        assert!(!range.contains(6.0));

        let range = NumericRange::new(2.0, f64::NAN);
        assert!(range.contains(1e12));
    }

    #[test]
    fn test_spanning() {
        let range = NumericRange::spanning([3.0, 9.0, 1.5]);
        assert_eq!(range, NumericRange::new(1.5, 9.0));
        assert_eq!(NumericRange::spanning(std::iter::empty()), NumericRange::DEGENERATE);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(NumericRange::from((4.0, 1.0)), NumericRange::new(1.0, 4.0));
        assert_eq!(NumericRange::from([1.0, 4.0]), NumericRange::new(1.0, 4.0));
        assert_eq!(NumericRange::from(10.0..=1.0), NumericRange::new(1.0, 10.0));
    }

    #[test]
    fn test_deserialize_normalizes() {
        let range: NumericRange = serde_json::from_str(r#"{"low": 9, "high": 2}"#).unwrap();
        assert_eq!(range.low(), 2.0);
        assert_eq!(range.high(), 9.0);
    }
}
