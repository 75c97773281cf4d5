//! Element-count constraints for sequence templates.

use std::fmt;
use std::ops::{Bound, RangeBounds};

use serde::Serialize;

use crate::error::Error;

/// A set of acceptable sequence lengths: `start`, `start + step`, ... below `stop`.
///
/// `stop` is exclusive; `None` leaves the range open-ended. A range such as
/// `3..3` is valid and contains no length at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LengthRange {
    start: usize,
    stop: Option<usize>,
    step: usize,
}

impl LengthRange {
    /// Lengths in `start..stop`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLengthRange` if `start > stop`.
    pub fn new(start: usize, stop: usize) -> Result<Self, Error> {
        Self::stepped(start, Some(stop), 1)
    }

    /// Any length of at least `start`.
    #[must_use]
    pub fn at_least(start: usize) -> Self {
        Self {
            start,
            stop: None,
            step: 1,
        }
    }

    /// Lengths `start, start + step, ...` strictly below `stop` (unbounded if `None`).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLengthRange` if `step` is zero or `start > stop`.
    pub fn stepped(start: usize, stop: Option<usize>, step: usize) -> Result<Self, Error> {
        if step == 0 {
            return Err(Error::InvalidLengthRange("step must be at least 1".to_owned()));
        }
        if let Some(stop) = stop
            && start > stop
        {
            return Err(Error::InvalidLengthRange(format!(
                "start {start} is greater than stop {stop}"
            )));
        }
        Ok(Self { start, stop, step })
    }

    /// Build from any Rust range expression (`1..4`, `..=3`, `2..`, `..`).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLengthRange` if the range is reversed or an
    /// excluded start bound is `usize::MAX`.
    pub fn from_bounds<R: RangeBounds<usize>>(range: &R) -> Result<Self, Error> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.checked_add(1).ok_or_else(|| {
                Error::InvalidLengthRange("excluded start bound overflows".to_owned())
            })?,
            Bound::Unbounded => 0,
        };
        // An inclusive `usize::MAX` end has no exclusive successor; it is unbounded in practice.
        let stop = match range.end_bound() {
            Bound::Included(&end) => end.checked_add(1),
            Bound::Excluded(&end) => Some(end),
            Bound::Unbounded => None,
        };
        Self::stepped(start, stop, 1)
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub fn stop(&self) -> Option<usize> {
        self.stop
    }

    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Whether a sequence of `len` elements satisfies the constraint.
    #[must_use]
    pub fn contains(&self, len: usize) -> bool {
        len >= self.start
            && self.stop.is_none_or(|stop| len < stop)
            && (len - self.start) % self.step == 0
    }

    /// Whether no length at all satisfies the constraint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stop.is_some_and(|stop| stop == self.start)
    }
}

impl fmt::Display for LengthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stop {
            Some(stop) => write!(f, "{}..{stop}", self.start)?,
            None => write!(f, "{}..", self.start)?,
        }
        if self.step != 1 {
            write!(f, " step {}", self.step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_open_membership() {
        let range = LengthRange::new(1, 4).unwrap();
        assert!(!range.contains(0));
        assert!(range.contains(1));
        assert!(range.contains(3));
        assert!(!range.contains(4));
    }

    #[test]
    fn test_stepped_membership() {
        let range = LengthRange::stepped(20, Some(32), 3).unwrap();
        let members: Vec<usize> = (0..40).filter(|n| range.contains(*n)).collect();
        assert_eq!(members, vec![20, 23, 26, 29]);
    }

    #[test]
    fn test_open_ended() {
        let range = LengthRange::at_least(2);
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(10_000));
        assert_eq!(range.to_string(), "2..");
    }

    #[test]
    fn test_empty_range_is_allowed_and_matches_nothing() {
        let range = LengthRange::new(3, 3).unwrap();
        assert!(range.is_empty());
        assert!((0..10).all(|n| !range.contains(n)));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = LengthRange::new(5, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidLengthRange(_)), "got: {err:?}");
    }

    #[test]
    fn test_zero_step_rejected() {
        let err = LengthRange::stepped(0, Some(10), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidLengthRange(_)), "got: {err:?}");
    }

    #[test]
    fn test_from_rust_ranges() {
        assert_eq!(
            LengthRange::from_bounds(&(1..4)).unwrap(),
            LengthRange::new(1, 4).unwrap()
        );
        assert_eq!(
            LengthRange::from_bounds(&(1..=3)).unwrap(),
            LengthRange::new(1, 4).unwrap()
        );
        assert_eq!(
            LengthRange::from_bounds(&(..3)).unwrap(),
            LengthRange::new(0, 3).unwrap()
        );
        assert_eq!(
            LengthRange::from_bounds(&(2..)).unwrap(),
            LengthRange::at_least(2)
        );
        assert!(LengthRange::from_bounds(&(..=usize::MAX)).unwrap().contains(usize::MAX));
    }

    #[test]
    fn test_excluded_start_bound() {
        let range = LengthRange::from_bounds(&(Bound::Excluded(1), Bound::Excluded(4))).unwrap();
        assert_eq!(range, LengthRange::new(2, 4).unwrap());

        let err = LengthRange::from_bounds(&(Bound::Excluded(usize::MAX), Bound::Unbounded))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLengthRange(_)), "got: {err:?}");
    }

    #[test]
    fn test_display() {
        assert_eq!(LengthRange::new(1, 4).unwrap().to_string(), "1..4");
        assert_eq!(
            LengthRange::stepped(20, Some(32), 3).unwrap().to_string(),
            "20..32 step 3"
        );
    }
}
