//! A capability deriving the six relational operators from one comparator.

use std::cmp::Ordering;

use super::errors::ComparisonError;

/// A value comparable against `Rhs` through a single three-way comparator.
///
/// Implementors supply [`Comparable::compare`] only. All six relational
/// operations are derived from it and never re-derive ordering on their own,
/// so the comparator remains the single source of truth: a changed comparator
/// changes all six operations consistently.
pub trait Comparable<Rhs: ?Sized = Self> {
    /// Compares both operands, `None` if they have no defined relative order.
    fn compare(&self, other: &Rhs) -> Option<Ordering>;

    /// Compares both operands, raising an error if they are incomparable.
    fn try_compare(&self, other: &Rhs) -> Result<Ordering, ComparisonError> {
        self.compare(other).ok_or(ComparisonError::Incomparable)
    }

    /// Checks whether both operands are equal.
    fn is_equal(&self, other: &Rhs) -> Result<bool, ComparisonError> {
        self.try_compare(other)
            .map(|ordering| ordering == Ordering::Equal)
    }

    /// Checks whether both operands are distinct.
    fn is_not_equal(&self, other: &Rhs) -> Result<bool, ComparisonError> {
        self.try_compare(other)
            .map(|ordering| ordering != Ordering::Equal)
    }

    /// Checks whether the left operand sorts before the right one.
    fn is_less(&self, other: &Rhs) -> Result<bool, ComparisonError> {
        self.try_compare(other)
            .map(|ordering| ordering == Ordering::Less)
    }

    /// Checks whether the left operand sorts before the right one or equals it.
    fn is_less_or_equal(&self, other: &Rhs) -> Result<bool, ComparisonError> {
        self.try_compare(other)
            .map(|ordering| ordering != Ordering::Greater)
    }

    /// Checks whether the left operand sorts after the right one.
    fn is_greater(&self, other: &Rhs) -> Result<bool, ComparisonError> {
        self.try_compare(other)
            .map(|ordering| ordering == Ordering::Greater)
    }

    /// Checks whether the left operand sorts after the right one or equals it.
    fn is_greater_or_equal(&self, other: &Rhs) -> Result<bool, ComparisonError> {
        self.try_compare(other)
            .map(|ordering| ordering != Ordering::Less)
    }
}

#[cfg(test)]
mod tests {
    use super::{Comparable, ComparisonError, Ordering};

    /// A value ordered by magnitude; NaN-like payloads are incomparable.
    #[derive(Debug, Clone, Copy)]
    struct Measurement(f64);

    impl Comparable for Measurement {
        fn compare(&self, other: &Measurement) -> Option<Ordering> {
            self.0.partial_cmp(&other.0)
        }
    }

    #[test]
    fn test_trichotomy() {
        let pairs = [
            (Measurement(1.0), Measurement(2.0)),
            (Measurement(2.0), Measurement(2.0)),
            (Measurement(3.0), Measurement(2.0)),
        ];
        for (left, right) in &pairs {
            let outcomes = [
                left.is_less(right).unwrap(),
                left.is_equal(right).unwrap(),
                left.is_greater(right).unwrap(),
            ];
            assert_eq!(outcomes.iter().filter(|value| **value).count(), 1);
            assert_eq!(
                left.is_not_equal(right).unwrap(),
                !left.is_equal(right).unwrap()
            );
        }
    }

    #[test]
    fn test_boundaries() {
        let two = Measurement(2.0);
        assert!(two.is_less_or_equal(&Measurement(2.0)).unwrap());
        assert!(two.is_greater_or_equal(&Measurement(2.0)).unwrap());
        assert!(two.is_less_or_equal(&Measurement(3.0)).unwrap());
        assert!(!two.is_greater(&Measurement(2.0)).unwrap());
    }

    #[test]
    fn test_incomparable() {
        let unordered = Measurement(f64::NAN);
        let ordered = Measurement(1.0);
        assert_eq!(
            unordered.is_equal(&ordered).unwrap_err(),
            ComparisonError::Incomparable
        );
        assert_eq!(
            ordered.is_less(&unordered).unwrap_err(),
            ComparisonError::Incomparable
        );
        assert_eq!(
            unordered.is_not_equal(&unordered).unwrap_err(),
            ComparisonError::Incomparable
        );
    }
}
