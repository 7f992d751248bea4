//! Array Store Module
//!
//! The mutable sequence of numeric cells that range queries aggregate over.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{CacheError, Result};

// == Array Store ==
/// Caller-owned backing array. The range cache only borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayStore {
    cells: Vec<i64>,
}

impl ArrayStore {
    // == Constructor ==
    pub fn new(cells: Vec<i64>) -> Self {
        Self { cells }
    }

    /// Builds an array of `len` cells with values uniform in `1..=max_value`.
    ///
    /// # Errors
    /// `InvalidRequest` when `max_value` is below 1.
    pub fn random(len: usize, max_value: i64, seed: u64) -> Result<Self> {
        if max_value < 1 {
            return Err(CacheError::InvalidRequest(format!(
                "max_value must be at least 1, got {}",
                max_value
            )));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(Self {
            cells: (0..len).map(|_| rng.gen_range(1..=max_value)).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    // == Get ==
    pub fn get(&self, index: usize) -> Result<i64> {
        self.cells
            .get(index)
            .copied()
            .ok_or_else(|| CacheError::index(index, self.cells.len()))
    }

    // == Set ==
    /// Overwrites one cell and returns the previous value.
    pub fn set(&mut self, index: usize, value: i64) -> Result<i64> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or_else(|| CacheError::index(index, len))?;
        Ok(std::mem::replace(cell, value))
    }

    // == Range Checks ==
    /// Fails unless `left <= right < len`.
    pub fn check_range(&self, left: usize, right: usize) -> Result<()> {
        if left > right || right >= self.cells.len() {
            return Err(CacheError::range(left, right, self.cells.len()));
        }
        Ok(())
    }

    // == Sum ==
    /// Inclusive sum of `cells[left..=right]`, computed directly.
    ///
    /// # Errors
    /// `OutOfRange` for bad bounds, `Overflow` if the sum leaves `i64`.
    pub fn sum(&self, left: usize, right: usize) -> Result<i64> {
        self.check_range(left, right)?;
        self.cells[left..=right]
            .iter()
            .try_fold(0i64, |acc, &v| acc.checked_add(v))
            .ok_or_else(|| CacheError::overflow(left, right))
    }
}

impl From<Vec<i64>> for ArrayStore {
    fn from(cells: Vec<i64>) -> Self {
        Self::new(cells)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_inclusive() {
        let store = ArrayStore::new(vec![5, 3, 8, 1]);

        assert_eq!(store.sum(0, 2).unwrap(), 16);
        assert_eq!(store.sum(3, 3).unwrap(), 1);
        assert_eq!(store.sum(0, 3).unwrap(), 17);
    }

    #[test]
    fn test_sum_rejects_bad_ranges() {
        let store = ArrayStore::new(vec![5, 3, 8, 1]);

        assert!(matches!(store.sum(2, 1), Err(CacheError::OutOfRange(_))));
        assert!(matches!(store.sum(0, 4), Err(CacheError::OutOfRange(_))));
        assert!(ArrayStore::default().sum(0, 0).is_err());
    }

    #[test]
    fn test_sum_reports_overflow() {
        let store = ArrayStore::new(vec![i64::MAX, 1, i64::MIN]);

        assert!(matches!(store.sum(0, 1), Err(CacheError::Overflow(_))));
        assert_eq!(store.sum(0, 0).unwrap(), i64::MAX);
        assert_eq!(store.sum(1, 2).unwrap(), i64::MIN + 1);
    }

    #[test]
    fn test_random_rejects_bad_bound() {
        assert!(matches!(
            ArrayStore::random(10, 0, 1),
            Err(CacheError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_set_returns_previous() {
        let mut store = ArrayStore::new(vec![5, 3, 8, 1]);

        assert_eq!(store.set(1, 100).unwrap(), 3);
        assert_eq!(store.get(1).unwrap(), 100);
    }

    #[test]
    fn test_set_out_of_range_leaves_store_untouched() {
        let mut store = ArrayStore::new(vec![5, 3]);

        assert!(matches!(store.set(2, 9), Err(CacheError::OutOfRange(_))));
        assert_eq!(store.as_slice(), &[5, 3]);
    }

    #[test]
    fn test_random_is_seeded_and_bounded() {
        let a = ArrayStore::random(500, 100, 42).unwrap();
        let b = ArrayStore::random(500, 100, 42).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 500);
        assert!(a.as_slice().iter().all(|&v| (1..=100).contains(&v)));
    }
}
