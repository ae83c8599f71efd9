use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MannWhitneyError, Result};

/// Sizes of sample A and sample B, in that order.
///
/// The order matters: `(3, 5)` and `(5, 3)` are distinct table entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SampleSizePair {
    pub n_a: usize,
    pub n_b: usize,
}

impl SampleSizePair {
    pub fn new(n_a: usize, n_b: usize) -> Self {
        SampleSizePair { n_a, n_b }
    }

    /// Lookup key of the form `"n_a,n_b"`.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Inverse of [`SampleSizePair::key`]. No whitespace is tolerated.
    pub fn from_key(key: &str) -> Option<Self> {
        let (n_a, n_b) = key.split_once(',')?;
        Some(SampleSizePair::new(n_a.parse().ok()?, n_b.parse().ok()?))
    }

    /// Smallest possible rank sum of sample A, `n_a (n_a + 1) / 2`.
    pub fn min_rank_sum(&self) -> u64 {
        let n_a = self.n_a as u64;
        n_a * (n_a + 1) / 2
    }

    /// `n_a * n_b`, the value `u_a + u_b` always adds up to.
    pub fn u_total(&self) -> u64 {
        (self.n_a * self.n_b) as u64
    }
}

impl fmt::Display for SampleSizePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.n_a, self.n_b)
    }
}

/// Exact null distribution of U for one size pair.
///
/// `u_crit` holds the distinct attainable U values in ascending order and
/// `w_cum[i]` the probability of observing a U at or below `u_crit[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionTable {
    u_crit: Vec<f64>,
    w_cum: Vec<f64>,
}

impl DistributionTable {
    /// Pairs up the two columns. Monotonicity is not checked here; tables
    /// from the builder satisfy it and parsed tables are trusted.
    pub fn new(u_crit: Vec<f64>, w_cum: Vec<f64>) -> Result<Self> {
        if u_crit.len() != w_cum.len() {
            return Err(MannWhitneyError::format(
                0,
                format!(
                    "{} critical values but {} cumulative frequencies",
                    u_crit.len(),
                    w_cum.len()
                ),
            ));
        }
        if u_crit.is_empty() {
            return Err(MannWhitneyError::format(0, "empty distribution"));
        }
        Ok(DistributionTable { u_crit, w_cum })
    }

    // Every enumeration yields at least one arrangement, so builder columns
    // are non-empty and aligned.
    pub(super) fn from_aligned(u_crit: Vec<f64>, w_cum: Vec<f64>) -> Self {
        debug_assert_eq!(u_crit.len(), w_cum.len());
        DistributionTable { u_crit, w_cum }
    }

    pub fn u_crit(&self) -> &[f64] {
        &self.u_crit
    }

    pub fn w_cum(&self) -> &[f64] {
        &self.w_cum
    }

    pub fn len(&self) -> usize {
        self.u_crit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u_crit.is_empty()
    }

    /// Cumulative mass of the first critical value at or above `u`.
    ///
    /// A fractional `u` (ties) therefore resolves to the next attainable U.
    /// Past the last critical value the final entry (1.0) is returned.
    pub fn cumulative_mass(&self, u: f64) -> f64 {
        match self.u_crit.iter().position(|&crit| u <= crit) {
            Some(index) => self.w_cum[index],
            None => self.w_cum.last().copied().unwrap_or(1.0),
        }
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.u_crit, self.w_cum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_size_pair_key() {
        let pair = SampleSizePair::new(3, 5);
        assert_eq!(pair.key(), "3,5");
        assert_eq!(SampleSizePair::from_key("3,5"), Some(pair));
        assert_ne!(SampleSizePair::from_key("5,3"), Some(pair));
        assert_eq!(SampleSizePair::from_key("3;5"), None);
        assert_eq!(SampleSizePair::from_key("3,x"), None);
        assert_eq!(pair.min_rank_sum(), 6);
        assert_eq!(pair.u_total(), 15);
    }

    #[test]
    fn test_distribution_table_rejects_mismatched_columns() {
        let err = DistributionTable::new(vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, MannWhitneyError::Format { .. }));
        assert!(DistributionTable::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_cumulative_mass_scan() {
        let table = DistributionTable::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.25, 0.5, 0.75, 1.0],
        )
        .unwrap();
        assert_eq!(table.cumulative_mass(0.0), 0.25);
        assert_eq!(table.cumulative_mass(1.5), 0.75);
        assert_eq!(table.cumulative_mass(3.0), 1.0);
        assert_eq!(table.cumulative_mass(7.0), 1.0);
        assert_eq!(table.cumulative_mass(-1.0), 0.25);
    }
}
