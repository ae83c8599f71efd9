//! Exact Mann-Whitney U test against precomputed distribution tables.
//!
//! # References
//!
//! - H.B. Mann and D.R. Whitney (1947). "On a Test of Whether one of Two
//!   Random Variables is Stochastically Larger than the Other". Annals of
//!   Mathematical Statistics, 18(1), 50-60.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::distribution::SampleSizePair;
use crate::error::{MannWhitneyError, Result};
use crate::misc::rank::{average_ranks, tie_correction};
use crate::store::TableStore;

/// Which tail(s) of the null distribution the p-value covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    Less,
    Greater,
    #[default]
    TwoSided,
}

impl Alternative {
    /// Statistic looked up in the table for this alternative.
    pub fn select(self, u_a: f64, u_b: f64) -> f64 {
        match self {
            Alternative::TwoSided => u_a.min(u_b),
            Alternative::Less => u_a,
            Alternative::Greater => u_b,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Alternative::Less => "less",
            Alternative::Greater => "greater",
            Alternative::TwoSided => "two-sided",
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alternative {
    type Err = MannWhitneyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "less" => Ok(Alternative::Less),
            "greater" => Ok(Alternative::Greater),
            "two-sided" => Ok(Alternative::TwoSided),
            other => Err(MannWhitneyError::InvalidAlternative(other.to_string())),
        }
    }
}

/// Outcome of one exact test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// U of sample A, whichever alternative was requested.
    pub u_statistic: f64,
    pub p_value: f64,
    pub u_crit: Vec<f64>,
    pub w_cum: Vec<f64>,
}

/// `(u_a, u_b)` for the two samples, using average ranks for ties.
///
/// `u_b` is the complement `n_a * n_b - u_a`.
pub fn u_statistics(a: &[f64], b: &[f64]) -> Result<(f64, f64)> {
    let pair = SampleSizePair::new(a.len(), b.len());
    let pooled: Vec<f64> = a.iter().chain(b.iter()).copied().collect();
    let ranks = average_ranks(&pooled)?;
    let rank_sum_a: f64 = ranks[..a.len()].iter().sum();
    let u_a = rank_sum_a - pair.min_rank_sum() as f64;
    let u_b = pair.u_total() as f64 - u_a;
    Ok((u_a, u_b))
}

/// Exact Mann-Whitney U test of sample `a` against sample `b`.
///
/// The p-value is the cumulative mass of the first tabulated U at or above
/// the selected statistic. With ties the statistic can be fractional, in
/// which case the mass of the next integer U is reported (4.5 reads as 5).
///
/// The two-sided p-value is twice the one-sided mass of `min(u_a, u_b)`. It
/// is not clamped, so near the median it can exceed 1.0, and for unequal
/// sample sizes it only approximates the exact two-sided probability.
///
/// # Errors
///
/// - [`MannWhitneyError::DegenerateInput`] when every pooled value is equal.
/// - [`MannWhitneyError::MissingTableEntry`] when the store has no table for
///   `(a.len(), b.len())`.
/// - [`MannWhitneyError::NonFiniteSample`] for NaN or infinite values.
pub fn mann_whitney_exact(
    store: &TableStore,
    a: &[f64],
    b: &[f64],
    alternative: Alternative,
) -> Result<TestResult> {
    let (u_a, u_b) = u_statistics(a, b)?;
    let u = alternative.select(u_a, u_b);

    let pooled: Vec<f64> = a.iter().chain(b.iter()).copied().collect();
    if tie_correction(&pooled)? == 0.0 {
        return Err(MannWhitneyError::DegenerateInput);
    }

    let table = store.lookup(&SampleSizePair::new(a.len(), b.len()))?;
    let mut p_value = table.cumulative_mass(u);
    if alternative == Alternative::TwoSided {
        p_value *= 2.0;
    }

    Ok(TestResult {
        u_statistic: u_a,
        p_value,
        u_crit: table.u_crit().to_vec(),
        w_cum: table.w_cum().to_vec(),
    })
}

/// Loads the table file and runs a single test. Prefer a long-lived
/// [`TableStore`] when testing repeatedly.
pub fn mann_whitney_exact_from_file<P: AsRef<Path>>(
    path: P,
    a: &[f64],
    b: &[f64],
    alternative: Alternative,
) -> Result<TestResult> {
    let store = TableStore::load(path)?;
    mann_whitney_exact(&store, a, b, alternative)
}
