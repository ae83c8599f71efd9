use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::table::{DistributionTable, SampleSizePair};
use crate::misc::cumsum::cumsum;
use crate::permutation::arrangements;

/// Largest per-sample size the exhaustive enumeration is meant for.
/// Bigger sizes still work but grow as C(n_a + n_b, n_a).
pub const MAX_RECOMMENDED_SIDE: usize = 10;

/// Sum of the 1-based positions holding a one (sample A membership).
pub fn rank_sum(arrangement: &[u8]) -> u64 {
    arrangement
        .iter()
        .enumerate()
        .filter(|&(_, &member)| member == 1)
        .map(|(position, _)| position as u64 + 1)
        .sum()
}

/// Exact distribution of the rank sum W of sample A under the null hypothesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankSumDistribution {
    pair: SampleSizePair,
    // distinct W values, ascending
    w_values: Vec<u64>,
    counts: Vec<u64>,
    total: u64,
}

impl RankSumDistribution {
    pub fn pair(&self) -> SampleSizePair {
        self.pair
    }

    pub fn w_values(&self) -> &[u64] {
        &self.w_values
    }

    /// Number of arrangements producing each W value.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total_arrangements(&self) -> u64 {
        self.total
    }

    /// Relative frequency of each W value.
    pub fn frequencies(&self) -> Vec<f64> {
        let total = self.total as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }

    /// Probability of W at or below each distinct value.
    ///
    /// Accumulated on the integer counts, so the last entry is exactly 1.0.
    pub fn cumulative(&self) -> Vec<f64> {
        let total = self.total as f64;
        cumsum(&self.counts)
            .into_iter()
            .map(|c| c as f64 / total)
            .collect()
    }

    /// Critical U values, `U = W - n_a (n_a + 1) / 2`.
    pub fn u_crit(&self) -> Vec<f64> {
        let offset = self.pair.min_rank_sum();
        self.w_values.iter().map(|&w| (w - offset) as f64).collect()
    }

    pub fn to_table(&self) -> DistributionTable {
        DistributionTable::from_aligned(self.u_crit(), self.cumulative())
    }
}

/// Enumerates every arrangement for `pair` and tallies its rank sums.
pub fn build_distribution(pair: SampleSizePair) -> RankSumDistribution {
    if pair.n_a > MAX_RECOMMENDED_SIDE || pair.n_b > MAX_RECOMMENDED_SIDE {
        warn!(
            n_a = pair.n_a,
            n_b = pair.n_b,
            max = MAX_RECOMMENDED_SIDE,
            "sample sizes exceed the recommended bound for exhaustive enumeration"
        );
    }

    let mut tally: BTreeMap<u64, u64> = BTreeMap::new();
    let mut total = 0u64;
    for arrangement in arrangements(pair.n_a, pair.n_b) {
        *tally.entry(rank_sum(&arrangement)).or_insert(0) += 1;
        total += 1;
    }
    let (w_values, counts): (Vec<u64>, Vec<u64>) = tally.into_iter().unzip();

    debug!(
        n_a = pair.n_a,
        n_b = pair.n_b,
        arrangements = total,
        distinct = w_values.len(),
        "built rank-sum distribution"
    );

    RankSumDistribution {
        pair,
        w_values,
        counts,
        total,
    }
}

pub fn build_table(pair: SampleSizePair) -> DistributionTable {
    build_distribution(pair).to_table()
}

/// Builds one table per pair, keeping the input order.
///
/// With `parallel` set, distinct pairs are enumerated on the rayon pool. Each
/// enumeration owns its own buffers; nothing is shared between them.
pub fn build_tables(
    pairs: &[SampleSizePair],
    parallel: bool,
) -> Vec<(SampleSizePair, DistributionTable)> {
    info!(pairs = pairs.len(), parallel, "building distribution tables");
    if parallel {
        pairs
            .par_iter()
            .map(|&pair| (pair, build_table(pair)))
            .collect()
    } else {
        pairs.iter().map(|&pair| (pair, build_table(pair))).collect()
    }
}
