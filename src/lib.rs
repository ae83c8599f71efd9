//! Exact p-values for the Mann-Whitney U (Wilcoxon rank-sum) test on small
//! samples.
//!
//! Tables of the exact null distribution are generated offline for each pair
//! of sample sizes ([`distribution`], [`store`]) and looked up at test time
//! ([`evaluator`]).

mod misc;

pub mod config;
pub mod distribution;
pub mod error;
pub mod evaluator;
pub mod permutation;
pub mod store;

pub use config::GeneratorConfig;
pub use distribution::{DistributionTable, SampleSizePair};
pub use error::{MannWhitneyError, Result};
pub use evaluator::{mann_whitney_exact, mann_whitney_exact_from_file, Alternative, TestResult};
pub use store::TableStore;
