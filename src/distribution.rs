mod builder;
mod table;

pub use builder::{
    build_distribution, build_table, build_tables, rank_sum, RankSumDistribution,
    MAX_RECOMMENDED_SIDE,
};
pub use table::{DistributionTable, SampleSizePair};
