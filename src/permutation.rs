mod multiset;

pub use multiset::{arrangements, binomial, MultisetPermutations};
