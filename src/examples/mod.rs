mod compare_random_samples;
mod generate_table;

pub use compare_random_samples::compare_random_samples;
pub use generate_table::generate_table;
