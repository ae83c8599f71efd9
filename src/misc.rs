pub mod cumsum;
pub mod rank;
