pub mod aggregation;
pub mod summary;
