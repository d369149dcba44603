pub mod catalog;
pub mod metrics;
