//! Sales analysis.
//!
//! Grouping primitives live in `aggregator`, column statistics in
//! `describe`, and `summary` assembles everything the report needs.

pub mod aggregator;
pub mod describe;
pub mod summary;

pub use aggregator::*;
pub use summary::SalesSummary;
