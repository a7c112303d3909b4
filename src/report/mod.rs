//! Report generation.
//!
//! Text and JSON renderings of the sales summary, the derived CSV tables,
//! and the dataset overview shown after generation.

pub mod overview;
pub mod tables;
pub mod text;

pub use overview::generate_overview;
pub use tables::write_summary_tables;
pub use text::{generate_json_report, generate_text_report};
