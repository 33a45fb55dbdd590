//! Benchmark results table: one row per thread count measured.

pub mod parse;
pub mod row;

pub use parse::{inspect_table, is_missing_input, load_results_file};
pub use row::{ResultRow, ResultTable};
