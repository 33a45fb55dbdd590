//! Output layer: PNG charts and console text.

pub mod chart;
pub mod summary;

pub use chart::{COMBINED_FILE, RUNTIME_FILE, SPEEDUP_FILE, render_combined, render_runtime, render_speedup};
pub use summary::{PREVIEW_ROWS, preview_table, summary_lines};
