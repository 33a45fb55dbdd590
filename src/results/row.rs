use serde::{Deserialize, Serialize};

/// A single measurement from the benchmark CSV.
///
/// Only the three columns the report needs are read; anything else the
/// benchmark writes (`Min`, `Max`, `Mean`) is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResultRow {
    #[serde(rename = "Threads")]
    pub threads: u32,
    #[serde(rename = "Runtime(s)")]
    pub runtime_s: f64,
    #[serde(rename = "Speedup")]
    pub speedup: f64,
}

impl ResultRow {
    #[cfg(test)]
    pub fn new(threads: u32, runtime_s: f64, speedup: f64) -> Self {
        Self {
            threads,
            runtime_s,
            speedup,
        }
    }

    /// Speedup per thread, as a percentage.
    pub fn efficiency(&self) -> f64 {
        self.speedup / f64::from(self.threads) * 100.0
    }
}

/// Rows in input order. Never sorted or de-duplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRow> {
        self.rows.iter()
    }

    /// First row measured with a single thread.
    pub fn serial_row(&self) -> Option<&ResultRow> {
        self.rows.iter().find(|r| r.threads == 1)
    }
}
