//! Aggregation model: reduce the results table to the headline numbers.

use crate::Result;
use crate::diagnostics;
use crate::results::{ResultRow, ResultTable};

use anyhow::bail;
use serde::Serialize;

/// An extreme value and the thread count it was measured at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extremum {
    pub value: f64,
    pub threads: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub best_speedup: Extremum,
    pub serial_runtime_s: f64,
    pub best_runtime: Extremum,
    pub best_efficiency: Extremum,
}

/// Build the summary. Fails on:
/// - an empty table
/// - no row measured with a single thread (no serial baseline)
/// - a column that is NaN in every row
pub fn build_summary(table: &ResultTable) -> Result<Summary> {
    if table.is_empty() {
        bail!(
            "{}",
            diagnostics::error_message("cannot summarize an empty results table")
        );
    }

    let serial = match table.serial_row() {
        Some(row) => row,
        None => {
            bail!(
                "{}",
                diagnostics::error_message(
                    "no row with Threads == 1; serial runtime is undefined"
                )
            );
        }
    };

    let best_speedup = extremum(table, |r| r.speedup, Goal::Max);
    let best_runtime = extremum(table, |r| r.runtime_s, Goal::Min);
    let best_efficiency = extremum(table, ResultRow::efficiency, Goal::Max);

    match (best_speedup, best_runtime, best_efficiency) {
        (Some(best_speedup), Some(best_runtime), Some(best_efficiency)) => Ok(Summary {
            best_speedup,
            serial_runtime_s: serial.runtime_s,
            best_runtime,
            best_efficiency,
        }),
        _ => bail!(
            "{}",
            diagnostics::error_message("results table has no comparable values")
        ),
    }
}

#[derive(Debug, Clone, Copy)]
enum Goal {
    Min,
    Max,
}

/// First row (input order) holding the extreme value. NaN never wins.
fn extremum(table: &ResultTable, value: impl Fn(&ResultRow) -> f64, goal: Goal) -> Option<Extremum> {
    let mut best: Option<Extremum> = None;
    for row in table.iter() {
        let v = value(row);
        if v.is_nan() {
            continue;
        }
        let better = match (best, goal) {
            (None, _) => true,
            (Some(b), Goal::Max) => v > b.value,
            (Some(b), Goal::Min) => v < b.value,
        };
        if better {
            best = Some(Extremum {
                value: v,
                threads: row.threads,
            });
        }
    }
    best
}
