//! Console text: the load preview and the performance summary.

use crate::model::Summary;
use crate::results::ResultTable;

/// Rows shown in the preview printed after loading.
pub const PREVIEW_ROWS: usize = 5;

/// Right-aligned table of the first `limit` rows, headed by the CSV column names.
///
/// Only the report columns are shown; extra CSV columns such as `Min`, `Max`
/// and `Mean` are not kept on `ResultRow` and so do not appear here.
pub fn preview_table(table: &ResultTable, limit: usize) -> String {
    let header = ["", "Threads", "Runtime(s)", "Speedup"];
    let body: Vec<[String; 4]> = table
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, r)| {
            [
                i.to_string(),
                r.threads.to_string(),
                format!("{:.6}", r.runtime_s),
                format!("{:.4}", r.speedup),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.len());
        }
    }

    let fmt_line = |cells: [&str; 4]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:>w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = vec![fmt_line(header)];
    for cells in &body {
        lines.push(fmt_line([
            cells[0].as_str(),
            cells[1].as_str(),
            cells[2].as_str(),
            cells[3].as_str(),
        ]));
    }
    lines.join("\n")
}

/// The four headline lines, in print order.
pub fn summary_lines(summary: &Summary) -> Vec<String> {
    vec![
        format!(
            "Best speedup: {:.2}x with {} threads",
            summary.best_speedup.value, summary.best_speedup.threads
        ),
        format!("Serial runtime: {:.2} seconds", summary.serial_runtime_s),
        format!(
            "Best parallel runtime: {:.2} seconds with {} threads",
            summary.best_runtime.value, summary.best_runtime.threads
        ),
        format!(
            "Best efficiency: {:.1}% with {} threads",
            summary.best_efficiency.value, summary.best_efficiency.threads
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_summary;
    use crate::results::ResultRow;
    use pretty_assertions::assert_eq;

    fn sample() -> ResultTable {
        ResultTable::new(vec![
            ResultRow::new(1, 10.0, 1.0),
            ResultRow::new(2, 5.2, 1.92),
            ResultRow::new(4, 2.9, 3.45),
        ])
    }

    #[test]
    fn summary_lines_match_report_format() {
        let summary = build_summary(&sample()).unwrap();
        assert_eq!(
            summary_lines(&summary),
            vec![
                "Best speedup: 3.45x with 4 threads".to_string(),
                "Serial runtime: 10.00 seconds".to_string(),
                "Best parallel runtime: 2.90 seconds with 4 threads".to_string(),
                "Best efficiency: 100.0% with 1 threads".to_string(),
            ]
        );
    }

    #[test]
    fn preview_is_right_aligned_and_limited() {
        let text = preview_table(&sample(), 2);
        assert_eq!(
            text,
            [
                "   Threads  Runtime(s)  Speedup",
                "0        1   10.000000   1.0000",
                "1        2    5.200000   1.9200",
            ]
            .join("\n")
        );
    }
}
