use crate::Result;
use crate::diagnostics;
use crate::results::row::{ResultRow, ResultTable};

use anyhow::{Context, bail};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 3] = ["Threads", "Runtime(s)", "Speedup"];

/// Parse the benchmark results CSV into a table, keeping input row order.
///
/// Expected header (extra columns allowed):
/// Threads,Runtime(s),Speedup
///
/// Example:
/// 4,2.900000,3.4500
pub fn load_results_file(path: &Path) -> Result<ResultTable> {
    let file = fs::File::open(path).with_context(|| {
        diagnostics::error_message(format!("open results file {}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .with_context(|| {
            diagnostics::error_message(format!("read header of {}", path.display()))
        })?
        .clone();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!(
            "{}",
            diagnostics::error_message(format!(
                "{} is missing required column(s): {}",
                path.display(),
                missing.join(", ")
            ))
        );
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| {
            diagnostics::error_message(format!("read record in {}", path.display()))
        })?;
        let lno = record.position().map(|p| p.line()).unwrap_or_default();

        let row: ResultRow = record.deserialize(Some(&headers)).with_context(|| {
            diagnostics::error_message(format!(
                "results parse error at {}:{}: {:?}",
                path.display(),
                lno,
                record.iter().collect::<Vec<_>>().join(",")
            ))
        })?;

        if row.threads == 0 {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "thread count must be positive at {}:{}",
                    path.display(),
                    lno
                ))
            );
        }

        rows.push(row);
    }

    if rows.is_empty() {
        bail!(
            "{}",
            diagnostics::error_message(format!("{} contains no data rows", path.display()))
        );
    }

    Ok(ResultTable::new(rows))
}

/// True when the error chain bottoms out in a "file not found" I/O error.
pub fn is_missing_input(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
    })
}

/// Notes about table shapes the report tolerates but cannot chart cleanly.
pub fn inspect_table(table: &ResultTable) -> Vec<String> {
    let mut notes = Vec::new();

    let mut seen = BTreeSet::new();
    let mut dups = BTreeSet::new();
    for row in table.iter() {
        if !seen.insert(row.threads) {
            dups.insert(row.threads);
        }
    }
    if !dups.is_empty() {
        let list: Vec<String> = dups.iter().map(|t| t.to_string()).collect();
        notes.push(format!("duplicate thread counts: {}", list.join(", ")));
    }

    let increasing = table.rows.windows(2).all(|w| w[0].threads < w[1].threads);
    if dups.is_empty() && !increasing {
        notes.push("thread counts are not in increasing order; lines follow input order".into());
    }

    if table.len() < 2 {
        notes.push(format!(
            "only {} row(s); scaling charts need at least two thread counts",
            table.len()
        ));
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("results.csv");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_rows_in_input_order_and_ignores_extra_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "Threads,Runtime(s),Speedup,Min,Max,Mean\n\
             1,10.000000,1.0000,0,1000000000,500000000.12\n\
             2,5.200000,1.9200,0,1000000000,500000000.12\n\
             4,2.900000,3.4500,0,1000000000,500000000.12\n",
        );

        let table = load_results_file(&path).unwrap();
        assert_eq!(
            table.rows,
            vec![
                ResultRow::new(1, 10.0, 1.0),
                ResultRow::new(2, 5.2, 1.92),
                ResultRow::new(4, 2.9, 3.45),
            ]
        );
    }

    #[test]
    fn tolerates_whitespace_around_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Threads, Runtime(s), Speedup\n 1 , 3.5 , 1.0\n");
        let table = load_results_file(&path).unwrap();
        assert_eq!(table.rows, vec![ResultRow::new(1, 3.5, 1.0)]);
    }

    #[test]
    fn missing_file_is_recognised() {
        let dir = TempDir::new().unwrap();
        let err = load_results_file(&dir.path().join("results.csv")).unwrap_err();
        assert!(is_missing_input(&err));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Threads,Speedup\n1,1.0\n");
        let err = load_results_file(&path).unwrap_err();
        assert!(!is_missing_input(&err));
        assert!(format!("{:#}", err).contains("Runtime(s)"));
    }

    #[test]
    fn non_numeric_value_names_the_line() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Threads,Runtime(s),Speedup\n1,10.0,1.0\n2,fast,1.9\n");
        let err = load_results_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains(":3"));
    }

    #[test]
    fn zero_threads_and_empty_tables_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Threads,Runtime(s),Speedup\n0,10.0,1.0\n");
        assert!(load_results_file(&path).is_err());

        let path = write_csv(&dir, "Threads,Runtime(s),Speedup\n");
        let err = load_results_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("no data rows"));
    }

    #[test]
    fn inspect_flags_duplicates_disorder_and_short_tables() {
        let sorted = ResultTable::new(vec![
            ResultRow::new(1, 10.0, 1.0),
            ResultRow::new(2, 5.0, 2.0),
        ]);
        assert!(inspect_table(&sorted).is_empty());

        let dup = ResultTable::new(vec![
            ResultRow::new(1, 10.0, 1.0),
            ResultRow::new(2, 5.0, 2.0),
            ResultRow::new(2, 5.1, 1.96),
        ]);
        assert_eq!(
            inspect_table(&dup),
            vec!["duplicate thread counts: 2".to_string()]
        );

        let unsorted = ResultTable::new(vec![
            ResultRow::new(4, 3.0, 3.3),
            ResultRow::new(1, 10.0, 1.0),
        ]);
        assert_eq!(inspect_table(&unsorted).len(), 1);

        let single = ResultTable::new(vec![ResultRow::new(1, 10.0, 1.0)]);
        assert_eq!(
            inspect_table(&single),
            vec!["only 1 row(s); scaling charts need at least two thread counts".to_string()]
        );
    }
}
