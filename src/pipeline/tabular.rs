//! Tabular summarizer
//!
//! CSV via the `csv` crate, Excel via calamine, JSON (array of objects) via
//! serde_json. All three formats feed one [`TableScan`] accumulator, which
//! produces the row/column shape, per-column missing-value counts, and
//! count/mean/min/max for columns whose values are numeric.
//!
//! Statistics and missing-value counts are computed over at most
//! [`STATS_ROW_CAP`] rows so an arbitrarily large upload cannot stall the
//! pipeline; row counting continues past the cap.

use super::summary::{NumericStats, TabularSummary};
use calamine::{open_workbook, Data, DataType, Range, Reader, Xls, Xlsx};
use std::collections::BTreeMap;
use std::path::Path;

/// Rows scanned for missing-value counts and numeric statistics.
const STATS_ROW_CAP: usize = 10_000;

/// Summarize a stored tabular file. The extension decides the parser.
pub fn summarize(path: &Path, data: &[u8]) -> Result<TabularSummary, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    match ext.as_deref() {
        Some("csv") => summarize_csv(data),
        Some("xlsx") => {
            let workbook: Xlsx<_> =
                open_workbook(path).map_err(|e| format!("Failed to open XLSX: {}", e))?;
            summarize_workbook(workbook)
        }
        Some("xls") => {
            let workbook: Xls<_> =
                open_workbook(path).map_err(|e| format!("Failed to open XLS: {}", e))?;
            summarize_workbook(workbook)
        }
        Some("json") => summarize_json(data),
        other => Err(format!("Unsupported tabular format: {:?}", other)),
    }
}

fn summarize_csv(data: &[u8]) -> Result<TabularSummary, String> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read CSV header: {}", e))?;
    if headers.is_empty() {
        return Err("CSV file has no header row".to_string());
    }
    let columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    let mut scan = TableScan::new(columns);
    for record in reader.records() {
        let record = record.map_err(|e| format!("Failed to parse CSV row: {}", e))?;
        scan.row(|i| match record.get(i) {
            None => Cell::Missing,
            Some(raw) => Cell::from_str(raw),
        });
    }

    Ok(scan.finish())
}

fn summarize_workbook<R>(mut workbook: R) -> Result<TabularSummary, String>
where
    R: Reader<std::io::BufReader<std::fs::File>>,
    R::Error: std::fmt::Display,
{
    // First sheet only; multi-sheet workbooks are summarized by their
    // primary sheet.
    let range: Range<Data> = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "Workbook contains no sheets".to_string())?
        .map_err(|e| format!("Failed to read worksheet: {}", e))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| "Worksheet is empty".to_string())?;
    let columns: Vec<String> = header.iter().map(|c| c.to_string()).collect();

    let mut scan = TableScan::new(columns);
    for row in rows {
        scan.row(|i| match row.get(i) {
            None | Some(Data::Empty) => Cell::Missing,
            Some(cell) => match cell.as_f64() {
                Some(n) => Cell::Number(n),
                None => Cell::from_str(&cell.to_string()),
            },
        });
    }

    Ok(scan.finish())
}

fn summarize_json(data: &[u8]) -> Result<TabularSummary, String> {
    let value: serde_json::Value =
        serde_json::from_slice(data).map_err(|e| format!("Failed to parse JSON: {}", e))?;

    let records = value
        .as_array()
        .ok_or_else(|| "Expected a JSON array of objects".to_string())?;

    // Column order = first-seen key order across records.
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        let object = record
            .as_object()
            .ok_or_else(|| "Expected a JSON array of objects".to_string())?;
        for key in object.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    if columns.is_empty() {
        return Err("JSON array contains no object keys".to_string());
    }

    let mut scan = TableScan::new(columns.clone());
    for record in records {
        let object = record.as_object().expect("validated above");
        scan.row(|i| match object.get(&columns[i]) {
            None | Some(serde_json::Value::Null) => Cell::Missing,
            Some(serde_json::Value::Number(n)) => match n.as_f64() {
                Some(n) => Cell::Number(n),
                None => Cell::Missing,
            },
            Some(serde_json::Value::String(s)) => Cell::from_str(s),
            Some(_) => Cell::Text,
        });
    }

    Ok(scan.finish())
}

enum Cell {
    Missing,
    Number(f64),
    Text,
}

impl Cell {
    fn from_str(raw: &str) -> Cell {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Missing
        } else if let Ok(n) = trimmed.parse::<f64>() {
            Cell::Number(n)
        } else {
            Cell::Text
        }
    }
}

/// Streaming accumulator shared by all tabular parsers.
struct TableScan {
    columns: Vec<String>,
    rows: usize,
    missing: Vec<usize>,
    numeric: Vec<NumericAcc>,
}

#[derive(Default, Clone)]
struct NumericAcc {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
    saw_text: bool,
}

impl TableScan {
    fn new(columns: Vec<String>) -> Self {
        let n = columns.len();
        Self {
            columns,
            rows: 0,
            missing: vec![0; n],
            numeric: vec![NumericAcc::default(); n],
        }
    }

    /// Feed one row; `cell(i)` yields the value for column `i`.
    fn row(&mut self, cell: impl Fn(usize) -> Cell) {
        self.rows += 1;
        if self.rows > STATS_ROW_CAP {
            return;
        }
        for i in 0..self.columns.len() {
            match cell(i) {
                Cell::Missing => self.missing[i] += 1,
                Cell::Number(n) => {
                    let acc = &mut self.numeric[i];
                    if acc.count == 0 {
                        acc.min = n;
                        acc.max = n;
                    } else {
                        acc.min = acc.min.min(n);
                        acc.max = acc.max.max(n);
                    }
                    acc.count += 1;
                    acc.sum += n;
                }
                Cell::Text => self.numeric[i].saw_text = true,
            }
        }
    }

    fn finish(self) -> TabularSummary {
        let mut missing_values = BTreeMap::new();
        let mut numeric_stats = BTreeMap::new();

        for (i, name) in self.columns.iter().enumerate() {
            missing_values.insert(name.clone(), self.missing[i]);

            let acc = &self.numeric[i];
            // A column counts as numeric when every non-missing scanned cell
            // parsed as a number.
            if acc.count > 0 && !acc.saw_text {
                numeric_stats.insert(
                    name.clone(),
                    NumericStats {
                        count: acc.count,
                        mean: acc.sum / acc.count as f64,
                        min: acc.min,
                        max: acc.max,
                    },
                );
            }
        }

        TabularSummary {
            rows: self.rows,
            columns: self.columns,
            missing_values,
            numeric_stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn csv_path() -> PathBuf {
        PathBuf::from("whatever.csv")
    }

    #[test]
    fn test_csv_shape_and_missing_values() {
        // 10 data rows, 3 columns, one missing value in "score".
        let mut data = String::from("name,age,score\n");
        for i in 0..10 {
            if i == 4 {
                data.push_str(&format!("person{},{},\n", i, 20 + i));
            } else {
                data.push_str(&format!("person{},{},{}\n", i, 20 + i, i * 10));
            }
        }

        let summary = summarize(&csv_path(), data.as_bytes()).unwrap();
        assert_eq!(summary.rows, 10);
        assert_eq!(summary.columns.len(), 3);
        assert_eq!(summary.missing_values["score"], 1);
        assert_eq!(summary.missing_values["name"], 0);
    }

    #[test]
    fn test_csv_numeric_stats() {
        let data = b"city,temp\nberlin,10\nparis,20\nrome,30\n";
        let summary = summarize(&csv_path(), data).unwrap();

        let stats = &summary.numeric_stats["temp"];
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
        assert!((stats.mean - 20.0).abs() < f64::EPSILON);
        // Text column gets no stats.
        assert!(!summary.numeric_stats.contains_key("city"));
    }

    #[test]
    fn test_csv_mixed_column_is_not_numeric() {
        let data = b"val\n1\ntwo\n3\n";
        let summary = summarize(&csv_path(), data).unwrap();
        assert!(!summary.numeric_stats.contains_key("val"));
    }

    #[test]
    fn test_empty_csv_is_an_error() {
        let err = summarize(&csv_path(), b"").unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn test_json_array_of_objects() {
        let data = br#"[
            {"a": 1, "b": "x"},
            {"a": 2},
            {"a": 3, "b": "y"}
        ]"#;
        let summary = summarize(&PathBuf::from("data.json"), data).unwrap();

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.columns, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(summary.missing_values["b"], 1);
        assert_eq!(summary.numeric_stats["a"].mean, 2.0);
    }

    #[test]
    fn test_json_non_array_is_an_error() {
        let err = summarize(&PathBuf::from("data.json"), b"{\"a\": 1}").unwrap_err();
        assert!(err.contains("array"));
    }

    #[test]
    fn test_corrupt_xlsx_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        let err = summarize(&path, b"not a zip archive").unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn test_row_count_continues_past_stats_cap() {
        let mut data = String::from("n\n");
        for i in 0..(STATS_ROW_CAP + 5) {
            data.push_str(&format!("{}\n", i));
        }
        let summary = summarize(&csv_path(), data.as_bytes()).unwrap();
        assert_eq!(summary.rows, STATS_ROW_CAP + 5);
        assert_eq!(summary.numeric_stats["n"].count, STATS_ROW_CAP);
    }
}
