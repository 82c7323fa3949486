//! Benchmark Results Loader Module
//! Parses `label,value` rows into parallel label/value sequences.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read input: {0}")]
    Read(#[source] std::io::Error),
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Line {line}: expected `label,value`, found fewer than two fields")]
    MissingValue { line: u64 },
    #[error("Line {line}: could not convert {value:?} to a number")]
    InvalidValue { line: u64, value: String },
}

/// One parsed `(label, value)` row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub label: String,
    pub value: f64,
}

/// Labels and values in file order. Both sequences always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl BenchmarkSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.labels.push(record.label);
        self.values.push(record.value);
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Load a results file. The handle is closed before this returns, on success or failure.
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<BenchmarkSeries, LoaderError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let series = parse_series(BufReader::new(file))?;
    tracing::debug!(rows = series.len(), path = %path.display(), "parsed benchmark results");
    Ok(series)
}

/// Parse comma separated `label,value` rows without a header.
///
/// Labels are kept verbatim. Fields after the second are ignored. A blank line
/// is a row without a value and fails like any other short row.
pub fn parse_series<R: Read>(mut reader: R) -> Result<BenchmarkSeries, LoaderError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(LoaderError::Read)?;

    // The csv reader drops empty lines, so find them up front
    let blank_line = first_blank_line(&bytes);

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(bytes.as_slice());

    let mut series = BenchmarkSeries::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if let Some(blank) = blank_line.filter(|&blank| blank < line) {
            return Err(LoaderError::MissingValue { line: blank });
        }

        let (Some(label), Some(raw)) = (record.get(0), record.get(1)) else {
            return Err(LoaderError::MissingValue { line });
        };

        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| LoaderError::InvalidValue {
                line,
                value: raw.to_string(),
            })?;

        series.push(Record {
            label: label.to_string(),
            value,
        });
    }

    if let Some(line) = blank_line {
        return Err(LoaderError::MissingValue { line });
    }

    Ok(series)
}

/// 1-based number of the first empty line outside a quoted field.
fn first_blank_line(bytes: &[u8]) -> Option<u64> {
    let mut line = 1;
    let mut at_line_start = true;
    let mut in_quotes = false;

    let mut iter = bytes.iter().peekable();
    while let Some(&byte) = iter.next() {
        match byte {
            b'"' => {
                in_quotes = !in_quotes;
                at_line_start = false;
            }
            b'\r' if iter.peek() == Some(&&b'\n') => {}
            b'\n' | b'\r' => {
                if at_line_start && !in_quotes {
                    return Some(line);
                }
                line += 1;
                at_line_start = true;
            }
            _ => at_line_start = false,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_results(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_keeps_file_order() {
        let series = parse_series("8MB,0.012\n16MB,0.018\n32MB,0.031\n".as_bytes()).unwrap();
        assert_eq!(series.labels(), ["8MB", "16MB", "32MB"]);
        assert_eq!(series.values(), [0.012, 0.018, 0.031]);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_parse_unsorted_input_is_not_reordered() {
        let series = parse_series("64MB,0.9\n8MB,0.01\n32MB,0.2\n".as_bytes()).unwrap();
        assert_eq!(series.labels(), ["64MB", "8MB", "32MB"]);
        assert_eq!(series.values(), [0.9, 0.01, 0.2]);
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let series = parse_series("4MB,0.5".as_bytes()).unwrap();
        assert_eq!(series.labels(), ["4MB"]);
        assert_eq!(series.values(), [0.5]);
    }

    #[test]
    fn test_labels_are_verbatim() {
        let series = parse_series(" 8 MB ,0.25\n".as_bytes()).unwrap();
        assert_eq!(series.labels(), [" 8 MB "]);
    }

    #[test]
    fn test_value_whitespace_is_tolerated() {
        let series = parse_series("8MB, 0.25 \n".as_bytes()).unwrap();
        assert_eq!(series.values(), [0.25]);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let series = parse_series("8MB,0.25,run-1,extra\n".as_bytes()).unwrap();
        assert_eq!(series.labels(), ["8MB"]);
        assert_eq!(series.values(), [0.25]);
    }

    #[test]
    fn test_quoted_label_may_contain_comma() {
        let series = parse_series("\"8MB, warm\",0.25\n".as_bytes()).unwrap();
        assert_eq!(series.labels(), ["8MB, warm"]);
    }

    #[test]
    fn test_empty_input_gives_empty_series() {
        let series = parse_series("".as_bytes()).unwrap();
        assert!(series.is_empty());
        assert!(series.values().is_empty());
    }

    #[test]
    fn test_non_numeric_value_fails() {
        let err = parse_series("8MB,0.012\nenclave_128MB,N/A\n".as_bytes()).unwrap_err();
        match err {
            LoaderError::InvalidValue { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "N/A");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_value_fails() {
        let err = parse_series("8MB,\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidValue { line: 1, .. }));
    }

    #[test]
    fn test_single_field_row_fails() {
        let err = parse_series("8MB,0.1\n16MB\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingValue { line: 2 }));
    }

    #[test]
    fn test_blank_line_fails() {
        let err = parse_series("8MB,0.1\n\n16MB,0.2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingValue { line: 2 }));
    }

    #[test]
    fn test_trailing_blank_line_fails() {
        let err = parse_series("8MB,0.1\r\n\r\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingValue { line: 2 }));
    }

    #[test]
    fn test_earlier_bad_value_is_reported_before_blank_line() {
        let err = parse_series("8MB,N/A\n\n16MB,0.2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidValue { line: 1, .. }));
    }

    #[test]
    fn test_blank_line_inside_quoted_label_is_kept() {
        let series = parse_series("\"8MB\n\nwarm\",0.1\n16MB,0.2\n".as_bytes()).unwrap();
        assert_eq!(series.labels(), ["8MB\n\nwarm", "16MB"]);
    }

    #[test]
    fn test_crlf_rows_parse() {
        let series = parse_series("8MB,0.1\r\n16MB,0.2\r\n".as_bytes()).unwrap();
        assert_eq!(series.values(), [0.1, 0.2]);
    }

    #[test]
    fn test_invalid_utf8_is_csv_error() {
        let err = parse_series(&b"8MB,0.1\n\xff\xfe,0.2\n"[..]).unwrap_err();
        assert!(matches!(err, LoaderError::Csv(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("benchmark_results.txt");

        let err = load_series(&path).unwrap_err();
        match err {
            LoaderError::Io { path: reported, source } => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_is_deterministic() {
        let file = write_results("8MB,0.012\n16MB,0.018\n32MB,0.031\n");

        let first = load_series(file.path()).unwrap();
        let second = load_series(file.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_push_keeps_sequences_aligned() {
        let mut series = BenchmarkSeries::new();
        series.push(Record {
            label: "a".to_string(),
            value: 1.0,
        });
        series.push(Record {
            label: "b".to_string(),
            value: 2.0,
        });
        assert_eq!(series.labels(), ["a", "b"]);
        assert_eq!(series.values(), [1.0, 2.0]);
    }
}
