//! Storage layer: comma-separated metric export, YAML config I/O.

use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{LagerError, Result};

// ─── Delimited text ──────────────────────────────────────────────────────────

/// A re-read export: header labels plus one `Vec` per data line.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub labels: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

/// Write the header and rows as comma-separated text, truncating `path`.
///
/// Values use the shortest representation that parses back to the same
/// `f64`. Labels are written verbatim; embedded commas are not escaped.
pub fn write_csv<'a, L, R, I>(path: &Path, labels: &[L], rows: R) -> Result<usize>
where
    L: AsRef<str>,
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = &'a f64>,
{
    let file = fs::File::create(path)?;
    let mut out = BufWriter::new(file);

    let header: Vec<&str> = labels.iter().map(|l| l.as_ref()).collect();
    writeln!(out, "{}", header.join(","))?;

    let mut written = 0;
    for row in rows {
        writeln!(out, "{}", format_row(row, ","))?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

/// Read back a file produced by [`write_csv`].
pub fn read_csv(path: &Path) -> Result<Table> {
    let file = fs::File::open(path)?;
    let mut lines = BufReader::new(file).lines();

    let labels: Vec<String> = match lines.next() {
        Some(header) => header?.split(',').map(str::to_string).collect(),
        None => {
            return Err(LagerError::Parse {
                line: 1,
                message: "missing header".to_string(),
            })
        }
    };

    let mut rows = vec![];
    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line_no = idx + 2;
        if line.is_empty() {
            continue;
        }
        let row = line
            .split(',')
            .map(|field| {
                field.trim().parse::<f64>().map_err(|e| LagerError::Parse {
                    line: line_no,
                    message: format!("{field:?}: {e}"),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        if row.len() != labels.len() {
            return Err(LagerError::Parse {
                line: line_no,
                message: format!("expected {} fields, got {}", labels.len(), row.len()),
            });
        }
        rows.push(row);
    }

    Ok(Table { labels, rows })
}

pub(crate) fn format_row<'a>(row: impl IntoIterator<Item = &'a f64>, sep: &str) -> String {
    row.into_iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(sep)
}

// ─── YAML config I/O ─────────────────────────────────────────────────────────

pub fn save_yaml<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = serde_yaml::to_string(data)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T>
where
    T: Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)?;
    let val = serde_yaml::from_str(&content)?;
    Ok(val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_row_keeps_decimal_point() {
        assert_eq!(format_row(&[1.0, 0.5, -2.25], ","), "1.0,0.5,-2.25");
        assert_eq!(format_row(&[3.0, 4.0], ", "), "3.0, 4.0");
    }

    #[test]
    fn read_csv_rejects_ragged_rows() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("ragged.csv");
        fs::write(&path, "a,b\n1.0,2.0\n3.0\n").unwrap();

        match read_csv(&path) {
            Err(LagerError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn read_csv_rejects_non_numeric_fields() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("bad.csv");
        fs::write(&path, "a\nnope\n").unwrap();

        assert!(matches!(read_csv(&path), Err(LagerError::Parse { line: 2, .. })));
    }
}
