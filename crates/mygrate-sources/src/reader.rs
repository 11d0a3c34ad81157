//! Shared header-driven CSV reading.
//!
//! Columns are located by header name, so column order in the extract does
//! not matter and unknown columns are ignored. Header names are trimmed;
//! cell values are returned exactly as written.

use crate::SourceError;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column positions resolved from a header row.
pub struct Columns<'a> {
    file: &'a str,
    headers: StringRecord,
}

impl<'a> Columns<'a> {
    pub fn new(file: &'a str, headers: StringRecord) -> Self {
        Self { file, headers }
    }

    /// Index of a column that must exist.
    pub fn required(&self, column: &'static str) -> Result<usize, SourceError> {
        self.optional(column).ok_or_else(|| SourceError::MissingColumn {
            file: self.file.to_string(),
            column,
        })
    }

    pub fn optional(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }
}

/// One data row plus its 1-based line number.
pub struct Record {
    pub row: StringRecord,
    pub line: u64,
}

impl Record {
    /// Value of a resolved column; an absent trailing cell reads as empty.
    pub fn get(&self, idx: usize) -> String {
        self.row.get(idx).unwrap_or_default().to_string()
    }

    /// Value of an optional column, `None` when absent or empty.
    pub fn get_opt(&self, idx: Option<usize>) -> Option<String> {
        idx.and_then(|i| self.row.get(i))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

pub fn open(path: &Path) -> Result<File, SourceError> {
    File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read every row of `input`. `resolve` runs once against the header row
/// (so a missing column fails even for an empty extract), then `build` turns
/// each record into a value using whatever `resolve` returned.
pub fn read_rows<R, I, T>(
    input: R,
    file: &str,
    resolve: impl FnOnce(&Columns<'_>) -> Result<I, SourceError>,
    build: impl Fn(&I, Record) -> T,
) -> Result<Vec<T>, SourceError>
where
    R: Read,
{
    let csv_err = |source| SourceError::Csv {
        file: file.to_string(),
        source,
    };

    let mut reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(input);
    let headers = reader.headers().map_err(csv_err)?.clone();
    let layout = resolve(&Columns::new(file, headers))?;

    let mut out = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_err)?;
        let line = row.position().map_or(0, |p| p.line());
        out.push(build(&layout, Record { row, line }));
    }
    tracing::debug!(file, rows = out.len(), "read extract");
    Ok(out)
}
