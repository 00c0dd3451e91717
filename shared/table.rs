//! # Tab-Separated Table I/O
//!
//! Every stage of the pipeline reads and writes the same kind of file: a
//! tab-separated table with a header row. This module owns that format.
//!
//! - All columns are read as text. Numeric interpretation is the job of the
//!   stage that consumes a column, because the caller missing-marker `.` has
//!   to survive until the cleanup step decides what it means.
//! - Cells equal to one of the conventional NA tokens are read as null, which
//!   is what the rest of the crate calls an *absent* value. The missing-marker
//!   `.` is deliberately not one of them.
//! - Output is staged in a sibling file and renamed into place, so a failed
//!   write never leaves a truncated table behind.

use polars::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Cell values that are read as absent: the usual NA spellings written by
/// dataframe tools that produce annotation tables.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Error from the underlying Polars DataFrame library: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("IO error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl TableError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        TableError::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Reads a tab-separated table with a header row, every column as text.
pub fn read_table(path: &Path) -> Result<DataFrame, TableError> {
    let file = File::open(path).map_err(|e| TableError::io(path, e))?;
    let null_tokens: Vec<PlSmallStr> = NA_TOKENS
        .iter()
        .map(|&token| PlSmallStr::from_static(token))
        .collect();

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| {
            options
                .with_separator(b'\t')
                .with_null_values(Some(NullValues::AllColumns(null_tokens.clone())))
        })
        .into_reader_with_file_handle(file)
        .finish()?;

    log::info!(
        "Read {} rows x {} columns from '{}'",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Writes `df` as a tab-separated table. Absent cells become empty fields and
/// nothing is quoted.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<(), TableError> {
    let staging = staging_path(path);
    let result = write_unquoted(df, &staging);
    if let Err(e) = result {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    fs::rename(&staging, path).map_err(|e| TableError::io(path, e))?;

    log::info!(
        "Wrote {} rows x {} columns to '{}'",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(())
}

fn write_unquoted(df: &mut DataFrame, path: &Path) -> Result<(), TableError> {
    let file = File::create(path).map_err(|e| TableError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    CsvWriter::new(&mut writer)
        .include_header(true)
        .with_separator(b'\t')
        .with_quote_style(QuoteStyle::Never)
        .finish(df)?;
    writer.flush().map_err(|e| TableError::io(path, e))?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_tsv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_every_column_as_text() {
        let file = create_test_tsv("t_depth_Mutect\tgnomADg_AF\n31\t0.12\n7\t.\n");
        let df = read_table(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        for column in df.get_columns() {
            assert_eq!(column.dtype(), &DataType::String);
        }
        let af = df.column("gnomADg_AF").unwrap().str().unwrap();
        assert_eq!(af.get(0), Some("0.12"));
        assert_eq!(af.get(1), Some("."));
    }

    #[test]
    fn na_tokens_read_as_absent_but_marker_survives() {
        let file = create_test_tsv("a\tb\tc\n.\tNA\t\n");
        let df = read_table(file.path()).unwrap();

        assert_eq!(df.column("a").unwrap().str().unwrap().get(0), Some("."));
        assert_eq!(df.column("b").unwrap().null_count(), 1);
        assert_eq!(df.column("c").unwrap().null_count(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_table(Path::new("/nonexistent/somalabel/input.tsv")).unwrap_err();
        assert!(matches!(err, TableError::IoError { .. }));
    }

    #[test]
    fn written_table_has_empty_fields_for_absent_cells() {
        let mut df = DataFrame::new(vec![
            Series::new("Label".into(), vec!["PASS", ""]).into(),
            Series::new("score".into(), vec![Some(0.5), None]).into(),
        ])
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.tsv");

        write_table(&mut df, &out).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Label\tscore");
        assert_eq!(lines[1], "PASS\t0.5");
        assert_eq!(lines[2], "\t");
        assert!(!staging_path(&out).exists());
    }
}
