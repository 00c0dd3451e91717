//! # Feature Builder
//!
//! Turns a merged Mutect + LoFreq call table into the feature table the
//! classifier scores. The input is a text table (see
//! [`crate::shared::table`]); the output is the same table with derived
//! feature columns added or, for the quality and frequency fields, cleaned in
//! place. Every other column passes through untouched.
//!
//! The builder never fails on the content of a cell: unknown categories,
//! markers and absent values all have a documented sentinel. It fails only
//! when a source column it derives from is missing from the table entirely.

pub mod cleanup;
pub mod encoding;
pub mod filters;

use crate::shared::schema::{backfill_columns, declared_features};
use cleanup::{POPULATION_AF_COLUMNS, QUALITY_COLUMNS, clean_population_frequency, clean_quality};
use encoding::{encode_column, encode_nucleotide, encode_variant_classification};
use filters::{FilterFlagSet, verdict_flag};
use itertools::Itertools;
use polars::prelude::*;
use thiserror::Error;

pub const FLANKING_COLUMN: &str = "flanking_bps";
pub const FIVE_PRIME_COLUMN: &str = "5prime";
pub const THREE_PRIME_COLUMN: &str = "3prime";
pub const VARIANT_CLASSIFICATION_COLUMN: &str = "Variant_Classification";
pub const REFERENCE_ALLELE_COLUMN: &str = "Reference_Allele";
pub const ALTERNATE_ALLELE_COLUMN: &str = "Tumor_Seq_Allele2";
pub const MUTECT_FILTER_COLUMN: &str = "FILTER_Mutect";
pub const LOFREQ_FILTER_COLUMN: &str = "FILTER_LoFreq";

/// Suffix appended to a source column's name to name its encoded feature.
const FEATURE_SUFFIX: &str = "_feature";

/// Position of the 5' base in the three-base flanking window.
const FIVE_PRIME_OFFSET: usize = 0;
/// Position of the 3' base in the three-base flanking window.
const THREE_PRIME_OFFSET: usize = 2;

#[derive(Error, Debug)]
pub enum PrepareError {
    #[error("Error from the underlying Polars DataFrame library: {0}")]
    PolarsError(#[from] PolarsError),
    #[error(
        "The required column '{0}' was not found in the input table. Please check spelling and case."
    )]
    ColumnNotFound(String),
}

/// Every column the builder reads. All must be present, though any of their
/// cells may be empty.
pub fn required_source_columns() -> Vec<&'static str> {
    let mut required = vec![
        FLANKING_COLUMN,
        VARIANT_CLASSIFICATION_COLUMN,
        REFERENCE_ALLELE_COLUMN,
        ALTERNATE_ALLELE_COLUMN,
    ];
    required.extend(QUALITY_COLUMNS);
    required.extend(POPULATION_AF_COLUMNS);
    required.push(MUTECT_FILTER_COLUMN);
    required.push(LOFREQ_FILTER_COLUMN);
    required
}

/// Derives the full feature set for every row of `df`.
pub fn build_features(mut df: DataFrame) -> Result<DataFrame, PrepareError> {
    for name in required_source_columns() {
        if df.get_column_index(name).is_none() {
            return Err(PrepareError::ColumnNotFound(name.to_string()));
        }
    }
    log::info!("Building features for {} records", df.height());

    // Flanking bases are kept as their own columns, then encoded with the alleles.
    let flanking = text_column(&df, FLANKING_COLUMN)?;
    df.with_column(flanking_base(&flanking, FIVE_PRIME_OFFSET, FIVE_PRIME_COLUMN))?;
    df.with_column(flanking_base(&flanking, THREE_PRIME_OFFSET, THREE_PRIME_COLUMN))?;

    let classification = text_column(&df, VARIANT_CLASSIFICATION_COLUMN)?;
    df.with_column(encode_column(
        &classification,
        &feature_name(VARIANT_CLASSIFICATION_COLUMN),
        encode_variant_classification,
    ))?;
    for source in [
        REFERENCE_ALLELE_COLUMN,
        ALTERNATE_ALLELE_COLUMN,
        FIVE_PRIME_COLUMN,
        THREE_PRIME_COLUMN,
    ] {
        let values = text_column(&df, source)?;
        df.with_column(encode_column(
            &values,
            &feature_name(source),
            encode_nucleotide,
        ))?;
    }

    for name in QUALITY_COLUMNS {
        let values = text_column(&df, name)?;
        df.with_column(clean_quality(&values, name))?;
    }
    for name in POPULATION_AF_COLUMNS {
        let values = text_column(&df, name)?;
        df.with_column(clean_population_frequency(&values, name))?;
    }

    let mutect_filter = text_column(&df, MUTECT_FILTER_COLUMN)?;
    df.with_column(verdict_flag(
        &mutect_filter,
        &feature_name(MUTECT_FILTER_COLUMN),
    ))?;
    let flag_set = FilterFlagSet::discover(&mutect_filter);
    log::info!(
        "{MUTECT_FILTER_COLUMN}: {} filter tags [{}]",
        flag_set.len(),
        flag_set.names().join(", ")
    );
    for column in flag_set.expand(&mutect_filter) {
        df.with_column(column)?;
    }

    let lofreq_filter = text_column(&df, LOFREQ_FILTER_COLUMN)?;
    df.with_column(verdict_flag(
        &lofreq_filter,
        &feature_name(LOFREQ_FILTER_COLUMN),
    ))?;

    let synthesized = backfill_columns(&mut df, &declared_features())?;
    if !synthesized.is_empty() {
        log::info!(
            "Filled {} declared features absent from this table with 0: {}",
            synthesized.len(),
            synthesized.join(", ")
        );
    }

    Ok(df)
}

fn feature_name(source: &str) -> String {
    format!("{source}{FEATURE_SUFFIX}")
}

/// Reads a column as text, whatever type it currently holds, so the builder
/// also accepts its own already-numeric output.
fn text_column(df: &DataFrame, name: &str) -> Result<StringChunked, PrepareError> {
    let column = df
        .column(name)
        .map_err(|_| PrepareError::ColumnNotFound(name.to_string()))?;
    let text = column.cast(&DataType::String)?;
    Ok(text.str()?.clone())
}

/// Takes the character at `offset` of every flanking window. Extraction is
/// positional: a window shorter than `offset + 1` yields an absent base.
fn flanking_base(windows: &StringChunked, offset: usize, name: &str) -> Series {
    let bases: StringChunked = windows
        .into_iter()
        .map(|window| window.and_then(|w| char_at(w, offset)))
        .collect();
    bases.with_name(name.into()).into_series()
}

fn char_at(text: &str, offset: usize) -> Option<&str> {
    text.char_indices()
        .nth(offset)
        .map(|(start, c)| &text[start..start + c.len_utf8()])
}
