//! # Scorer / Labeler
//!
//! Scores every row of a feature table with a trained classifier and labels
//! it against a probability threshold. The input table keeps all of its
//! columns; `Probability_score` and `Label` are appended.
//!
//! The scorer does not trust its input to be complete. Classifier features
//! absent from the table are added as zero columns, and any cell that is
//! absent or not a number is read as `0` just before inference. Both are
//! tolerated conditions, not errors.

pub mod model;

use crate::shared::schema::backfill_columns;
use itertools::Itertools;
use model::{ModelError, ProbabilityClassifier};
use ndarray::Array2;
use polars::prelude::*;
use thiserror::Error;

pub const PROBABILITY_COLUMN: &str = "Probability_score";
pub const LABEL_COLUMN: &str = "Label";
pub const PASS_LABEL: &str = "PASS";
/// Label for rows at or below the threshold: absence of a label, not a
/// negative class.
pub const NO_LABEL: &str = "";
pub const DEFAULT_THRESHOLD: f64 = 0.3;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Error from the underlying Polars DataFrame library: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Classifier error: {0}")]
    ModelError(#[from] ModelError),
    #[error("Classifier returned {found} probabilities for {expected} rows.")]
    PredictionLengthMismatch { found: usize, expected: usize },
}

/// `PASS` only when `probability` is strictly above `threshold`.
///
/// The threshold is not range-checked: a value outside `[0, 1]` simply
/// labels every row or none.
#[inline]
pub fn label_for(probability: f64, threshold: f64) -> &'static str {
    if probability > threshold {
        PASS_LABEL
    } else {
        NO_LABEL
    }
}

/// Scores and labels every row of `df`.
pub fn score_and_label<C: ProbabilityClassifier + ?Sized>(
    mut df: DataFrame,
    classifier: &C,
    threshold: f64,
) -> Result<DataFrame, LabelError> {
    let features = classifier.feature_names();

    let synthesized = backfill_columns(&mut df, features)?;
    if !synthesized.is_empty() {
        log::warn!(
            "{} classifier features not found in the input table were set to 0: {}",
            synthesized.len(),
            synthesized.iter().join(", ")
        );
    }

    let matrix = feature_matrix(&df, features)?;
    log::info!(
        "Scoring {} records on {} features (threshold {threshold})",
        matrix.nrows(),
        matrix.ncols()
    );

    let probabilities = classifier.predict_proba(matrix.view())?;
    if probabilities.len() != df.height() {
        return Err(LabelError::PredictionLengthMismatch {
            found: probabilities.len(),
            expected: df.height(),
        });
    }

    let labels: Vec<&str> = probabilities
        .iter()
        .map(|&p| label_for(p, threshold))
        .collect();
    // Stored at the classifier's own precision so the written score carries
    // no spurious digits.
    let scores: Vec<f32> = probabilities.iter().map(|&p| p as f32).collect();
    df.with_column(Series::new(PROBABILITY_COLUMN.into(), scores))?;
    df.with_column(Series::new(LABEL_COLUMN.into(), labels))?;

    log::info!(
        "{} of {} records labeled {PASS_LABEL}",
        count_passed(&df)?,
        df.height()
    );
    Ok(df)
}

/// Number of rows in a labeled table whose label is `PASS`.
pub fn count_passed(df: &DataFrame) -> PolarsResult<usize> {
    let labels = df.column(LABEL_COLUMN)?.str()?;
    Ok(labels
        .into_iter()
        .filter(|label| *label == Some(PASS_LABEL))
        .count())
}

/// Builds the row-major inference matrix, columns in `features` order. Every
/// named column must exist. Absent, unparsable and NaN cells become `0`.
fn feature_matrix(df: &DataFrame, features: &[String]) -> PolarsResult<Array2<f64>> {
    let mut matrix = Array2::<f64>::zeros((df.height(), features.len()));
    for (j, name) in features.iter().enumerate() {
        let values = df.column(name)?.cast(&DataType::Float64)?;
        let mut filled = 0usize;
        for (i, value) in values.f64()?.into_iter().enumerate() {
            match value {
                Some(x) if !x.is_nan() => matrix[[i, j]] = x,
                _ => filled += 1,
            }
        }
        if filled > 0 {
            log::debug!("{name}: {filled} missing or non-numeric cells read as 0");
        }
    }
    Ok(matrix)
}
