//! Caller FILTER-string features.
//!
//! Two kinds of feature come out of a caller's FILTER column:
//!
//! - a verdict flag, `1` only when the whole string is exactly `PASS`;
//! - one indicator column per filter tag the caller used anywhere in the
//!   table.
//!
//! Tag columns are data-derived, so building them takes two passes over the
//! column. [`FilterFlagSet::discover`] folds the whole column into the sorted
//! set of tag names; [`FilterFlagSet::expand`] then encodes every row against
//! that fixed set. The set is an ordinary value handed from one pass to the
//! next.

use polars::prelude::*;
use std::collections::BTreeSet;

/// The verdict a caller writes for a call that cleared every filter.
pub const FILTER_PASS: &str = "PASS";

pub const FILTER_SEPARATOR: char = ';';

/// `1` where the filter string is exactly `PASS`, `0` otherwise (including
/// absent cells and `PASS` combined with other tags).
pub fn verdict_flag(values: &StringChunked, name: &str) -> Series {
    let flags: Int32Chunked = values
        .into_iter()
        .map(|value| Some(i32::from(value == Some(FILTER_PASS))))
        .collect();
    flags.with_name(name.into()).into_series()
}

fn tokens(filter: &str) -> impl Iterator<Item = &str> {
    filter
        .split(FILTER_SEPARATOR)
        .filter(|token| !token.is_empty())
}

/// The sorted, de-duplicated non-`PASS` tags of one caller's FILTER column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterFlagSet {
    flags: BTreeSet<String>,
}

impl FilterFlagSet {
    /// Phase one: scan every row and collect the tag vocabulary.
    pub fn discover(values: &StringChunked) -> Self {
        let flags = values
            .into_iter()
            .flatten()
            .flat_map(tokens)
            .filter(|token| *token != FILTER_PASS)
            .map(str::to_string)
            .collect();
        Self { flags }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    /// Phase two: one `0`/`1` column per tag, in sorted tag order. Rows with
    /// an absent filter string get `0` in every column.
    pub fn expand(&self, values: &StringChunked) -> Vec<Series> {
        let height = values.len();
        let mut columns: Vec<Vec<i32>> = vec![Vec::with_capacity(height); self.flags.len()];

        for value in values.into_iter() {
            let row_tokens: Vec<&str> = value.map(|v| tokens(v).collect()).unwrap_or_default();
            for (flag, column) in self.flags.iter().zip(columns.iter_mut()) {
                column.push(i32::from(row_tokens.contains(&flag.as_str())));
            }
        }

        self.flags
            .iter()
            .zip(columns)
            .map(|(flag, column)| Series::new(flag.as_str().into(), column))
            .collect()
    }
}
