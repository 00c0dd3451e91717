//! Numeric cleanup of caller quality and population-frequency fields.
//!
//! Callers write `.` for "no value". What that marker means depends on the
//! field group, and the classifier was trained on each group's reading:
//!
//! | group              | `.`   | absent | unparsable |
//! |--------------------|-------|--------|------------|
//! | variant quality    | `0.0` | `0.0`  | `0.0`      |
//! | gnomAD frequencies | `0.0` | `-1.0` | `-1.0`     |
//!
//! Low quality and unknown quality are indistinguishable after cleanup. For
//! frequencies, an explicit zero, a marker and an absent cell stay three
//! separate cases.

use polars::prelude::*;

/// The caller's placeholder for a field with no value.
pub const MISSING_MARKER: &str = ".";

/// Sentinel for a population frequency that was absent from the input.
pub const ABSENT_FREQUENCY: f64 = -1.0;

pub const QUALITY_COLUMNS: [&str; 2] = ["variant_qual_LoFreq", "variant_qual_Mutect"];

pub const POPULATION_AF_COLUMNS: [&str; 11] = [
    "gnomADg_AF",
    "gnomADg_AF_raw",
    "gnomADg_AF_popmax",
    "gnomADg_AF_afr",
    "gnomADg_AF_amr",
    "gnomADg_AF_eas",
    "gnomADg_AF_fin",
    "gnomADg_AF_nfe",
    "gnomADg_AF_asj",
    "gnomADg_AF_sas",
    "gnomADg_AF_oth",
];

/// How one field group reads the three kinds of non-numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MissingPolicy {
    marker: f64,
    absent: f64,
    unparsable: f64,
}

const QUALITY_POLICY: MissingPolicy = MissingPolicy {
    marker: 0.0,
    absent: 0.0,
    unparsable: 0.0,
};

const FREQUENCY_POLICY: MissingPolicy = MissingPolicy {
    marker: 0.0,
    absent: ABSENT_FREQUENCY,
    unparsable: ABSENT_FREQUENCY,
};

pub fn clean_quality(values: &StringChunked, name: &str) -> Series {
    apply_policy(values, name, QUALITY_POLICY)
}

pub fn clean_population_frequency(values: &StringChunked, name: &str) -> Series {
    apply_policy(values, name, FREQUENCY_POLICY)
}

fn apply_policy(values: &StringChunked, name: &str, policy: MissingPolicy) -> Series {
    let mut malformed = 0usize;
    let cleaned: Float64Chunked = values
        .into_iter()
        .map(|value| {
            Some(match value {
                None => policy.absent,
                Some(MISSING_MARKER) => policy.marker,
                Some(text) => text.trim().parse::<f64>().unwrap_or_else(|_| {
                    malformed += 1;
                    policy.unparsable
                }),
            })
        })
        .collect();

    if malformed > 0 {
        log::warn!(
            "{name}: {malformed} non-numeric values replaced with {}",
            policy.unparsable
        );
    }
    cleaned.with_name(name.into()).into_series()
}
