//! The declared feature contract.
//!
//! The classifier addresses its inputs by name. These are the names it was
//! trained against; a feature table must carry every one of them, in any
//! column position, before it can be scored.

use ahash::AHashSet;
use polars::prelude::*;

/// Per-caller depth, allele-count, VAF and quality features, the caller
/// verdict flags, and the Mutect filter tags seen in training data.
pub const TECHNICAL_FEATURES: [&str; 21] = [
    "t_depth_LoFreq",
    "t_alt_count_LoFreq",
    "t_ref_count_LoFreq",
    "Tumor_VAF_LoFreq",
    "variant_qual_LoFreq",
    "t_depth_Mutect",
    "t_alt_count_Mutect",
    "t_ref_count_Mutect",
    "Tumor_VAF_Mutect",
    "FILTER_Mutect_feature",
    "FILTER_LoFreq_feature",
    "base_qual",
    "clustered_events",
    "germline",
    "haplotype",
    "map_qual",
    "multiallelic",
    "orientation",
    "position",
    "strand_bias",
    "weak_evidence",
];

/// Encoded categorical annotations and gnomAD genome allele frequencies.
pub const ANNOTATION_FEATURES: [&str; 16] = [
    "Variant_Classification_feature",
    "Reference_Allele_feature",
    "Tumor_Seq_Allele2_feature",
    "5prime_feature",
    "3prime_feature",
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

/// The full feature vector in canonical order: technical, then annotation.
pub fn declared_features() -> Vec<String> {
    TECHNICAL_FEATURES
        .iter()
        .chain(ANNOTATION_FEATURES.iter())
        .map(|name| name.to_string())
        .collect()
}

/// Adds an all-zero column for every name in `names` that `df` does not
/// already have. Existing columns are left untouched, whatever they contain.
///
/// Returns the names that had to be synthesized, in the order given.
pub fn backfill_columns<S: AsRef<str>>(
    df: &mut DataFrame,
    names: &[S],
) -> PolarsResult<Vec<String>> {
    let present: AHashSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    let height = df.height();
    let mut synthesized = Vec::new();
    for name in names {
        let name: &str = name.as_ref();
        if present.contains(name) || synthesized.iter().any(|s: &String| s == name) {
            continue;
        }
        df.with_column(Series::new(name.into(), vec![0i32; height]))?;
        synthesized.push(name.to_string());
    }
    Ok(synthesized)
}
