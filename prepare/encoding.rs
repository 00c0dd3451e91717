//! Fixed categorical encodings for annotation fields.
//!
//! Codes are the integers the classifier was trained on. A value outside a
//! table encodes to null, never to a code, so "unknown category" stays
//! distinguishable from category 0.

use polars::prelude::*;

/// MAF `Variant_Classification` categories known to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum VariantClassification {
    MissenseMutation = 0,
    Silent = 1,
    Intron = 2,
    NonsenseMutation = 3,
    ThreePrimeUtr = 4,
    FivePrimeFlank = 5,
    SpliceRegion = 6,
    FivePrimeUtr = 7,
    SpliceSite = 8,
    ThreePrimeFlank = 9,
    Igr = 10,
    TranslationStartSite = 11,
    TargetedRegion = 12,
    Rna = 13,
    InFrameIns = 14,
    NonstopMutation = 15,
}

impl VariantClassification {
    pub const ALL: [VariantClassification; 16] = [
        Self::MissenseMutation,
        Self::Silent,
        Self::Intron,
        Self::NonsenseMutation,
        Self::ThreePrimeUtr,
        Self::FivePrimeFlank,
        Self::SpliceRegion,
        Self::FivePrimeUtr,
        Self::SpliceSite,
        Self::ThreePrimeFlank,
        Self::Igr,
        Self::TranslationStartSite,
        Self::TargetedRegion,
        Self::Rna,
        Self::InFrameIns,
        Self::NonstopMutation,
    ];

    /// The label as written in the annotation column.
    pub fn label(self) -> &'static str {
        match self {
            Self::MissenseMutation => "Missense_Mutation",
            Self::Silent => "Silent",
            Self::Intron => "Intron",
            Self::NonsenseMutation => "Nonsense_Mutation",
            Self::ThreePrimeUtr => "3'UTR",
            Self::FivePrimeFlank => "5'Flank",
            Self::SpliceRegion => "Splice_Region",
            Self::FivePrimeUtr => "5'UTR",
            Self::SpliceSite => "Splice_Site",
            Self::ThreePrimeFlank => "3'Flank",
            Self::Igr => "IGR",
            Self::TranslationStartSite => "Translation_Start_Site",
            Self::TargetedRegion => "Targeted_Region",
            Self::Rna => "RNA",
            Self::InFrameIns => "In_Frame_Ins",
            Self::NonstopMutation => "Nonstop_Mutation",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|vc| vc.label() == label)
    }

    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Nucleotide {
    A = 0,
    T = 1,
    C = 2,
    G = 3,
}

impl Nucleotide {
    /// Only a single uppercase base is recognised; `N`, lowercase, indels and
    /// multi-base alleles are all unknown.
    pub fn from_allele(allele: &str) -> Option<Self> {
        match allele {
            "A" => Some(Self::A),
            "T" => Some(Self::T),
            "C" => Some(Self::C),
            "G" => Some(Self::G),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }
}

pub fn encode_variant_classification(value: &str) -> Option<i32> {
    VariantClassification::from_label(value).map(VariantClassification::code)
}

pub fn encode_nucleotide(value: &str) -> Option<i32> {
    Nucleotide::from_allele(value).map(Nucleotide::code)
}

/// Maps every cell of `values` through `encode` into a nullable integer
/// column named `name`. Absent cells stay absent.
pub fn encode_column(
    values: &StringChunked,
    name: &str,
    encode: impl Fn(&str) -> Option<i32>,
) -> Series {
    let encoded: Int32Chunked = values
        .into_iter()
        .map(|value| value.and_then(&encode))
        .collect();

    let unmapped = encoded.null_count() - values.null_count();
    if unmapped > 0 {
        log::debug!("{name}: {unmapped} values outside the encoding table set to missing");
    }
    encoded.with_name(name.into()).into_series()
}
