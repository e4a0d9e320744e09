use std::fmt::{self, Display};

use serde::{Serialize, Serializer};

use crate::reference::{Effect, Gene};

///
/// Metabolizer phenotype.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Phenotype {
    #[serde(rename = "PM")]
    Poor,
    #[serde(rename = "IM")]
    Intermediate,
    #[serde(rename = "NM")]
    Normal,
    #[serde(rename = "RM")]
    Rapid,
    #[serde(rename = "URM")]
    Ultrarapid,
    Unknown,
}

impl Phenotype {
    pub const ALL: [Phenotype; 6] = [
        Phenotype::Poor,
        Phenotype::Intermediate,
        Phenotype::Normal,
        Phenotype::Rapid,
        Phenotype::Ultrarapid,
        Phenotype::Unknown,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            Phenotype::Poor => "PM",
            Phenotype::Intermediate => "IM",
            Phenotype::Normal => "NM",
            Phenotype::Rapid => "RM",
            Phenotype::Ultrarapid => "URM",
            Phenotype::Unknown => "Unknown",
        }
    }
}

impl Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageQuality {
    Good,
    Limited,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ClinicalSignificance {
    #[serde(rename = "Loss of function")]
    LossOfFunction,
    #[serde(rename = "Reduced function")]
    ReducedFunction,
    #[serde(rename = "Increased function")]
    IncreasedFunction,
    Unknown,
}

impl From<Option<Effect>> for ClinicalSignificance {
    fn from(effect: Option<Effect>) -> Self {
        match effect {
            Some(Effect::Null) => ClinicalSignificance::LossOfFunction,
            Some(Effect::Decreased) => ClinicalSignificance::ReducedFunction,
            Some(Effect::Increased) => ClinicalSignificance::IncreasedFunction,
            Some(Effect::Normal) | None => ClinicalSignificance::Unknown,
        }
    }
}

///
/// A pair of star alleles. Always exactly two non-empty alleles.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diplotype {
    first: String,
    second: String,
}

pub const REFERENCE_ALLELE: &str = "*1";

///
/// Split an allele token that may itself be a diplotype (`*1/*4`, `*1|*4`)
/// into its non-empty, trimmed pieces.
///
pub fn split_alleles(token: &str) -> impl Iterator<Item = &str> {
    token
        .split(['/', '|'])
        .map(str::trim)
        .filter(|allele| !allele.is_empty())
}

impl Diplotype {
    pub fn reference() -> Self {
        Diplotype {
            first: REFERENCE_ALLELE.to_string(),
            second: REFERENCE_ALLELE.to_string(),
        }
    }

    ///
    /// Build a diplotype from any number of alleles: tokens are split on the
    /// `/` and `|` separators, empty pieces are dropped, missing alleles are
    /// filled with `*1` and anything past the second allele is discarded.
    ///
    pub fn from_alleles<I, S>(alleles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut alleles = alleles
            .into_iter()
            .map(Into::into)
            .flat_map(|token| {
                split_alleles(&token)
                    .map(str::to_string)
                    .collect::<Vec<String>>()
            });

        let first = alleles.next().unwrap_or_else(|| REFERENCE_ALLELE.to_string());
        let second = alleles.next().unwrap_or_else(|| REFERENCE_ALLELE.to_string());

        Diplotype { first, second }
    }

    pub fn alleles(&self) -> [&str; 2] {
        [self.first.as_str(), self.second.as_str()]
    }
}

impl Display for Diplotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first, self.second)
    }
}

impl Serialize for Diplotype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

///
/// A variant record selected for a drug, enriched with reference-table data.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetectedVariant {
    #[serde(serialize_with = "crate::utils::serialize_or_unknown_lowercase")]
    pub rsid: Option<String>,
    pub gene: String,
    pub chromosome: String,
    pub position: Option<u64>,
    pub reference: String,
    pub alternate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub star_allele: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genotype: Option<String>,
    pub clinical_significance: ClinicalSignificance,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PharmacogenomicProfile {
    #[serde(serialize_with = "crate::utils::serialize_or_unknown")]
    pub primary_gene: Option<Gene>,
    pub diplotype: Diplotype,
    pub phenotype: Phenotype,
    pub detected_variants: Vec<DetectedVariant>,
    pub coverage_quality: CoverageQuality,
}

impl PharmacogenomicProfile {
    ///
    /// Profile used when nothing can be said about the drug.
    ///
    pub fn unknown() -> Self {
        PharmacogenomicProfile {
            primary_gene: None,
            diplotype: Diplotype::reference(),
            phenotype: Phenotype::Unknown,
            detected_variants: Vec::new(),
            coverage_quality: CoverageQuality::Limited,
        }
    }
}
