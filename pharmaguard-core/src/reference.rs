//! Fixed pharmacogenomic reference tables.
//!
//! Every table in this module is a compile-time constant or is built once on
//! first use and never mutated afterwards. Lookups are keyed by the [Gene] and
//! [Drug] enums rather than by free-form strings, so the only place a string is
//! turned into a key is [Gene::from_symbol] / [Drug::from_str].

use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::LazyLock;

use fxhash::FxHashMap;
use serde::{Serialize, Serializer};

use crate::errors::ReferenceError;

/// Revision of the tables below. Bump whenever an entry changes.
pub const REFERENCE_TABLE_VERSION: &str = "pgx-tables-2024.1";

///
/// Pharmacogenes known to the reference tables.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gene {
    Cyp2d6,
    Cyp2c19,
    Cyp2c9,
    Slco1b1,
    Tpmt,
    Dpyd,
    Vkorc1,
}

/// Genes whose annotated records survive the parser's post-filter.
pub const TARGET_GENES: [Gene; 6] = [
    Gene::Cyp2d6,
    Gene::Cyp2c19,
    Gene::Cyp2c9,
    Gene::Slco1b1,
    Gene::Tpmt,
    Gene::Dpyd,
];

impl Gene {
    pub const fn symbol(&self) -> &'static str {
        match self {
            Gene::Cyp2d6 => "CYP2D6",
            Gene::Cyp2c19 => "CYP2C19",
            Gene::Cyp2c9 => "CYP2C9",
            Gene::Slco1b1 => "SLCO1B1",
            Gene::Tpmt => "TPMT",
            Gene::Dpyd => "DPYD",
            Gene::Vkorc1 => "VKORC1",
        }
    }

    ///
    /// Resolve a gene symbol, ignoring case.
    ///
    pub fn from_symbol(symbol: &str) -> Option<Gene> {
        let symbol = symbol.trim();
        [
            Gene::Cyp2d6,
            Gene::Cyp2c19,
            Gene::Cyp2c9,
            Gene::Slco1b1,
            Gene::Tpmt,
            Gene::Dpyd,
            Gene::Vkorc1,
        ]
        .into_iter()
        .find(|gene| gene.symbol().eq_ignore_ascii_case(symbol))
    }

    pub fn is_target(&self) -> bool {
        TARGET_GENES.contains(self)
    }

    /// Alleles with no enzyme activity for this gene.
    pub const fn null_alleles(&self) -> &'static [&'static str] {
        match self {
            Gene::Cyp2d6 => &["*4", "*5"],
            Gene::Cyp2c19 => &["*2", "*3"],
            Gene::Cyp2c9 => &["*2", "*3"],
            Gene::Tpmt => &["*2", "*3A", "*3B", "*3C"],
            Gene::Dpyd => &["*2A", "*13"],
            Gene::Slco1b1 | Gene::Vkorc1 => &[],
        }
    }

    /// Alleles with increased enzyme activity. `xN` marks a gene duplication.
    pub const fn increased_alleles(&self) -> &'static [&'static str] {
        match self {
            Gene::Cyp2d6 => &["*1xN", "*2xN"],
            Gene::Cyp2c19 => &["*17"],
            _ => &[],
        }
    }

    ///
    /// Look up a known variant of this gene by its identifier.
    ///
    pub fn known_variant(&self, rsid: &str) -> Option<&'static KnownVariant> {
        known_variant(rsid).filter(|variant| variant.gene == *self)
    }
}

impl Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Serialize for Gene {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

///
/// Drugs with pharmacogenomic rules.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Drug {
    Codeine,
    Warfarin,
    Clopidogrel,
    Simvastatin,
    Azathioprine,
    Fluorouracil,
}

impl Drug {
    pub const ALL: [Drug; 6] = [
        Drug::Codeine,
        Drug::Warfarin,
        Drug::Clopidogrel,
        Drug::Simvastatin,
        Drug::Azathioprine,
        Drug::Fluorouracil,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Drug::Codeine => "CODEINE",
            Drug::Warfarin => "WARFARIN",
            Drug::Clopidogrel => "CLOPIDOGREL",
            Drug::Simvastatin => "SIMVASTATIN",
            Drug::Azathioprine => "AZATHIOPRINE",
            Drug::Fluorouracil => "FLUOROURACIL",
        }
    }

    /// Genes that influence this drug. The first one is the primary gene.
    pub const fn genes(&self) -> &'static [Gene] {
        match self {
            Drug::Codeine => &[Gene::Cyp2d6],
            Drug::Warfarin => &[Gene::Cyp2c9, Gene::Vkorc1],
            Drug::Clopidogrel => &[Gene::Cyp2c19],
            Drug::Simvastatin => &[Gene::Slco1b1],
            Drug::Azathioprine => &[Gene::Tpmt],
            Drug::Fluorouracil => &[Gene::Dpyd],
        }
    }

    pub const fn primary_gene(&self) -> Gene {
        self.genes()[0]
    }
}

impl Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Drug {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Drug::ALL
            .into_iter()
            .find(|drug| drug.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ReferenceError::UnknownDrug(name.to_string()))
    }
}

impl Serialize for Drug {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

///
/// Functional effect of a variant on the encoded enzyme.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Null,
    Decreased,
    Normal,
    Increased,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnownVariant {
    pub gene: Gene,
    pub rsid: &'static str,
    pub star: &'static str,
    pub effect: Effect,
}

const fn kv(gene: Gene, rsid: &'static str, star: &'static str, effect: Effect) -> KnownVariant {
    KnownVariant {
        gene,
        rsid,
        star,
        effect,
    }
}

pub static KNOWN_VARIANTS: [KnownVariant; 16] = [
    kv(Gene::Cyp2d6, "rs1065852", "*10", Effect::Decreased),
    kv(Gene::Cyp2d6, "rs28371706", "*4", Effect::Null),
    kv(Gene::Cyp2d6, "rs3892097", "*4", Effect::Null),
    kv(Gene::Cyp2d6, "rs35742686", "*2", Effect::Normal),
    kv(Gene::Cyp2c19, "rs4244285", "*2", Effect::Null),
    kv(Gene::Cyp2c19, "rs4986893", "*3", Effect::Null),
    kv(Gene::Cyp2c19, "rs12248560", "*17", Effect::Increased),
    kv(Gene::Cyp2c9, "rs1799853", "*2", Effect::Decreased),
    kv(Gene::Cyp2c9, "rs1057910", "*3", Effect::Decreased),
    kv(Gene::Slco1b1, "rs4149056", "*5", Effect::Decreased),
    kv(Gene::Slco1b1, "rs2306283", "*1b", Effect::Normal),
    kv(Gene::Tpmt, "rs1800462", "*2", Effect::Null),
    kv(Gene::Tpmt, "rs1142345", "*3A", Effect::Null),
    kv(Gene::Dpyd, "rs3918290", "*2A", Effect::Null),
    kv(Gene::Dpyd, "rs55886062", "*13", Effect::Null),
    kv(Gene::Dpyd, "rs67376798", "*9A", Effect::Decreased),
];

static RSID_INDEX: LazyLock<FxHashMap<&'static str, &'static KnownVariant>> =
    LazyLock::new(|| {
        KNOWN_VARIANTS
            .iter()
            .map(|variant| (variant.rsid, variant))
            .collect()
    });

///
/// Look up a known variant by identifier (exact match).
///
pub fn known_variant(rsid: &str) -> Option<&'static KnownVariant> {
    RSID_INDEX.get(rsid).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("CYP2D6", Some(Gene::Cyp2d6))]
    #[case("cyp2c19", Some(Gene::Cyp2c19))]
    #[case(" Vkorc1 ", Some(Gene::Vkorc1))]
    #[case("BRCA1", None)]
    fn test_gene_from_symbol(#[case] symbol: &str, #[case] expected: Option<Gene>) {
        assert_eq!(Gene::from_symbol(symbol), expected);
    }

    #[rstest]
    fn test_vkorc1_is_not_a_target_gene() {
        assert!(!Gene::Vkorc1.is_target());
        assert!(Gene::Dpyd.is_target());
    }

    #[rstest]
    #[case("codeine", Drug::Codeine)]
    #[case("WARFARIN", Drug::Warfarin)]
    #[case(" Fluorouracil", Drug::Fluorouracil)]
    fn test_drug_from_str(#[case] name: &str, #[case] expected: Drug) {
        assert_eq!(name.parse::<Drug>().unwrap(), expected);
    }

    #[rstest]
    fn test_unknown_drug() {
        let err = "ASPIRIN".parse::<Drug>().unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized drug: ASPIRIN");
    }

    #[rstest]
    fn test_primary_gene_is_first() {
        assert_eq!(Drug::Warfarin.primary_gene(), Gene::Cyp2c9);
        assert_eq!(Drug::Warfarin.genes().len(), 2);
    }

    #[rstest]
    fn test_known_variant_lookup() {
        let variant = known_variant("rs28371706").unwrap();
        assert_eq!(variant.gene, Gene::Cyp2d6);
        assert_eq!(variant.star, "*4");
        assert_eq!(variant.effect, Effect::Null);

        assert!(Gene::Cyp2c19.known_variant("rs28371706").is_none());
        assert!(known_variant("RS28371706").is_none());
    }

    #[rstest]
    fn test_identifiers_are_unique() {
        assert_eq!(RSID_INDEX.len(), KNOWN_VARIANTS.len());
    }
}
