use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Serialize, Serializer};

///
/// Value of a single INFO entry: either a bare flag or a `key=value` text.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum InfoValue {
    Flag,
    Text(String),
}

impl InfoValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InfoValue::Flag => None,
            InfoValue::Text(text) => Some(text.as_str()),
        }
    }
}

impl Serialize for InfoValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InfoValue::Flag => serializer.serialize_bool(true),
            InfoValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

///
/// Zygosity of a biallelic genotype call.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zygosity {
    HomRef,
    Het,
    HomAlt,
}

impl Zygosity {
    ///
    /// Classify a `GT` value such as `0/1` or `1|1`.
    ///
    /// Phased and unphased separators are equivalent and allele order is
    /// ignored. Anything that is not a diploid 0/1 call gives `None`.
    ///
    pub fn from_genotype(gt: &str) -> Option<Zygosity> {
        let (a, b) = gt.trim().split_once(['/', '|'])?;
        match (a, b) {
            ("0", "0") => Some(Zygosity::HomRef),
            ("0", "1") | ("1", "0") => Some(Zygosity::Het),
            ("1", "1") => Some(Zygosity::HomAlt),
            _ => None,
        }
    }
}

///
/// One data line of a variant call file.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VariantRecord {
    pub chromosome: String,
    pub position: Option<u64>,
    pub rsid: Option<String>,
    pub reference: String,
    pub alternate: String,
    pub quality: String,
    pub filter: String,
    pub info: BTreeMap<String, InfoValue>,
    pub gene: Option<String>,
    pub star_allele: Option<String>,
    pub genotype: Option<String>,
}

impl VariantRecord {
    pub fn info_text(&self, key: &str) -> Option<&str> {
        self.info.get(key).and_then(InfoValue::as_text)
    }

    pub fn zygosity(&self) -> Option<Zygosity> {
        self.genotype.as_deref().and_then(Zygosity::from_genotype)
    }

    /// Star allele from the record, else straight from INFO.
    pub fn annotated_star_allele(&self) -> Option<&str> {
        self.star_allele
            .as_deref()
            .or_else(|| self.info_text("STAR"))
            .filter(|star| !star.is_empty())
    }
}

impl Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {}>{} ({})",
            self.chromosome,
            self.position.map_or_else(|| ".".to_string(), |p| p.to_string()),
            self.reference,
            self.alternate,
            self.rsid.as_deref().unwrap_or(".")
        )
    }
}
