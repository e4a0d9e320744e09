//! Diplotype to phenotype decision table.
//!
//! The two alleles of a diplotype are first reduced to an [AlleleTally], then
//! the tally is mapped to a [Phenotype]. Loss-of-function evidence is always
//! counted first: a diplotype with any null allele never reaches the
//! increased-function rows.

use pharmaguard_core::Gene;
use pharmaguard_core::models::{Diplotype, Phenotype};

///
/// A star allele split into its base name and an optional copy-number marker,
/// e.g. `*2xN` is base `*2`, duplicated.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StarAllele<'a> {
    pub base: &'a str,
    pub duplicated: bool,
}

impl<'a> StarAllele<'a> {
    pub fn parse(allele: &'a str) -> StarAllele<'a> {
        let allele = allele.trim();
        for (idx, marker) in allele.char_indices().rev() {
            if !matches!(marker, 'x' | 'X' | '×') {
                continue;
            }
            let copies = &allele[idx + marker.len_utf8()..];
            let is_copy_number = copies.eq_ignore_ascii_case("n")
                || (!copies.is_empty() && copies.bytes().all(|b| b.is_ascii_digit()));
            if is_copy_number && idx > 0 {
                return StarAllele {
                    base: &allele[..idx],
                    duplicated: true,
                };
            }
        }
        StarAllele {
            base: allele,
            duplicated: false,
        }
    }

    /// `*1xN` only matches duplicated `*1`; plain `*17` matches `*17` with or
    /// without a copy-number marker.
    fn matches_entry(&self, entry: &StarAllele<'_>) -> bool {
        self.base.eq_ignore_ascii_case(entry.base) && (!entry.duplicated || self.duplicated)
    }
}

pub fn is_null_allele(gene: Gene, allele: &str) -> bool {
    let allele = StarAllele::parse(allele);
    gene.null_alleles()
        .iter()
        .any(|entry| allele.matches_entry(&StarAllele::parse(entry)))
}

pub fn is_increased_allele(gene: Gene, allele: &str) -> bool {
    let allele = StarAllele::parse(allele);
    gene.increased_alleles()
        .iter()
        .any(|entry| allele.matches_entry(&StarAllele::parse(entry)))
}

///
/// Functional summary of the two alleles of a diplotype.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlleleTally {
    /// At least one allele has no function.
    Null(u8),
    /// No null allele, at least one increased-function allele.
    Increased { count: u8, duplication: bool },
    /// Neither null nor increased-function alleles.
    Neutral,
}

impl AlleleTally {
    pub fn from_diplotype(gene: Gene, diplotype: &Diplotype) -> AlleleTally {
        let alleles = diplotype.alleles();

        let null_count = alleles.iter().filter(|a| is_null_allele(gene, a)).count() as u8;
        if null_count > 0 {
            return AlleleTally::Null(null_count);
        }

        let increased_count = alleles
            .iter()
            .filter(|a| is_increased_allele(gene, a))
            .count() as u8;
        if increased_count > 0 {
            let duplication = alleles.iter().any(|a| StarAllele::parse(a).duplicated);
            return AlleleTally::Increased {
                count: increased_count,
                duplication,
            };
        }

        AlleleTally::Neutral
    }

    pub fn phenotype(&self) -> Phenotype {
        match *self {
            AlleleTally::Null(n) if n >= 2 => Phenotype::Poor,
            AlleleTally::Null(_) => Phenotype::Intermediate,
            AlleleTally::Increased { count, .. } if count >= 2 => Phenotype::Ultrarapid,
            AlleleTally::Increased {
                duplication: true, ..
            } => Phenotype::Ultrarapid,
            AlleleTally::Increased { .. } => Phenotype::Rapid,
            AlleleTally::Neutral => Phenotype::Normal,
        }
    }
}

pub fn phenotype_from_diplotype(gene: Gene, diplotype: &Diplotype) -> Phenotype {
    AlleleTally::from_diplotype(gene, diplotype).phenotype()
}
