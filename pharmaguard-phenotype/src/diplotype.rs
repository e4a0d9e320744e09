//! Star-allele diplotype inference for a single gene.

use pharmaguard_core::Gene;
use pharmaguard_core::models::{Diplotype, VariantRecord, Zygosity, split_alleles};

/// Generic non-reference placeholder used when only a genotype is known.
pub const PLACEHOLDER_VARIANT_ALLELE: &str = "*2";
pub const PLACEHOLDER_REFERENCE_ALLELE: &str = "*1";

///
/// Which evidence produced a diplotype call.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlleleEvidence {
    /// INFO `STAR` annotations on the records.
    Annotated,
    /// Star alleles looked up from record identifiers.
    Identifier,
    /// Generic `*1`/`*2` placeholders from a genotype call.
    Genotype,
    /// No usable evidence.
    Default,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiplotypeCall {
    pub diplotype: Diplotype,
    pub evidence: AlleleEvidence,
}

///
/// Number of copies of the alternate allele a record contributes: two for a
/// homozygous-alternate call, one otherwise.
///
fn allele_copies(record: &VariantRecord) -> usize {
    match record.zygosity() {
        Some(Zygosity::HomAlt) => 2,
        _ => 1,
    }
}

///
/// Alleles from INFO `STAR` annotations. A single allele counts once or twice
/// depending on zygosity; an annotation that already names both alleles
/// (`*1/*4`) is taken as written.
///
fn annotated_alleles(records: &[&VariantRecord]) -> Vec<String> {
    let mut alleles = Vec::new();

    for record in records {
        let Some(star) = record.annotated_star_allele() else {
            continue;
        };

        let pieces: Vec<&str> = split_alleles(star).collect();
        match pieces.as_slice() {
            [] => {}
            [single] => {
                alleles.extend(std::iter::repeat_n(single.to_string(), allele_copies(record)))
            }
            _ => alleles.extend(pieces.iter().map(|piece| piece.to_string())),
        }
    }

    alleles
}

fn identifier_alleles(gene: Gene, records: &[&VariantRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| {
            let rsid = record.rsid.as_deref()?;
            let known = gene.known_variant(rsid)?;
            Some((known.star, allele_copies(record)))
        })
        .flat_map(|(star, copies)| std::iter::repeat_n(star.to_string(), copies))
        .collect()
}

fn genotype_placeholders(records: &[&VariantRecord]) -> Vec<String> {
    let zygosity = records
        .iter()
        .find(|record| record.genotype.is_some())
        .and_then(|record| record.zygosity());

    let pair = match zygosity {
        Some(Zygosity::HomRef) => [PLACEHOLDER_REFERENCE_ALLELE, PLACEHOLDER_REFERENCE_ALLELE],
        Some(Zygosity::Het) => [PLACEHOLDER_REFERENCE_ALLELE, PLACEHOLDER_VARIANT_ALLELE],
        Some(Zygosity::HomAlt) => [PLACEHOLDER_VARIANT_ALLELE, PLACEHOLDER_VARIANT_ALLELE],
        None => return Vec::new(),
    };
    pair.iter().map(|a| a.to_string()).collect()
}

///
/// Infer a diplotype for `gene` from the records assigned to it.
///
/// Evidence is tried in order: star-allele annotations, identifiers with a
/// known star allele, then the first genotype call. The first source that
/// yields any allele wins; the result is always normalized to two alleles.
///
pub fn infer_diplotype(gene: Gene, records: &[&VariantRecord]) -> DiplotypeCall {
    let candidates = [
        (AlleleEvidence::Annotated, annotated_alleles(records)),
        (AlleleEvidence::Identifier, identifier_alleles(gene, records)),
        (AlleleEvidence::Genotype, genotype_placeholders(records)),
    ];

    candidates
        .into_iter()
        .find(|(_, alleles)| !alleles.is_empty())
        .map(|(evidence, alleles)| DiplotypeCall {
            diplotype: Diplotype::from_alleles(alleles),
            evidence,
        })
        .unwrap_or_else(|| DiplotypeCall {
            diplotype: Diplotype::reference(),
            evidence: AlleleEvidence::Default,
        })
}
