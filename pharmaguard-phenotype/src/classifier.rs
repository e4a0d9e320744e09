use log::{debug, warn};

use pharmaguard_core::models::{
    ClinicalSignificance, CoverageQuality, DetectedVariant, Diplotype, PharmacogenomicProfile,
    Phenotype, VariantRecord,
};
use pharmaguard_core::{Drug, Gene};

use crate::cascade::phenotype_from_diplotype;
use crate::diplotype::infer_diplotype;

///
/// The gene a record is attributed to for a drug: its own GENE annotation
/// when that is one of the drug's genes, otherwise the gene its identifier
/// belongs to in the known-variant table. `None` means the record is not
/// relevant for the drug.
///
pub fn resolve_gene(record: &VariantRecord, drug: Drug) -> Option<Gene> {
    let genes = drug.genes();

    let annotated = record
        .gene
        .as_deref()
        .and_then(Gene::from_symbol)
        .filter(|gene| genes.contains(gene));

    annotated.or_else(|| {
        record
            .rsid
            .as_deref()
            .and_then(|rsid| genes.iter().find(|gene| gene.known_variant(rsid).is_some()))
            .copied()
    })
}

fn detected_variant(record: &VariantRecord, gene: Gene) -> DetectedVariant {
    let effect = record
        .rsid
        .as_deref()
        .and_then(|rsid| gene.known_variant(rsid))
        .map(|known| known.effect);

    let gene_name = record
        .gene
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| gene.symbol().to_string());

    DetectedVariant {
        rsid: record.rsid.clone(),
        gene: gene_name,
        chromosome: record.chromosome.clone(),
        position: record.position,
        reference: record.reference.clone(),
        alternate: record.alternate.clone(),
        star_allele: record.annotated_star_allele().map(str::to_string),
        genotype: record.genotype.clone(),
        clinical_significance: ClinicalSignificance::from(effect),
    }
}

///
/// Build the pharmacogenomic profile of a resolved drug.
///
pub fn classify_drug(variants: &[VariantRecord], drug: Drug) -> PharmacogenomicProfile {
    let primary_gene = drug.primary_gene();

    let selected: Vec<(&VariantRecord, Gene)> = variants
        .iter()
        .filter_map(|record| resolve_gene(record, drug).map(|gene| (record, gene)))
        .collect();

    let detected_variants: Vec<DetectedVariant> = selected
        .iter()
        .map(|(record, gene)| detected_variant(record, *gene))
        .collect();

    let primary_records: Vec<&VariantRecord> = selected
        .iter()
        .filter(|(_, gene)| *gene == primary_gene)
        .map(|(record, _)| *record)
        .collect();

    let (diplotype, phenotype) = if primary_records.is_empty() {
        (Diplotype::reference(), Phenotype::Unknown)
    } else {
        let call = infer_diplotype(primary_gene, &primary_records);
        debug!(
            "{}: {} from {:?} evidence",
            primary_gene, call.diplotype, call.evidence
        );
        let phenotype = phenotype_from_diplotype(primary_gene, &call.diplotype);
        (call.diplotype, phenotype)
    };

    let coverage_quality = if detected_variants.is_empty() {
        CoverageQuality::Limited
    } else {
        CoverageQuality::Good
    };

    PharmacogenomicProfile {
        primary_gene: Some(primary_gene),
        diplotype,
        phenotype,
        detected_variants,
        coverage_quality,
    }
}

///
/// Classify the patient's metabolizer status for a drug given by name.
///
/// Unrecognized drug names yield [PharmacogenomicProfile::unknown].
///
pub fn classify(variants: &[VariantRecord], drug: &str) -> PharmacogenomicProfile {
    match drug.parse::<Drug>() {
        Ok(drug) => classify_drug(variants, drug),
        Err(e) => {
            warn!("{}; returning default profile", e);
            PharmacogenomicProfile::unknown()
        }
    }
}

///
/// Profiling helpers for a set of variant records.
///
pub trait PharmacogenomicProfiling {
    fn profile_for(&self, drug: Drug) -> PharmacogenomicProfile;

    fn profile_for_name(&self, drug: &str) -> PharmacogenomicProfile;

    fn phenotype_for(&self, drug: Drug) -> Phenotype {
        self.profile_for(drug).phenotype
    }
}

impl PharmacogenomicProfiling for [VariantRecord] {
    fn profile_for(&self, drug: Drug) -> PharmacogenomicProfile {
        classify_drug(self, drug)
    }

    fn profile_for_name(&self, drug: &str) -> PharmacogenomicProfile {
        classify(self, drug)
    }
}
