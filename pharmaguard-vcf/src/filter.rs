use pharmaguard_core::Gene;
use pharmaguard_core::models::VariantRecord;

/// Identifiers of well-characterized pharmacogenomic variants.
pub const PGX_RSIDS: [&str; 15] = [
    // CYP2D6
    "rs1065852",
    "rs28371706",
    "rs3892097",
    // CYP2C19
    "rs4244285",
    "rs4986893",
    "rs12248560",
    // CYP2C9
    "rs1799853",
    "rs1057910",
    // SLCO1B1
    "rs4149056",
    "rs2306283",
    // TPMT
    "rs1800462",
    "rs1142345",
    // DPYD
    "rs3918290",
    "rs55886062",
    "rs67376798",
];

pub fn is_pgx_rsid(rsid: &str) -> bool {
    PGX_RSIDS.iter().any(|known| known.eq_ignore_ascii_case(rsid))
}

///
/// Keep records annotated with a target gene or carrying a known PGx identifier.
///
pub fn is_pgx_record(record: &VariantRecord) -> bool {
    let in_target_gene = record
        .gene
        .as_deref()
        .and_then(Gene::from_symbol)
        .is_some_and(|gene| gene.is_target());

    in_target_gene || record.rsid.as_deref().is_some_and(is_pgx_rsid)
}
