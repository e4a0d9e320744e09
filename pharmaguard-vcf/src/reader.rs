use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

use log::info;
use serde::Serialize;

use pharmaguard_core::models::VariantRecord;
use pharmaguard_core::utils::{get_dynamic_reader, patient_id_from_source};

use crate::errors::{VcfError, VcfResult};
use crate::filter::is_pgx_record;
use crate::parser::VcfParser;

///
/// Pharmacogenomically relevant content of one variant file.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParsedVcf {
    /// Records that passed the PGx filter, in file order.
    pub variants: Vec<VariantRecord>,
    pub patient_id: String,
    /// Number of data lines parsed before filtering.
    pub total_variants: usize,
    /// Data lines dropped for having too few columns.
    pub skipped_lines: usize,
    #[serde(skip)]
    pub info_definitions: BTreeMap<String, String>,
}

impl ParsedVcf {
    ///
    /// Parse in-memory VCF text.
    ///
    /// # Arguments
    /// - content: full text of the file
    /// - source: file name or path, used to derive a patient id when the
    ///   file has no sample column
    pub fn from_str_with_source(content: &str, source: &str) -> ParsedVcf {
        let mut parser = VcfParser::new();
        for line in content.lines() {
            parser.push_line(line);
        }
        ParsedVcf::from_parser(parser, source)
    }

    fn from_parser(parser: VcfParser, source: &str) -> ParsedVcf {
        let (records, sample_id, info_definitions, skipped_lines) = parser.into_parts();
        let total_variants = records.len();

        let variants: Vec<VariantRecord> = records.into_iter().filter(is_pgx_record).collect();

        let patient_id = sample_id.unwrap_or_else(|| patient_id_from_source(source));

        info!(
            "Parsed {}: {} variants, {} pharmacogenomic, {} lines skipped",
            source,
            total_variants,
            variants.len(),
            skipped_lines
        );

        ParsedVcf {
            variants,
            patient_id,
            total_variants,
            skipped_lines,
            info_definitions,
        }
    }

    ///
    /// Number of records that passed the PGx filter.
    ///
    pub fn pgx_variants(&self) -> usize {
        self.variants.len()
    }
}

impl TryFrom<&Path> for ParsedVcf {
    type Error = VcfError;

    ///
    /// Read and parse a VCF file (plain or gzip'd).
    ///
    /// # Arguments:
    /// - value: path to the vcf file on disk.
    fn try_from(value: &Path) -> VcfResult<Self> {
        let mut reader = get_dynamic_reader(value)
            .map_err(|e| VcfError::FileReadError(format!("{}: {:#}", value.display(), e)))?;

        let mut parser = VcfParser::new();
        let mut buf = Vec::new();
        while reader.read_until(b'\n', &mut buf)? > 0 {
            parser.push_bytes(&buf);
            buf.clear();
        }

        Ok(ParsedVcf::from_parser(parser, &value.display().to_string()))
    }
}

impl TryFrom<&str> for ParsedVcf {
    type Error = VcfError;

    fn try_from(value: &str) -> VcfResult<Self> {
        ParsedVcf::try_from(Path::new(value))
    }
}

///
/// Read a VCF file from disk.
///
pub fn read_vcf<P: AsRef<Path>>(path: P) -> VcfResult<ParsedVcf> {
    ParsedVcf::try_from(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/vcf")
            .join(file_name)
    }

    #[rstest]
    fn test_open_from_path() {
        let parsed = read_vcf(get_test_path("codeine_pm.vcf")).unwrap();

        assert_eq!(parsed.patient_id, "PATIENT_001");
        assert_eq!(parsed.total_variants, 2);
        assert_eq!(parsed.pgx_variants(), 1);
        assert_eq!(parsed.variants[0].rsid.as_deref(), Some("rs28371706"));
        assert_eq!(parsed.variants[0].genotype.as_deref(), Some("1/1"));
    }

    #[rstest]
    fn test_mixed_file() {
        let parsed = read_vcf(get_test_path("mixed.vcf")).unwrap();

        assert_eq!(parsed.patient_id, "SAMPLE_MIXED");
        assert_eq!(parsed.total_variants, 9);
        assert_eq!(parsed.skipped_lines, 2);
        assert_eq!(parsed.pgx_variants(), 7);
        assert!(parsed.info_definitions.contains_key("GENE"));
        assert!(parsed.info_definitions.contains_key("STAR"));

        let genes: Vec<Option<&str>> = parsed.variants.iter().map(|v| v.gene.as_deref()).collect();
        assert_eq!(
            genes,
            vec![
                Some("CYP2D6"),
                Some("CYP2C19"),
                Some("CYP2C19"),
                Some("CYP2C9"),
                None,
                Some("TPMT"),
                Some("DPYD"),
            ]
        );
    }

    #[rstest]
    fn test_sites_only_file_gets_derived_patient_id() {
        let path = get_test_path("sites_only.vcf");
        let parsed = read_vcf(&path).unwrap();

        assert_eq!(
            parsed.patient_id,
            patient_id_from_source(&path.display().to_string())
        );
        assert!(parsed.variants.iter().all(|v| v.genotype.is_none()));
    }

    #[rstest]
    fn test_invalid_utf8_line_does_not_fail_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.vcf");
        let mut content = Vec::new();
        content.extend_from_slice(b"##fileformat=VCFv4.2\n");
        content.extend_from_slice(b"#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tP1\n");
        content.extend_from_slice(b"chr1\t10\trs1\tA\tG\t.\tPASS\tNOTE=caf\xe9\tGT\t0/1\n");
        content.extend_from_slice(b"chr22\t42130692\trs3892097\tG\tA\t.\tPASS\tGENE=CYP2D6\tGT\t0/1\n");
        content.extend_from_slice(b"chr2\t\xff\xfe\n");
        std::fs::write(&path, content).unwrap();

        let parsed = read_vcf(&path).unwrap();
        assert_eq!(parsed.patient_id, "P1");
        assert_eq!(parsed.total_variants, 2);
        assert_eq!(parsed.skipped_lines, 1);
        assert_eq!(parsed.pgx_variants(), 1);
        assert_eq!(parsed.variants[0].rsid.as_deref(), Some("rs3892097"));
    }

    #[rstest]
    fn test_missing_file_is_an_error() {
        let result = read_vcf(get_test_path("does_not_exist.vcf"));
        assert!(matches!(result, Err(VcfError::FileReadError(_))));
    }

    #[rstest]
    fn test_gzipped_file_matches_plain() {
        let plain_path = get_test_path("mixed.vcf");
        let content = std::fs::read_to_string(&plain_path).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let gz_path = dir.path().join("mixed.vcf.gz");
        {
            let file = std::fs::File::create(&gz_path).unwrap();
            let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
            encoder.write_all(content.as_bytes()).unwrap();
        }

        let plain = read_vcf(&plain_path).unwrap();
        let gz = read_vcf(&gz_path).unwrap();
        assert_eq!(plain.variants, gz.variants);
        assert_eq!(plain.patient_id, gz.patient_id);
    }

    #[rstest]
    fn test_reparsing_is_identical() {
        let content = std::fs::read_to_string(get_test_path("mixed.vcf")).unwrap();
        let first = ParsedVcf::from_str_with_source(&content, "mixed.vcf");
        let second = ParsedVcf::from_str_with_source(&content, "mixed.vcf");
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_no_pgx_variants() {
        let content = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
                       chr1\t1000\trs1\tA\tG\t.\tPASS\tGENE=BRCA1\n";
        let parsed = ParsedVcf::from_str_with_source(content, "upload.vcf");
        assert_eq!(parsed.total_variants, 1);
        assert_eq!(parsed.pgx_variants(), 0);
        assert_eq!(parsed.patient_id, patient_id_from_source("upload.vcf"));
    }
}
