//! Line-level VCF parsing.
//!
//! [VcfParser] consumes one line at a time and keeps only what later stages
//! need: the INFO definitions from the meta header, the sample name from the
//! column header, and one [VariantRecord] per well-formed data line.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use pharmaguard_core::models::{InfoValue, VariantRecord};

pub const META_PREFIX: &str = "##";
pub const INFO_META_PREFIX: &str = "##INFO=";
pub const COLUMN_HEADER_PREFIX: &str = "#CHROM";
pub const COMMENT_PREFIX: &str = "#";
pub const MISSING_VALUE: &str = ".";
pub const GENOTYPE_KEY: &str = "GT";

/// Columns every data line must have: CHROM to INFO.
pub const REQUIRED_COLUMNS: usize = 8;

static INFO_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ID=([^,>]+)").expect("static regex is valid"));

///
/// Incremental parser state for a single file.
///
#[derive(Debug, Default)]
pub struct VcfParser {
    info_definitions: BTreeMap<String, String>,
    sample_id: Option<String>,
    records: Vec<VariantRecord>,
    skipped_lines: usize,
}

impl VcfParser {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Feed one raw line. Surrounding whitespace is ignored.
    ///
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();

        if line.is_empty() {
            return;
        }

        if line.starts_with(META_PREFIX) {
            if let Some((id, definition)) = parse_info_definition(line) {
                self.info_definitions.insert(id, definition);
            }
            return;
        }

        if line.starts_with(COLUMN_HEADER_PREFIX) {
            self.sample_id = parse_sample_id(line);
            return;
        }

        if line.starts_with(COMMENT_PREFIX) {
            return;
        }

        match parse_variant_line(line) {
            Some(record) => self.records.push(record),
            None => {
                self.skipped_lines += 1;
                debug!("Skipping malformed data line: {:?}", line);
            }
        }
    }

    ///
    /// Feed one raw line as bytes. Invalid UTF-8 is replaced rather than
    /// failing the file; a damaged data line still has to pass the column
    /// check in [VcfParser::push_line].
    ///
    pub fn push_bytes(&mut self, line: &[u8]) {
        let decoded = String::from_utf8_lossy(line);
        if let Cow::Owned(_) = decoded {
            debug!("Replaced invalid UTF-8 in line: {:?}", decoded);
        }
        self.push_line(&decoded);
    }

    pub fn sample_id(&self) -> Option<&str> {
        self.sample_id.as_deref()
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub fn into_parts(self) -> (Vec<VariantRecord>, Option<String>, BTreeMap<String, String>, usize) {
        (
            self.records,
            self.sample_id,
            self.info_definitions,
            self.skipped_lines,
        )
    }
}

///
/// Pull the `ID=` value out of an `##INFO=<...>` meta line.
///
pub fn parse_info_definition(line: &str) -> Option<(String, String)> {
    if !line.starts_with(INFO_META_PREFIX) {
        return None;
    }
    let captures = INFO_ID_REGEX.captures(line)?;
    Some((captures[1].to_string(), line.to_string()))
}

///
/// The tenth column of the `#CHROM` line names the first sample.
///
pub fn parse_sample_id(line: &str) -> Option<String> {
    line[1..]
        .split('\t')
        .nth(9)
        .map(str::to_string)
        .filter(|id| !id.is_empty())
}

///
/// Parse one tab separated data line.
///
/// Returns `None` for lines with fewer than eight columns. Optional columns
/// that are missing or malformed never fail the line; they become `None`.
///
pub fn parse_variant_line(line: &str) -> Option<VariantRecord> {
    let parts: Vec<&str> = line.split('\t').collect();

    if parts.len() < REQUIRED_COLUMNS {
        return None;
    }

    let info = parse_info_field(parts[7]);

    let genotype = match (parts.get(8), parts.get(9)) {
        (Some(format), Some(sample)) => parse_genotype(format, sample),
        _ => None,
    };

    let rsid = Some(parts[2])
        .filter(|id| *id != MISSING_VALUE && !id.is_empty())
        .map(str::to_string)
        .or_else(|| info_text(&info, "RS"));

    Some(VariantRecord {
        chromosome: parts[0].to_string(),
        position: parse_position(parts[1]),
        rsid,
        reference: parts[3].to_string(),
        alternate: parts[4].to_string(),
        quality: parts[5].to_string(),
        filter: parts[6].to_string(),
        gene: info_text(&info, "GENE"),
        star_allele: info_text(&info, "STAR"),
        genotype,
        info,
    })
}

///
/// Positions are kept only when they are plain ASCII digits.
///
pub fn parse_position(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

///
/// Parse `KEY=value;FLAG;...` into a map. Bare tokens become flags.
/// A lone `.` means an empty INFO column.
///
pub fn parse_info_field(info: &str) -> BTreeMap<String, InfoValue> {
    let mut info_map = BTreeMap::new();

    if info == MISSING_VALUE {
        return info_map;
    }

    for item in info.split(';').filter(|item| !item.is_empty()) {
        match item.split_once('=') {
            Some((key, value)) => {
                info_map.insert(key.to_string(), InfoValue::Text(value.to_string()));
            }
            None => {
                info_map.insert(item.to_string(), InfoValue::Flag);
            }
        }
    }

    info_map
}

///
/// Pick the `GT` value out of a sample column using the FORMAT keys.
///
pub fn parse_genotype(format: &str, sample: &str) -> Option<String> {
    let gt_idx = format.split(':').position(|key| key == GENOTYPE_KEY)?;
    sample
        .split(':')
        .nth(gt_idx)
        .map(str::to_string)
        .filter(|gt| !gt.is_empty())
}

fn info_text(info: &BTreeMap<String, InfoValue>, key: &str) -> Option<String> {
    info.get(key)
        .and_then(InfoValue::as_text)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn full_line() -> &'static str {
        "chr22\t42126611\trs3892097\tC\tT\t50\tPASS\tGENE=CYP2D6;STAR=*4;DB\tGT:DP\t0/1:35"
    }

    #[rstest]
    fn test_parse_full_line(full_line: &str) {
        let record = parse_variant_line(full_line).unwrap();

        assert_eq!(record.chromosome, "chr22");
        assert_eq!(record.position, Some(42126611));
        assert_eq!(record.rsid.as_deref(), Some("rs3892097"));
        assert_eq!(record.reference, "C");
        assert_eq!(record.alternate, "T");
        assert_eq!(record.quality, "50");
        assert_eq!(record.filter, "PASS");
        assert_eq!(record.gene.as_deref(), Some("CYP2D6"));
        assert_eq!(record.star_allele.as_deref(), Some("*4"));
        assert_eq!(record.genotype.as_deref(), Some("0/1"));
        assert_eq!(record.info.get("DB"), Some(&InfoValue::Flag));
    }

    #[rstest]
    fn test_short_line_is_rejected() {
        assert!(parse_variant_line("chr1\t100\trs1\tA\tG\t.\tPASS").is_none());
    }

    #[rstest]
    fn test_eight_columns_have_no_genotype() {
        let record = parse_variant_line("chr1\t100\t.\tA\tG\t.\tPASS\tGENE=TPMT").unwrap();
        assert_eq!(record.rsid, None);
        assert_eq!(record.genotype, None);
        assert_eq!(record.gene.as_deref(), Some("TPMT"));
    }

    #[rstest]
    fn test_nine_columns_have_no_genotype() {
        let record = parse_variant_line("chr1\t100\t.\tA\tG\t.\tPASS\t.\tGT").unwrap();
        assert_eq!(record.genotype, None);
        assert!(record.info.is_empty());
    }

    #[rstest]
    fn test_missing_id_falls_back_to_info_rs() {
        let record =
            parse_variant_line("chr10\t94781859\t.\tG\tA\t.\tPASS\tRS=rs4244285;GENE=CYP2C19")
                .unwrap();
        assert_eq!(record.rsid.as_deref(), Some("rs4244285"));
    }

    #[rstest]
    #[case("12345", Some(12345))]
    #[case("0", Some(0))]
    #[case("-5", None)]
    #[case("12a", None)]
    #[case("1e5", None)]
    #[case("", None)]
    #[case("99999999999999999999999", None)]
    fn test_parse_position(#[case] raw: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_position(raw), expected);
    }

    #[rstest]
    fn test_parse_info_field() {
        let info = parse_info_field("GENE=CYP2C9;SOMATIC;EXPR=a=b;;");
        assert_eq!(info.len(), 3);
        assert_eq!(info.get("GENE"), Some(&InfoValue::Text("CYP2C9".to_string())));
        assert_eq!(info.get("SOMATIC"), Some(&InfoValue::Flag));
        assert_eq!(info.get("EXPR"), Some(&InfoValue::Text("a=b".to_string())));
    }

    #[rstest]
    #[case("GT:DP", "1|1:20", Some("1|1"))]
    #[case("DP:GT", "20:0/1", Some("0/1"))]
    #[case("DP:AD", "20:10,10", None)]
    #[case("DP:GT", "20", None)]
    fn test_parse_genotype(
        #[case] format: &str,
        #[case] sample: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(parse_genotype(format, sample).as_deref(), expected);
    }

    #[rstest]
    fn test_info_definition() {
        let line = "##INFO=<ID=GENE,Number=1,Type=String,Description=\"Gene symbol\">";
        let (id, definition) = parse_info_definition(line).unwrap();
        assert_eq!(id, "GENE");
        assert_eq!(definition, line);

        assert!(parse_info_definition("##FORMAT=<ID=GT,Number=1>").is_none());
    }

    #[rstest]
    fn test_sample_id_from_column_header() {
        let header = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tPATIENT_001";
        assert_eq!(parse_sample_id(header).as_deref(), Some("PATIENT_001"));

        let sites_only = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO";
        assert_eq!(parse_sample_id(sites_only), None);
    }

    #[rstest]
    fn test_parser_skips_and_counts_malformed_lines(full_line: &str) {
        let mut parser = VcfParser::new();
        parser.push_line("##fileformat=VCFv4.2");
        parser.push_line("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1");
        parser.push_line("");
        parser.push_line("chr1\t100\tbroken");
        parser.push_line(full_line);
        parser.push_line("# trailing comment");

        assert_eq!(parser.sample_id(), Some("S1"));
        assert_eq!(parser.skipped_lines(), 1);

        let (records, _, _, skipped) = parser.into_parts();
        assert_eq!(records.len(), 1);
        assert_eq!(skipped, 1);
    }
}
