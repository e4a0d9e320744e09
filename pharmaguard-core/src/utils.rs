use std::ffi::OsStr;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use md5::{Digest, Md5};
use serde::Serializer;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Derive a stable patient identifier from the name of the source file.
///
/// Used when the file carries no sample column. The same source always
/// gives the same identifier, across runs and machines.
///
pub fn patient_id_from_source(source: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(source.as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    format!("PATIENT_{}", u64::from_be_bytes(prefix) % 10_000)
}

pub fn serialize_or_unknown<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    match value {
        Some(value) => serializer.collect_str(value),
        None => serializer.serialize_str("Unknown"),
    }
}

pub fn serialize_or_unknown_lowercase<T, S>(
    value: &Option<T>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    match value {
        Some(value) => serializer.collect_str(value),
        None => serializer.serialize_str("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::{BufRead, Write};

    #[rstest]
    fn test_patient_id_is_deterministic() {
        let a = patient_id_from_source("uploads/sample.vcf");
        let b = patient_id_from_source("uploads/sample.vcf");
        assert_eq!(a, b);
        assert!(a.starts_with("PATIENT_"));

        let n: u64 = a.trim_start_matches("PATIENT_").parse().unwrap();
        assert!(n < 10_000);
    }

    #[rstest]
    fn test_dynamic_reader_reads_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.vcf.gz");
        {
            let file = File::create(&path).unwrap();
            let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
            writeln!(encoder, "##fileformat=VCFv4.2").unwrap();
        }

        let reader = get_dynamic_reader(&path).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["##fileformat=VCFv4.2".to_string()]);
    }

    #[rstest]
    fn test_dynamic_reader_missing_file() {
        let result = get_dynamic_reader(Path::new("does/not/exist.vcf"));
        assert!(result.is_err());
    }
}
