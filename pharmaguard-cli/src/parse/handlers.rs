use anyhow::{Context, Result};
use clap::ArgMatches;

use pharmaguard::vcf::read_vcf;

pub fn run_parse(matches: &ArgMatches) -> Result<()> {
    let vcf = matches
        .get_one::<String>("vcf")
        .context("A path to a VCF file is required.")?;

    let parsed = read_vcf(vcf)?;
    println!("{}", serde_json::to_string_pretty(&parsed)?);

    Ok(())
}
