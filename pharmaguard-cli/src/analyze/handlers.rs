use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use pharmaguard::{AnalysisRequest, PharmaGuardConfig};

///
/// Load the config given with `--config`, or the defaults.
///
pub fn load_config(matches: &ArgMatches) -> Result<PharmaGuardConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => PharmaGuardConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path)),
        None => Ok(PharmaGuardConfig::default()),
    }
}

pub fn run_analyze(matches: &ArgMatches) -> Result<()> {
    let vcf = matches
        .get_one::<String>("vcf")
        .context("A path to a VCF file is required.")?;

    let drugs = matches
        .get_one::<String>("drugs")
        .context("At least one drug name is required.")?;

    let config = load_config(matches)?;

    let request = AnalysisRequest::new(vcf, drugs, &config)?;
    let response = request.run()?;

    match matches.get_one::<String>("output") {
        Some(output) => {
            let file = File::create(output)
                .with_context(|| format!("Failed to create output file: {}", output))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &response)?;
            writer.flush()?;
            info!("Wrote {} report(s) to {}", response.reports().len(), output);
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &response)?;
            writeln!(handle)?;
        }
    }

    Ok(())
}
