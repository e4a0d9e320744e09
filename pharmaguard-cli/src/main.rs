mod analyze;
mod drugs;
mod parse;

use anyhow::Result;
use clap::{ArgMatches, Command, arg};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "pharmaguard";
    pub const BIN_NAME: &str = "pharmaguard";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Pharmacogenomic risk interpretation: metabolizer phenotypes and drug risk from a VCF file.")
        .subcommand_required(true)
        .arg(arg!(-v --verbose "Log debug output").global(true))
        .subcommand(analyze::cli::create_analyze_cli())
        .subcommand(drugs::cli::create_drugs_cli())
        .subcommand(parse::cli::create_parse_cli())
}

fn init_logging(matches: &ArgMatches) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if matches.get_flag("verbose") {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        //
        // ANALYZE
        //
        Some((analyze::cli::ANALYZE_CMD, matches)) => {
            analyze::handlers::run_analyze(matches)?;
        }

        //
        // DRUGS
        //
        Some((drugs::cli::DRUGS_CMD, matches)) => {
            drugs::handlers::run_drugs(matches)?;
        }

        //
        // PARSE
        //
        Some((parse::cli::PARSE_CMD, matches)) => {
            parse::handlers::run_parse(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
