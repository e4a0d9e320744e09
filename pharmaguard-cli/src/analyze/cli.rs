use clap::{Command, arg};

pub const ANALYZE_CMD: &str = "analyze";

pub fn create_analyze_cli() -> Command {
    Command::new(ANALYZE_CMD)
        .about("Classify metabolizer phenotypes and drug risk for a VCF file")
        .arg_required_else_help(true)
        .arg(arg!(--vcf <vcf> "Path to the VCF file (.vcf or .vcf.gz)").required(true))
        .arg(arg!(--drugs <drugs> "Comma separated drug names, e.g. CODEINE,WARFARIN").required(true))
        .arg(arg!(-o --output <output> "Write the JSON response here instead of stdout"))
        .arg(arg!(-c --config <config> "TOML file with request limits"))
}
