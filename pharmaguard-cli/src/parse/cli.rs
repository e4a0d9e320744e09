use clap::{Command, arg};

pub const PARSE_CMD: &str = "parse";

pub fn create_parse_cli() -> Command {
    Command::new(PARSE_CMD)
        .about("Parse a VCF file and print the pharmacogenomic variants it contains")
        .arg_required_else_help(true)
        .arg(arg!(--vcf <vcf> "Path to the VCF file (.vcf or .vcf.gz)").required(true))
}
