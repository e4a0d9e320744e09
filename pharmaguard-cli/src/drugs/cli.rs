use clap::Command;

pub const DRUGS_CMD: &str = "drugs";

pub fn create_drugs_cli() -> Command {
    Command::new(DRUGS_CMD).about("List supported drugs and the genes behind them")
}
