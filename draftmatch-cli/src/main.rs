use clap::Parser;
use draftmatch_cli::commands::CompareArgs;
use draftmatch_cli::CliResult;

fn main() -> CliResult<()> {
    CompareArgs::parse().execute()
}
