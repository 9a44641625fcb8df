use std::process::ExitCode;

use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let cli = artbatch::cli::Cli::parse();
    artbatch::init(cli.verbose);

    artbatch::cli::run(cli)
}
