use anyhow::Result;
use clap::Parser;
use staybot::cli::CliArgs;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    staybot::run(args)
}
