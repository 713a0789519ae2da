use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone, PartialEq, Eq)]
#[command(name = "staybot")]
#[command(
    about = "Command-line assistant that answers property listing queries from a CSV dataset",
    long_about = "Command-line assistant that answers property listing queries from a CSV dataset\n\nDataset path resolution (first match wins):\n  1. --dataset <path>\n  2. $STAYBOT_DATASET (also read from .env)\n  3. dataset_path in the config file\n  4. data/properties.csv\n\nConfig file loading:\n  - --config <path> (explicit file, overrides default path discovery)\n  - Default probe path when --config is not provided:\n    1. $XDG_CONFIG_HOME/staybot/config.toml\n    2. ~/.config/staybot/config.toml"
)]
pub struct CliArgs {
    /// Load config from this file path instead of the default discovery path.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read listings from this CSV file.
    #[arg(long, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// Answer a single query and exit instead of starting the interactive prompt.
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Do not write a session trace file.
    #[arg(long)]
    pub no_trace: bool,
}
