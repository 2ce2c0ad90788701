use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "insight-engine", version, about = "Server fleet monitoring analysis engine")]
pub struct Opts {
    /// YAML configuration file; built-in defaults when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run a single analysis, print the digest and exit
    #[arg(long)]
    pub once: bool,
}
