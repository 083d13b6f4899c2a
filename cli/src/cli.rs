use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bookstall", about = "Terminal storefront for a remote book store API")]
pub struct Args {
    /// Base URL of the store API (overrides config and BOOKSTALL_SERVER_URL).
    #[arg(long)]
    pub server: Option<String>,

    /// Path to a config file. Defaults to ~/.bookstall/config.toml, then
    /// ./config.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// HTTP timeout in milliseconds (overrides config).
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}
