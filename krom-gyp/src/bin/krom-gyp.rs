//! CLI entry point for krom-gyp.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use krom_gyp::config::{self, Config};
use krom_gyp::platform::Platform;

const DEFAULT_CONFIG: &str = "krom-gyp.toml";

/// krom-gyp — write krom.gypi and krom_libs.gypi from kmake's JSON output.
#[derive(Parser, Debug)]
#[command(name = "krom-gyp", version, about)]
struct Cli {
    /// Path to the krom-gyp.toml configuration file. Built-in defaults are
    /// used when this is omitted and ./krom-gyp.toml does not exist.
    config: Option<PathBuf>,

    /// Platform identifier to project libraries for (defaults to the host).
    #[arg(long)]
    platform: Option<String>,

    /// Project the existing descriptor without running the generator.
    #[arg(long)]
    skip_generate: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("krom_gyp=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG);
        default.is_file().then_some(default)
    });

    let mut cfg = match &config_path {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };
    if cli.skip_generate {
        cfg.generator.enabled = false;
    }

    let base_dir = krom_gyp::base_dir_for(config_path.as_deref());

    let platform = cli.platform.map(Platform::new).unwrap_or_else(Platform::host);

    krom_gyp::run_from_config(&cfg, base_dir, &platform)?;
    Ok(())
}
