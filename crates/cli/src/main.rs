use std::io;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use invtrack_cli::{App, Cli, CliConfig, execute};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_env(cli.data_dir.clone())?;
    invtrack_observability::init(config.log_format);
    tracing::debug!(data_dir = %config.data_dir.display(), "starting invtrack");

    let mut app = App::open(&config, Utc::now())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&mut app, cli.command, cli.json, Utc::now(), &mut out)
}
