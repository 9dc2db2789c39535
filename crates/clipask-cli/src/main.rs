//! clipask binary.

use clap::Parser;
use clipask_cli::cli::{Cli, Invocation};
use clipask_cli::{commands, logging};
use clipask_core::ConfigStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = logging::log_path()?;
    // The floating prompt draws on the terminal; keep logs off it.
    let console = cli.invocation() != Invocation::Floating;
    logging::init(&log_path, cli.verbose, console)?;

    let config_store = ConfigStore::new();
    let config = config_store.load();

    if let Err(e) = commands::ask::run(&cli, &config, &config_store).await {
        tracing::error!(error = %format!("{e:#}"), "clipask failed");
        return Err(e);
    }
    Ok(())
}
