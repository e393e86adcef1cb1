use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    riskrange_sync::logging::init().context("init logging")?;

    let cli = riskrange_sync::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        riskrange_sync::cli::Command::Sync(args) => {
            riskrange_sync::sync::run(args).context("sync")?;
        }
        riskrange_sync::cli::Command::Status(args) => {
            riskrange_sync::sync::status(args).context("status")?;
        }
    }

    Ok(())
}
