use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Sync(SyncArgs),
    Status(StatusArgs),
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Directory of inbound report files (one JSON document per report).
    #[arg(long)]
    pub reports: String,

    /// Store CSV file to extend.
    #[arg(long)]
    pub store: String,

    /// Sender substring a candidate report must contain (case-insensitive).
    #[arg(long, default_value = "info@hedgeye.com")]
    pub sender: String,

    /// Subject substring a candidate report must contain (case-insensitive).
    #[arg(long, default_value = "risk range")]
    pub subject_contains: String,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Store CSV file to inspect.
    #[arg(long)]
    pub store: String,
}
