use anyhow::Result;
use auditly::cli::{Cli, Command};
use auditly::{resolve_args, run};
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = match resolve_args(Cli::parse()) {
        Ok(args) => args,
        Err(e) => exit_with(e),
    };

    let level = match (&args.command, args.verbose) {
        (_, true) => "debug",
        (Command::Serve(_), false) => "info",
        _ => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        exit_with(e);
    }

    Ok(())
}

fn exit_with(error: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
    std::process::exit(1);
}
