use clap::Parser;
use live_probe_cli::{Cli, run, telemetry};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    telemetry::init_logging(cli.verbose);
    run(cli).await
}
