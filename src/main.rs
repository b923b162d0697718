use anyhow::Result;
use clap::Parser;

use edu_agents::{cli, launch, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.into_config()?;
    telemetry::init_tracing(config.verbose);

    launch(&config).await?;
    Ok(())
}
