use anyhow::Result;
use clap::Parser;
use finai::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    finai::init_tracing(cli.verbose);
    cli.run().await
}
