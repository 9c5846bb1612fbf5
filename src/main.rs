use std::process;

use anyhow::Result;
use clap::Parser;
use eksverify::{Cli, Commands};
use tracing_log::AsTrace;

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_max_level(cli.verbose.log_level_filter().as_trace())
    .init();

  match &cli.commands {
    Commands::Verify(args) => {
      if !eksverify::verify_cluster(args).await? {
        process::exit(2);
      }
    }
    Commands::ListChecks(args) => eksverify::list_checks(args)?,
  }

  Ok(())
}
