pub mod checks;
mod cli;
pub mod clients;
pub mod config;
pub mod eks;
pub mod error;
pub mod output;
pub mod outputs;
pub mod report;
pub mod verify;
pub mod version;

use std::{env, time::Duration};

use anyhow::{Result, bail};
use aws_config::{BehaviorVersion, meta::region::RegionProviderChain};
use aws_types::region::Region;
pub use cli::{Cli, Commands, ListChecks, Verify};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::{checks::Group, outputs::ExpectedOutputs};

/// Verify a deployed cluster against the outputs of its provisioning run
///
/// Returns whether every selected group passed; harness errors (unreadable outputs,
/// bad configuration) are returned as `Err`
pub async fn verify_cluster(args: &Verify) -> Result<bool> {
  let config = config::load(args.config.as_deref())?;
  let outputs = load_outputs(args).await?;
  if outputs.is_empty() {
    bail!("No outputs found, has the Terraform configuration been applied?");
  }
  info!(outputs = outputs.names().count(), "Loaded provisioning outputs");

  let aws_config = get_config(&args.region).await?;
  let client = clients::RealAwsClients::new(&aws_config);
  let groups = selected_groups(&args.groups);

  let spinner = spinner("Verifying cluster against outputs")?;
  let report = verify::verify(&client, &outputs, &config, &groups).await;
  spinner.finish_and_clear();

  let rendered = output::render(&report, &args.format)?;
  output::output(&rendered, &args.output)?;

  Ok(report.passed())
}

/// Print every registered check
pub fn list_checks(args: &ListChecks) -> Result<()> {
  let rendered = output::render_checks(&checks::list(), &args.format)?;
  output::output(&rendered, &None)
}

async fn load_outputs(args: &Verify) -> Result<ExpectedOutputs> {
  match (&args.terraform_dir, &args.outputs_file) {
    (_, Some(file)) => outputs::from_file(file),
    (Some(dir), None) => outputs::from_terraform(&args.terraform_bin, dir).await,
    (None, None) => bail!("Either `--terraform-dir` or `--outputs-file` is required"),
  }
}

/// Requested groups without duplicates, in declaration order; all groups when none were given
pub fn selected_groups(requested: &[Group]) -> Vec<Group> {
  if requested.is_empty() {
    return Group::ALL.to_vec();
  }

  let mut groups = requested.to_vec();
  groups.sort();
  groups.dedup();
  groups
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
  let spinner = ProgressBar::new_spinner();
  spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
  spinner.set_message(message);
  spinner.enable_steady_tick(Duration::from_millis(100));
  Ok(spinner)
}

/// Get the configuration to authn/authz with AWS that will be used across AWS clients
async fn get_config(region: &Option<String>) -> Result<aws_config::SdkConfig> {
  let aws_region = match region {
    Some(region) => Some(Region::new(region.to_owned())),
    None => env::var("AWS_REGION").ok().map(Region::new),
  };

  let region_provider = RegionProviderChain::first_try(aws_region).or_default_provider();

  Ok(
    aws_config::defaults(BehaviorVersion::latest())
      .region(region_provider)
      .load()
      .await,
  )
}
