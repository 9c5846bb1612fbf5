use tracing::{debug, error, info, warn};

use crate::{
  checks::{self, CheckContext, Group},
  clients::AwsClients,
  config::Config,
  outputs::{self, ExpectedOutputs},
  report::{CheckOutcome, GroupReport, Report},
};

/// Run the selected test groups and collect their outcomes
///
/// Groups are independent: one group aborting (no cluster name, describe failure) does not
/// stop the others from running
pub async fn verify<C: AwsClients>(client: &C, outputs: &ExpectedOutputs, config: &Config, groups: &[Group]) -> Report {
  for name in &config.checks.skip {
    if checks::find(name).is_none() {
      warn!("Unknown check `{name}` in skip list");
    }
  }

  let mut report = Report::default();
  for group in groups {
    report.groups.push(run_group(client, outputs, config, *group).await);
  }

  report
}

/// Run a single test group against one freshly fetched snapshot of the cluster
pub async fn run_group<C: AwsClients>(
  client: &C,
  outputs: &ExpectedOutputs,
  config: &Config,
  group: Group,
) -> GroupReport {
  let cluster_name = match outputs.string(outputs::CLUSTER_NAME) {
    Ok(name) if !name.trim().is_empty() => name,
    Ok(_) => {
      error!(%group, "Cannot run group, output `{}` is empty", outputs::CLUSTER_NAME);
      return GroupReport::aborted(group, None, format!("output `{}` is empty", outputs::CLUSTER_NAME));
    }
    Err(err) => {
      error!(%group, "Cannot run group, {err}");
      return GroupReport::aborted(group, None, err);
    }
  };

  info!(%group, cluster = cluster_name, "Running test group");

  // The only network round trip for the whole group
  let cluster = match client.get_cluster(cluster_name).await {
    Ok(cluster) => cluster,
    Err(err) => return GroupReport::aborted(group, Some(err.name().to_owned()), &err),
  };

  let ctx = CheckContext {
    outputs,
    cluster: &cluster,
    expectations: &config.expectations,
  };

  let outcomes = group
    .checks()
    .iter()
    .map(|check| {
      if !config.checks.should_check(check.name) {
        debug!(%group, check = check.name, "Skipping check");
        return CheckOutcome::skipped(group, check.name);
      }

      let mismatches = check.evaluate(&ctx);
      for mismatch in &mismatches {
        warn!(%group, check = check.name, "{mismatch}");
      }

      CheckOutcome::evaluated(group, check.name, mismatches)
    })
    .collect();

  GroupReport {
    group,
    cluster: Some(cluster_name.to_owned()),
    outcomes,
    error: None,
  }
}
