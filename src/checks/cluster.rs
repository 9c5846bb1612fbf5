use crate::{
  checks::{Assertions, Check, CheckContext, Group, Mismatch},
  outputs,
};

pub(crate) const CHECKS: &[Check] = &[
  Check::new(
    Group::Cluster,
    "cluster_exists",
    "Cluster resolves by name and the live name matches exactly",
    cluster_exists,
  ),
  Check::new(
    Group::Cluster,
    "cluster_status",
    "Cluster reports the expected steady-state status",
    cluster_status,
  ),
  Check::new(
    Group::Cluster,
    "cluster_endpoint_present",
    "Cluster exposes a non-empty API server endpoint",
    cluster_endpoint_present,
  ),
  Check::new(
    Group::Cluster,
    "cluster_version_matches",
    "Live Kubernetes version equals the cluster_version output",
    cluster_version_matches,
  ),
  Check::new(
    Group::Cluster,
    "cluster_network_present",
    "Cluster has a VPC and subnets configured",
    cluster_network_present,
  ),
  Check::new(
    Group::Cluster,
    "cluster_tags",
    "Every cluster_tags entry is present on the live cluster with the same value",
    cluster_tags,
  ),
  Check::new(
    Group::Cluster,
    "cluster_role_arn_matches",
    "Live IAM role ARN equals the cluster_role_arn output",
    cluster_role_arn_matches,
  ),
];

fn cluster_exists(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();

  if let Some(name) = a.output(ctx.outputs.string(outputs::CLUSTER_NAME)) {
    a.equal(outputs::CLUSTER_NAME, "cluster.name", name, ctx.cluster.name.as_deref());
  }

  a.finish()
}

fn cluster_status(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();
  a.field_equal("cluster.status", &ctx.expectations.status, ctx.cluster.status.as_deref());
  a.finish()
}

fn cluster_endpoint_present(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();
  a.present("cluster.endpoint", ctx.cluster.endpoint.as_deref());
  a.finish()
}

fn cluster_version_matches(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();

  if let Some(version) = a.output(ctx.outputs.string(outputs::CLUSTER_VERSION)) {
    a.equal(outputs::CLUSTER_VERSION, "cluster.version", version, ctx.cluster.version.as_deref());
  }

  a.finish()
}

fn cluster_network_present(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();

  match &ctx.cluster.network {
    Some(network) => {
      a.present("cluster.vpc_id", network.vpc_id.as_deref());
      if network.subnet_ids.is_empty() {
        a.fail(Mismatch::new("cluster.subnet_ids", "is empty"));
      }
    }
    None => a.fail(Mismatch::new("cluster.resources_vpc_config", "is absent")),
  }

  a.finish()
}

/// Expected tags are a subset of the live tags; EKS and other providers add their own
fn cluster_tags(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();

  if let Some(tags) = a.output(ctx.outputs.map(outputs::CLUSTER_TAGS)) {
    for (key, value) in tags {
      a.equal(
        &format!("{}[{key}]", outputs::CLUSTER_TAGS),
        &format!("cluster.tags[{key}]"),
        value,
        ctx.cluster.tags.get(key).map(String::as_str),
      );
    }
  }

  a.finish()
}

fn cluster_role_arn_matches(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();

  if let Some(role_arn) = a.output(ctx.outputs.string(outputs::CLUSTER_ROLE_ARN)) {
    a.equal(outputs::CLUSTER_ROLE_ARN, "cluster.role_arn", role_arn, ctx.cluster.role_arn.as_deref());
  }

  a.finish()
}
