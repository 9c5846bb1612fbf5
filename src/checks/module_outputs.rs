use crate::{
  checks::{Assertions, Check, CheckContext, Group, Mismatch},
  outputs, version,
};

pub(crate) const CHECKS: &[Check] = &[
  Check::new(
    Group::Outputs,
    "resource_id",
    "resource_id output is set and equals the live cluster name",
    resource_id,
  ),
  Check::new(
    Group::Outputs,
    "resource_name",
    "resource_name output is set and equals the live cluster name",
    resource_name,
  ),
  Check::new(
    Group::Outputs,
    "cluster_name",
    "cluster_name output is set and equals the live cluster name",
    cluster_name,
  ),
  Check::new(
    Group::Outputs,
    "cluster_arn",
    "cluster_arn output is an EKS ARN and equals the live ARN",
    cluster_arn,
  ),
  Check::new(
    Group::Outputs,
    "cluster_endpoint",
    "cluster_endpoint output is an https URL and equals the live endpoint",
    cluster_endpoint,
  ),
  Check::new(
    Group::Outputs,
    "cluster_version",
    "cluster_version output equals the pinned version and the live version",
    cluster_version,
  ),
  Check::new(
    Group::Outputs,
    "cluster_security_group_id",
    "cluster_security_group_id output is a security group and equals the live one",
    cluster_security_group_id,
  ),
  Check::new(
    Group::Outputs,
    "cluster_role_arn",
    "cluster_role_arn output is an IAM role ARN and equals the live role ARN",
    cluster_role_arn,
  ),
  Check::new(
    Group::Outputs,
    "resource_names_generated",
    "resource_names_generated output carries the expected keys and names the deployed cluster",
    resource_names_generated,
  ),
  Check::new(
    Group::Outputs,
    "cluster_vpc_configuration",
    "Endpoint access flags, subnet count and VPC of the live cluster",
    cluster_vpc_configuration,
  ),
  Check::new(
    Group::Outputs,
    "cluster_logging",
    "Required control plane log types are enabled when logging is configured",
    cluster_logging,
  ),
];

/// Shared shape of the three outputs that must all name the live cluster
fn names_live_cluster(ctx: &CheckContext<'_>, output: &str) -> Vec<Mismatch> {
  let mut a = Assertions::new();

  if let Some(value) = a.output(ctx.outputs.string(output))
    && a.not_empty(output, value)
  {
    a.equal(output, "cluster.name", value, ctx.cluster.name.as_deref());
  }

  a.finish()
}

fn resource_id(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  names_live_cluster(ctx, outputs::RESOURCE_ID)
}

fn resource_name(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  names_live_cluster(ctx, outputs::RESOURCE_NAME)
}

fn cluster_name(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  names_live_cluster(ctx, outputs::CLUSTER_NAME)
}

fn cluster_arn(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();

  if let Some(arn) = a.output(ctx.outputs.string(outputs::CLUSTER_ARN))
    && a.not_empty(outputs::CLUSTER_ARN, arn)
  {
    a.contains(outputs::CLUSTER_ARN, arn, &ctx.expectations.eks_arn_prefix());
    a.equal(outputs::CLUSTER_ARN, "cluster.arn", arn, ctx.cluster.arn.as_deref());
  }

  a.finish()
}

fn cluster_endpoint(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();

  if let Some(endpoint) = a.output(ctx.outputs.string(outputs::CLUSTER_ENDPOINT))
    && a.not_empty(outputs::CLUSTER_ENDPOINT, endpoint)
  {
    a.starts_with(outputs::CLUSTER_ENDPOINT, endpoint, "https://");
    a.equal(outputs::CLUSTER_ENDPOINT, "cluster.endpoint", endpoint, ctx.cluster.endpoint.as_deref());
  }

  a.finish()
}

fn cluster_version(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();

  if let Some(version) = a.output(ctx.outputs.string(outputs::CLUSTER_VERSION))
    && a.not_empty(outputs::CLUSTER_VERSION, version)
  {
    if let Err(err) = version::parse_minor(version) {
      a.fail(Mismatch::new(outputs::CLUSTER_VERSION, err.to_string()));
    }

    if let Some(pinned) = &ctx.expectations.version
      && pinned != version
    {
      a.fail(
        Mismatch::new(outputs::CLUSTER_VERSION, "does not match the pinned version")
          .expected(pinned)
          .actual(version),
      );
    }

    a.equal(outputs::CLUSTER_VERSION, "cluster.version", version, ctx.cluster.version.as_deref());
  }

  a.finish()
}

fn cluster_security_group_id(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();

  if let Some(sg_id) = a.output(ctx.outputs.string(outputs::CLUSTER_SECURITY_GROUP_ID))
    && a.not_empty(outputs::CLUSTER_SECURITY_GROUP_ID, sg_id)
  {
    a.starts_with(outputs::CLUSTER_SECURITY_GROUP_ID, sg_id, "sg-");

    let live = ctx
      .cluster
      .network
      .as_ref()
      .and_then(|network| network.cluster_security_group_id.as_deref());
    a.equal(
      outputs::CLUSTER_SECURITY_GROUP_ID,
      "cluster.cluster_security_group_id",
      sg_id,
      live,
    );
  }

  a.finish()
}

fn cluster_role_arn(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();

  if let Some(role_arn) = a.output(ctx.outputs.string(outputs::CLUSTER_ROLE_ARN))
    && a.not_empty(outputs::CLUSTER_ROLE_ARN, role_arn)
  {
    a.contains(outputs::CLUSTER_ROLE_ARN, role_arn, &ctx.expectations.iam_arn_prefix());
    a.contains(outputs::CLUSTER_ROLE_ARN, role_arn, ":role/");
    a.equal(outputs::CLUSTER_ROLE_ARN, "cluster.role_arn", role_arn, ctx.cluster.role_arn.as_deref());
  }

  a.finish()
}

fn resource_names_generated(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();

  let Some(names) = a.output(ctx.outputs.map(outputs::RESOURCE_NAMES_GENERATED)) else {
    return a.finish();
  };

  if names.is_empty() {
    a.fail(Mismatch::new(outputs::RESOURCE_NAMES_GENERATED, "is empty"));
    return a.finish();
  }

  for key in &ctx.expectations.resource_names {
    a.has_key(outputs::RESOURCE_NAMES_GENERATED, names, key);
  }

  // The generated cluster name must be the one that was deployed
  if let Some(generated) = names.get("eks_cluster")
    && let Some(cluster_name) = a.output(ctx.outputs.string(outputs::CLUSTER_NAME))
    && generated != cluster_name
  {
    a.fail(
      Mismatch::new(
        format!("{}[eks_cluster]", outputs::RESOURCE_NAMES_GENERATED),
        format!("does not match the `{}` output", outputs::CLUSTER_NAME),
      )
      .expected(cluster_name)
      .actual(generated),
    );
  }

  a.finish()
}

fn cluster_vpc_configuration(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();
  let expectations = ctx.expectations;

  let Some(network) = &ctx.cluster.network else {
    a.fail(Mismatch::new("cluster.resources_vpc_config", "is absent"));
    return a.finish();
  };

  a.flag(
    "cluster.endpoint_private_access",
    expectations.endpoint_private_access,
    network.endpoint_private_access,
  );
  a.flag(
    "cluster.endpoint_public_access",
    expectations.endpoint_public_access,
    network.endpoint_public_access,
  );

  if network.subnet_ids.is_empty() {
    a.fail(Mismatch::new("cluster.subnet_ids", "is empty"));
  } else {
    a.at_least("cluster.subnet_ids", network.subnet_ids.len(), expectations.min_subnets);
  }

  a.present("cluster.vpc_id", network.vpc_id.as_deref());

  a.finish()
}

/// Logging is only held to the required types when the cluster reports a logging configuration,
/// unless `require_logging` is set. A missing `logging` object and an empty entry list both count
/// as no configuration
fn cluster_logging(ctx: &CheckContext<'_>) -> Vec<Mismatch> {
  let mut a = Assertions::new();
  let expectations = ctx.expectations;

  let configured = ctx.cluster.logging.as_ref().is_some_and(|entries| !entries.is_empty());
  if !configured {
    if expectations.require_logging {
      a.fail(Mismatch::new("cluster.logging", "no logging configuration reported"));
    }
    return a.finish();
  }

  let enabled = ctx.cluster.enabled_log_types().unwrap_or_default();
  for required in &expectations.log_types {
    if !enabled.contains(&required.as_str()) {
      a.fail(
        Mismatch::new("cluster.logging", format!("`{required}` logging is not enabled"))
          .expected(required)
          .actual(if enabled.is_empty() { "none".to_string() } else { enabled.join(", ") }),
      );
    }
  }

  a.finish()
}
