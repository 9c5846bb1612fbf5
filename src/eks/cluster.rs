use std::collections::BTreeMap;

use aws_sdk_eks::types::Cluster;
use serde::{Deserialize, Serialize};

/// Point-in-time view of a cluster as reported by the Amazon EKS API
///
/// Built once per test group from the `DescribeCluster` response and only read afterwards.
/// Optional fields stay optional so that checks can report a field the API did not return
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeployedCluster {
  /// Only populated for local clusters on Outposts
  pub id: Option<String>,
  pub name: Option<String>,
  pub arn: Option<String>,
  pub status: Option<String>,
  pub endpoint: Option<String>,
  pub version: Option<String>,
  pub network: Option<NetworkConfig>,
  pub logging: Option<Vec<LogSetup>>,
  pub tags: BTreeMap<String, String>,
  pub role_arn: Option<String>,
}

/// The `resourcesVpcConfig` portion of the cluster
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
  pub vpc_id: Option<String>,
  pub subnet_ids: Vec<String>,
  /// Security group created by EKS for the control plane ENIs
  pub cluster_security_group_id: Option<String>,
  pub security_group_ids: Vec<String>,
  pub endpoint_public_access: bool,
  pub endpoint_private_access: bool,
}

/// One entry of the control plane logging configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSetup {
  pub enabled: Option<bool>,
  pub types: Vec<String>,
}

impl DeployedCluster {
  /// Union of log types across every logging entry that is switched on
  ///
  /// Returns `None` when the cluster reports no logging configuration at all
  pub fn enabled_log_types(&self) -> Option<Vec<&str>> {
    let logging = self.logging.as_ref()?;

    let mut enabled: Vec<&str> = logging
      .iter()
      .filter(|setup| setup.enabled == Some(true))
      .flat_map(|setup| setup.types.iter().map(String::as_str))
      .collect();
    enabled.sort_unstable();
    enabled.dedup();

    Some(enabled)
  }
}

impl From<&Cluster> for DeployedCluster {
  fn from(cluster: &Cluster) -> Self {
    let network = cluster.resources_vpc_config().map(|vpc| NetworkConfig {
      vpc_id: vpc.vpc_id().map(str::to_owned),
      subnet_ids: vpc.subnet_ids().to_owned(),
      cluster_security_group_id: vpc.cluster_security_group_id().map(str::to_owned),
      security_group_ids: vpc.security_group_ids().to_owned(),
      endpoint_public_access: vpc.endpoint_public_access(),
      endpoint_private_access: vpc.endpoint_private_access(),
    });

    let logging = cluster.logging().map(|logging| {
      logging
        .cluster_logging()
        .iter()
        .map(|setup| LogSetup {
          enabled: setup.enabled(),
          types: setup.types().iter().map(|t| t.as_str().to_owned()).collect(),
        })
        .collect()
    });

    DeployedCluster {
      id: cluster.id().map(str::to_owned),
      name: cluster.name().map(str::to_owned),
      arn: cluster.arn().map(str::to_owned),
      status: cluster.status().map(|s| s.as_str().to_owned()),
      endpoint: cluster.endpoint().map(str::to_owned),
      version: cluster.version().map(str::to_owned),
      network,
      logging,
      tags: cluster
        .tags()
        .map(|tags| tags.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default(),
      role_arn: cluster.role_arn().map(str::to_owned),
    }
  }
}
