use std::collections::BTreeMap;

use eksverify::{
  eks::{DeployedCluster, LogSetup, NetworkConfig},
  outputs::{self, ExpectedOutputs, OutputValue},
};

use super::mock_aws::MockAwsClients;

pub const CLUSTER_NAME: &str = "demo-eks";
pub const CLUSTER_ARN: &str = "arn:aws:eks:us-east-1:123456789012:cluster/demo-eks";
pub const ENDPOINT: &str = "https://ABCDEF0123456789.gr7.us-east-1.eks.amazonaws.com";
pub const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/eks-role";
pub const SECURITY_GROUP_ID: &str = "sg-0123456789abcdef0";

fn tags() -> BTreeMap<String, String> {
  BTreeMap::from([
    ("env".to_string(), "test".to_string()),
    ("team".to_string(), "platform".to_string()),
  ])
}

/// Builds an ACTIVE 1.34 cluster spread over two subnets with api and audit logging on
pub fn healthy_cluster() -> DeployedCluster {
  let mut live_tags = tags();
  // Provider added tags are not part of the outputs
  live_tags.insert("aws:cloudformation:stack-name".into(), "ignored".into());

  DeployedCluster {
    id: None,
    name: Some(CLUSTER_NAME.into()),
    arn: Some(CLUSTER_ARN.into()),
    status: Some("ACTIVE".into()),
    endpoint: Some(ENDPOINT.into()),
    version: Some("1.34".into()),
    network: Some(NetworkConfig {
      vpc_id: Some("vpc-0123456789abcdef0".into()),
      subnet_ids: vec!["subnet-1".into(), "subnet-2".into()],
      cluster_security_group_id: Some(SECURITY_GROUP_ID.into()),
      security_group_ids: vec![],
      endpoint_public_access: true,
      endpoint_private_access: true,
    }),
    logging: Some(vec![
      LogSetup {
        enabled: Some(true),
        types: vec!["api".into(), "audit".into()],
      },
      LogSetup {
        enabled: Some(false),
        types: vec!["scheduler".into()],
      },
    ]),
    tags: live_tags,
    role_arn: Some(ROLE_ARN.into()),
  }
}

/// Outputs a provisioning run of [`healthy_cluster`] would have emitted
pub fn matching_outputs() -> ExpectedOutputs {
  let generated = BTreeMap::from([
    ("eks_cluster".to_string(), CLUSTER_NAME.to_string()),
    ("iam_role".to_string(), "demo-eks-role".to_string()),
    ("vpc".to_string(), "demo-eks-vpc".to_string()),
  ]);

  let entries: Vec<(&str, OutputValue)> = vec![
    (outputs::CLUSTER_NAME, CLUSTER_NAME.into()),
    (outputs::RESOURCE_ID, CLUSTER_NAME.into()),
    (outputs::RESOURCE_NAME, CLUSTER_NAME.into()),
    (outputs::CLUSTER_VERSION, "1.34".into()),
    (outputs::CLUSTER_ARN, CLUSTER_ARN.into()),
    (outputs::CLUSTER_ENDPOINT, ENDPOINT.into()),
    (outputs::CLUSTER_SECURITY_GROUP_ID, SECURITY_GROUP_ID.into()),
    (outputs::CLUSTER_ROLE_ARN, ROLE_ARN.into()),
    (outputs::CLUSTER_TAGS, tags().into()),
    (outputs::RESOURCE_NAMES_GENERATED, generated.into()),
  ];

  entries.into_iter().collect()
}

pub fn healthy_aws() -> MockAwsClients {
  MockAwsClients::new(healthy_cluster())
}
