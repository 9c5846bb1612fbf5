use crate::{
  eks::{self, DeployedCluster},
  error::FetchError,
};

/// Trait abstracting all AWS API operations used by eksverify
pub trait AwsClients {
  fn get_cluster(&self, name: &str) -> impl std::future::Future<Output = Result<DeployedCluster, FetchError>> + Send;
}

/// Real AWS client implementation wrapping the SDK clients
pub struct RealAwsClients {
  eks: aws_sdk_eks::Client,
}

impl RealAwsClients {
  pub fn new(config: &aws_config::SdkConfig) -> Self {
    Self {
      eks: aws_sdk_eks::Client::new(config),
    }
  }
}

impl AwsClients for RealAwsClients {
  async fn get_cluster(&self, name: &str) -> Result<DeployedCluster, FetchError> {
    eks::get_cluster(&self.eks, name).await
  }
}
