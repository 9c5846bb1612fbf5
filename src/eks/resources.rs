use aws_sdk_eks::{Client as EksClient, error::DisplayErrorContext};
use tracing::{debug, error};

use crate::{eks::DeployedCluster, error::FetchError};

/// Describe the cluster to get its full details
///
/// One `DescribeCluster` round trip; whatever retry behavior the SDK client was built with
/// is the only retry that happens
pub async fn get_cluster(client: &EksClient, name: &str) -> Result<DeployedCluster, FetchError> {
  debug!(cluster = name, "Describing cluster");

  let response = match client.describe_cluster().name(name).send().await {
    Ok(response) => response,
    Err(err) => {
      let err = err.into_service_error();
      if err.is_resource_not_found_exception() {
        error!("Cluster {name} not found");
        return Err(FetchError::NotFound { name: name.to_owned() });
      }

      let message = DisplayErrorContext(&err).to_string();
      error!("Unable to describe cluster {name}: {message}");
      return Err(FetchError::Api {
        name: name.to_owned(),
        message,
      });
    }
  };

  match response.cluster() {
    Some(cluster) => Ok(DeployedCluster::from(cluster)),
    None => Err(FetchError::NotFound { name: name.to_owned() }),
  }
}
