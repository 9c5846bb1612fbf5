use std::sync::{
  Arc, Mutex,
  atomic::{AtomicUsize, Ordering},
};

use eksverify::{clients::AwsClients, eks::DeployedCluster, error::FetchError};

/// Mock AWS client for testing. Returns the configured cluster for any name and
/// records every describe request so tests can count round trips.
/// A `None` cluster behaves like a name the API does not know.
#[derive(Clone, Default)]
pub struct MockAwsClients {
  pub cluster: Option<DeployedCluster>,
  calls: Arc<AtomicUsize>,
  requested: Arc<Mutex<Vec<String>>>,
}

impl MockAwsClients {
  pub fn new(cluster: DeployedCluster) -> Self {
    Self {
      cluster: Some(cluster),
      ..Default::default()
    }
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  pub fn requested(&self) -> Vec<String> {
    self.requested.lock().unwrap().clone()
  }
}

impl AwsClients for MockAwsClients {
  async fn get_cluster(&self, name: &str) -> Result<DeployedCluster, FetchError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.requested.lock().unwrap().push(name.to_owned());

    self.cluster.clone().ok_or_else(|| FetchError::NotFound { name: name.to_owned() })
  }
}

/// Mock that fails every describe call, used to verify group abort handling
pub struct MockAwsClientsError;

impl AwsClients for MockAwsClientsError {
  async fn get_cluster(&self, name: &str) -> Result<DeployedCluster, FetchError> {
    Err(FetchError::Api {
      name: name.to_owned(),
      message: "mock AWS error".to_owned(),
    })
  }
}
