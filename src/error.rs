//! Error kinds surfaced while gathering the two sides of a comparison

use thiserror::Error;

/// Failure to obtain the live cluster snapshot
///
/// Fatal to the test group that requested the snapshot since nothing is left to compare against
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
  #[error("Cluster {name} not found")]
  NotFound { name: String },

  #[error("Failed to describe EKS cluster {name}: {message}")]
  Api { name: String, message: String },
}

impl FetchError {
  pub fn name(&self) -> &str {
    match self {
      FetchError::NotFound { name } | FetchError::Api { name, .. } => name,
    }
  }
}

/// Failure to resolve a named provisioning output
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OutputError {
  #[error("output `{0}` not found")]
  Missing(String),

  #[error("output `{name}` is not a {expected}")]
  WrongType { name: String, expected: &'static str },
}

impl OutputError {
  /// Name of the output that could not be resolved
  pub fn name(&self) -> &str {
    match self {
      OutputError::Missing(name) | OutputError::WrongType { name, .. } => name,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fetch_error_names_cluster() {
    let err = FetchError::Api {
      name: "demo".into(),
      message: "throttled".into(),
    };
    assert_eq!(err.name(), "demo");
    assert_eq!(err.to_string(), "Failed to describe EKS cluster demo: throttled");
  }

  #[test]
  fn output_error_display() {
    assert_eq!(
      OutputError::Missing("cluster_arn".into()).to_string(),
      "output `cluster_arn` not found"
    );
    assert_eq!(
      OutputError::WrongType {
        name: "cluster_tags".into(),
        expected: "map of strings",
      }
      .to_string(),
      "output `cluster_tags` is not a map of strings"
    );
  }
}
