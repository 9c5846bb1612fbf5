use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::version;

/// Top-level configuration loaded from `.eksverify.yaml` or an explicit path.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub expectations: Expectations,

  #[serde(default)]
  pub checks: ChecksConfig,
}

/// Fixed values the live cluster is held to, independent of the provisioning outputs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Expectations {
  /// Steady-state status the cluster must report (default `ACTIVE`).
  #[serde(default = "default_status")]
  pub status: String,

  /// Pinned Kubernetes version; `null` turns the pin off and only the output comparison remains.
  #[serde(default = "default_version")]
  pub version: Option<String>,

  /// Minimum number of control plane subnets (multi-AZ).
  #[serde(default = "default_min_subnets")]
  pub min_subnets: usize,

  #[serde(default = "default_true")]
  pub endpoint_public_access: bool,

  #[serde(default = "default_true")]
  pub endpoint_private_access: bool,

  /// Log types that must be enabled whenever the cluster reports a logging configuration.
  #[serde(default = "default_log_types")]
  pub log_types: Vec<String>,

  /// Fail the logging check when the cluster reports no logging configuration at all.
  #[serde(default)]
  pub require_logging: bool,

  /// ARN partition used to build the `arn:<partition>:eks:` and `arn:<partition>:iam:` patterns.
  #[serde(default = "default_partition")]
  pub partition: String,

  /// Keys that must be present in the `resource_names_generated` output.
  #[serde(default = "default_resource_names")]
  pub resource_names: Vec<String>,
}

fn default_status() -> String {
  "ACTIVE".to_string()
}

fn default_version() -> Option<String> {
  Some(version::PINNED.to_string())
}

fn default_min_subnets() -> usize {
  2
}

fn default_true() -> bool {
  true
}

fn default_log_types() -> Vec<String> {
  vec!["api".to_string(), "audit".to_string()]
}

fn default_partition() -> String {
  "aws".to_string()
}

fn default_resource_names() -> Vec<String> {
  vec!["eks_cluster".to_string(), "iam_role".to_string(), "vpc".to_string()]
}

impl Default for Expectations {
  fn default() -> Self {
    Self {
      status: default_status(),
      version: default_version(),
      min_subnets: default_min_subnets(),
      endpoint_public_access: true,
      endpoint_private_access: true,
      log_types: default_log_types(),
      require_logging: false,
      partition: default_partition(),
      resource_names: default_resource_names(),
    }
  }
}

impl Expectations {
  /// Prefix every EKS cluster ARN in the configured partition carries
  pub fn eks_arn_prefix(&self) -> String {
    format!("arn:{}:eks:", self.partition)
  }

  /// Prefix every IAM ARN in the configured partition carries
  pub fn iam_arn_prefix(&self) -> String {
    format!("arn:{}:iam:", self.partition)
  }
}

/// Per-check configuration knobs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChecksConfig {
  /// Checks to report as skipped instead of evaluating.
  #[serde(default)]
  pub skip: Vec<String>,
}

impl ChecksConfig {
  /// Returns true if the check should be evaluated (not skipped).
  pub fn should_check(&self, name: &str) -> bool {
    !self.skip.iter().any(|s| s == name)
  }
}

const DEFAULT_CONFIG_FILE: &str = ".eksverify.yaml";

/// Load configuration from an explicit path, the default `.eksverify.yaml` in the
/// current working directory, or fall back to `Config::default()`.
pub fn load(path: Option<&str>) -> Result<Config> {
  load_from(path, std::env::current_dir().ok().as_deref())
}

fn load_from(path: Option<&str>, base_dir: Option<&std::path::Path>) -> Result<Config> {
  if let Some(p) = path {
    let contents = std::fs::read_to_string(p).with_context(|| format!("Failed to read config file: {p}"))?;
    let config: Config =
      serde_yaml::from_str(&contents).with_context(|| format!("Failed to parse config file: {p}"))?;
    return Ok(config);
  }

  if let Some(dir) = base_dir {
    let default_path = dir.join(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
      let contents = std::fs::read_to_string(&default_path)
        .with_context(|| format!("Failed to read config file: {}", default_path.display()))?;
      let config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", default_path.display()))?;
      return Ok(config);
    }
  }

  Ok(Config::default())
}
