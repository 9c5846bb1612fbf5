//! Independent checks comparing provisioning outputs against the live cluster
//!
//! Each check is a plain function over a shared, read-only [`CheckContext`]. Checks never
//! short-circuit one another; a check returns every mismatch it found, and an empty list
//! means it passed.

mod assertions;
mod cluster;
mod module_outputs;

pub use assertions::{Assertions, Mismatch};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::{config::Expectations, eks::DeployedCluster, outputs::ExpectedOutputs};

/// Test groups; each group fetches the live cluster once and shares it across its checks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
  /// Existence, status and core properties of the deployed cluster
  Cluster,
  /// Every module output cross-checked against the live cluster
  Outputs,
}

impl Group {
  pub const ALL: [Group; 2] = [Group::Cluster, Group::Outputs];

  /// Checks registered for this group, in evaluation order
  pub fn checks(&self) -> &'static [Check] {
    match self {
      Group::Cluster => cluster::CHECKS,
      Group::Outputs => module_outputs::CHECKS,
    }
  }
}

impl std::fmt::Display for Group {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match *self {
      Group::Cluster => write!(f, "cluster"),
      Group::Outputs => write!(f, "outputs"),
    }
  }
}

/// Everything a check may look at
#[derive(Clone, Copy, Debug)]
pub struct CheckContext<'a> {
  pub outputs: &'a ExpectedOutputs,
  pub cluster: &'a DeployedCluster,
  pub expectations: &'a Expectations,
}

pub type Predicate = fn(&CheckContext<'_>) -> Vec<Mismatch>;

/// A named predicate belonging to a group
pub struct Check {
  pub group: Group,
  pub name: &'static str,
  pub description: &'static str,
  predicate: Predicate,
}

impl Check {
  pub(crate) const fn new(group: Group, name: &'static str, description: &'static str, predicate: Predicate) -> Self {
    Self {
      group,
      name,
      description,
      predicate,
    }
  }

  pub fn evaluate(&self, ctx: &CheckContext<'_>) -> Vec<Mismatch> {
    (self.predicate)(ctx)
  }
}

impl std::fmt::Debug for Check {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    f.debug_struct("Check")
      .field("group", &self.group)
      .field("name", &self.name)
      .finish()
  }
}

/// Row used when listing the registered checks
#[derive(Debug, Serialize, Deserialize, Tabled)]
#[tabled(rename_all = "UpperCase")]
pub struct CheckInfo {
  pub group: Group,
  #[tabled(rename = "CHECK")]
  pub name: String,
  pub description: String,
}

/// Every registered check across all groups
pub fn list() -> Vec<CheckInfo> {
  Group::ALL
    .iter()
    .flat_map(|group| group.checks())
    .map(|check| CheckInfo {
      group: check.group,
      name: check.name.to_string(),
      description: check.description.to_string(),
    })
    .collect()
}

/// Look up a check by name, returning the first match across groups
pub fn find(name: &str) -> Option<&'static Check> {
  Group::ALL
    .iter()
    .flat_map(|group| group.checks())
    .find(|check| check.name == name)
}
