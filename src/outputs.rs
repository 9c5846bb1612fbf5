use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tokio::process::Command;
use tracing::debug;

use crate::error::OutputError;

pub const CLUSTER_NAME: &str = "cluster_name";
pub const CLUSTER_VERSION: &str = "cluster_version";
pub const CLUSTER_TAGS: &str = "cluster_tags";
pub const RESOURCE_ID: &str = "resource_id";
pub const RESOURCE_NAME: &str = "resource_name";
pub const CLUSTER_ARN: &str = "cluster_arn";
pub const CLUSTER_ENDPOINT: &str = "cluster_endpoint";
pub const CLUSTER_SECURITY_GROUP_ID: &str = "cluster_security_group_id";
pub const CLUSTER_ROLE_ARN: &str = "cluster_role_arn";
pub const RESOURCE_NAMES_GENERATED: &str = "resource_names_generated";

/// A single value emitted by the provisioning run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputValue {
  String(String),
  Map(BTreeMap<String, String>),
  Other(Json),
}

impl OutputValue {
  /// Scalars are rendered as strings and flat objects of strings become maps;
  /// lists and nested objects are kept as raw JSON
  fn from_json(value: Json) -> Self {
    match value {
      Json::String(s) => OutputValue::String(s),
      Json::Number(n) => OutputValue::String(n.to_string()),
      Json::Bool(b) => OutputValue::String(b.to_string()),
      Json::Object(obj) if obj.values().all(Json::is_string) => OutputValue::Map(
        obj
          .into_iter()
          .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_owned())))
          .collect(),
      ),
      other => OutputValue::Other(other),
    }
  }
}

impl From<&str> for OutputValue {
  fn from(value: &str) -> Self {
    OutputValue::String(value.to_owned())
  }
}

impl From<BTreeMap<String, String>> for OutputValue {
  fn from(value: BTreeMap<String, String>) -> Self {
    OutputValue::Map(value)
  }
}

/// Entry as printed by `terraform output -json`
#[derive(Debug, Deserialize)]
struct TerraformOutput {
  #[serde(default)]
  sensitive: bool,
  value: Json,
}

/// The expected side of every comparison, read once per provisioning run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpectedOutputs {
  values: BTreeMap<String, OutputValue>,
}

impl ExpectedOutputs {
  /// Parse the JSON document produced by `terraform output -json`
  pub fn from_json(contents: &str) -> Result<Self> {
    let raw: BTreeMap<String, TerraformOutput> =
      serde_json::from_str(contents).context("Failed to parse Terraform outputs as JSON")?;

    let values = raw
      .into_iter()
      .map(|(name, output)| {
        debug!(name = %name, sensitive = output.sensitive, "Loaded output");
        (name, OutputValue::from_json(output.value))
      })
      .collect();

    Ok(ExpectedOutputs { values })
  }

  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OutputValue>) {
    self.values.insert(name.into(), value.into());
  }

  pub fn get(&self, name: &str) -> Option<&OutputValue> {
    self.values.get(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.values.keys().map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Resolve a string output by name
  pub fn string(&self, name: &str) -> Result<&str, OutputError> {
    match self.values.get(name) {
      Some(OutputValue::String(s)) => Ok(s),
      Some(_) => Err(OutputError::WrongType {
        name: name.to_owned(),
        expected: "string",
      }),
      None => Err(OutputError::Missing(name.to_owned())),
    }
  }

  /// Resolve a map-of-strings output by name
  pub fn map(&self, name: &str) -> Result<&BTreeMap<String, String>, OutputError> {
    match self.values.get(name) {
      Some(OutputValue::Map(m)) => Ok(m),
      Some(_) => Err(OutputError::WrongType {
        name: name.to_owned(),
        expected: "map of strings",
      }),
      None => Err(OutputError::Missing(name.to_owned())),
    }
  }
}

impl<K: Into<String>, V: Into<OutputValue>> FromIterator<(K, V)> for ExpectedOutputs {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut outputs = ExpectedOutputs::default();
    for (name, value) in iter {
      outputs.insert(name, value);
    }
    outputs
  }
}

/// Read outputs previously captured with `terraform output -json > file`
pub fn from_file(path: &Path) -> Result<ExpectedOutputs> {
  let contents =
    std::fs::read_to_string(path).with_context(|| format!("Failed to read outputs file: {}", path.display()))?;

  ExpectedOutputs::from_json(&contents).with_context(|| format!("Invalid outputs file: {}", path.display()))
}

/// Run `<binary> output -json` in the given working directory and parse the result
///
/// `binary` is normally `terraform`, but any CLI that is output compatible (e.g. `tofu`) works
pub async fn from_terraform(binary: &str, dir: &Path) -> Result<ExpectedOutputs> {
  debug!(binary, dir = %dir.display(), "Reading provisioning outputs");

  let output = Command::new(binary)
    .args(["output", "-json"])
    .current_dir(dir)
    .output()
    .await
    .with_context(|| format!("Failed to run `{binary} output -json` in {}", dir.display()))?;

  if !output.status.success() {
    bail!(
      "`{binary} output -json` exited with {} in {}: {}",
      output.status,
      dir.display(),
      String::from_utf8_lossy(&output.stderr).trim()
    );
  }

  let stdout = String::from_utf8(output.stdout).context("Terraform outputs are not valid UTF-8")?;
  ExpectedOutputs::from_json(&stdout)
}
