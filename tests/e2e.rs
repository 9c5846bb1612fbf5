mod common;

use std::process::Command;

use common::{fixtures, mock_aws::MockAwsClients, mock_aws::MockAwsClientsError};
use eksverify::{
  checks::{self, CheckInfo, Group},
  config::Config,
  output::{self, Format},
  report::Report,
  verify,
};

/// Helper: run every group against the given mock
async fn run_verify(aws: &MockAwsClients) -> Report {
  verify::verify(aws, &fixtures::matching_outputs(), &Config::default(), &Group::ALL).await
}

fn drifted() -> MockAwsClients {
  let mut cluster = fixtures::healthy_cluster();
  cluster.version = Some("1.33".into());
  MockAwsClients::new(cluster)
}

// ============================================================================
// Rendering
// ============================================================================

#[tokio::test]
async fn healthy_cluster_text() {
  let report = run_verify(&fixtures::healthy_aws()).await;
  let output = output::render(&report, &Format::Text).unwrap();

  assert!(output.contains("cluster [demo-eks]"));
  assert!(output.contains("outputs [demo-eks]"));
  for check in checks::list() {
    assert!(output.contains(&check.name), "{} missing from text report", check.name);
  }
  assert!(output.ends_with("18 passed, 0 failed, 0 skipped\n"), "{output}");
}

#[tokio::test]
async fn version_drift_failures() {
  let report = run_verify(&drifted()).await;

  insta::assert_snapshot!(report.failures().join("\n"), @r"
  cluster/cluster_version_matches: cluster_version: does not match live `cluster.version` (expected `1.34`, got `1.33`)
  outputs/cluster_version: cluster_version: does not match live `cluster.version` (expected `1.34`, got `1.33`)
  ");
}

#[tokio::test]
async fn version_drift_markdown() {
  let report = run_verify(&drifted()).await;
  let output = output::render(&report, &Format::Markdown).unwrap();

  assert!(output.contains("❌ Verification failed: 16 passed, 2 failed, 0 skipped"));
  assert!(output.contains("## cluster (`demo-eks`)"));
  assert!(output.contains("| ❌ | `cluster_version_matches` |"));
  assert!(output.contains("| ✅ | `cluster_logging` |"));
}

#[tokio::test]
async fn describe_failure_json() {
  let report = verify::verify(
    &MockAwsClientsError,
    &fixtures::matching_outputs(),
    &Config::default(),
    &[Group::Cluster],
  )
  .await;
  let output = output::render(&report, &Format::Json).unwrap();

  insta::assert_snapshot!(output, @r#"
  {
    "groups": [
      {
        "group": "cluster",
        "cluster": "demo-eks",
        "outcomes": [],
        "error": "Failed to describe EKS cluster demo-eks: mock AWS error"
      }
    ]
  }
  "#);
}

#[test]
fn list_checks_json() {
  let output = output::render_checks(&checks::list(), &Format::Json).unwrap();
  let parsed: Vec<CheckInfo> = serde_json::from_str(&output).unwrap();

  assert_eq!(parsed.len(), 18);
  assert_eq!(parsed.iter().filter(|c| c.group == Group::Cluster).count(), 7);
  assert_eq!(parsed[0].name, "cluster_exists");
}

// ============================================================================
// Binary
// ============================================================================

#[test]
fn binary_lists_checks() {
  let output = Command::new(env!("CARGO_BIN_EXE_eksverify"))
    .args(["list-checks", "--format", "markdown"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let stdout = String::from_utf8(output.stdout).unwrap();
  assert!(stdout.contains("| GROUP"));
  assert!(stdout.contains("resource_names_generated"));
}

#[test]
fn binary_exits_with_harness_error_on_unreadable_outputs() {
  let tmp = tempfile::tempdir().unwrap();
  let output = Command::new(env!("CARGO_BIN_EXE_eksverify"))
    .current_dir(tmp.path())
    .args(["verify", "--outputs-file", "missing.json", "--region", "us-east-1"])
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8(output.stderr).unwrap();
  assert!(stderr.contains("Failed to read outputs file"), "{stderr}");
}

#[test]
fn binary_requires_an_outputs_source() {
  let output = Command::new(env!("CARGO_BIN_EXE_eksverify"))
    .args(["verify", "--region", "us-east-1"])
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(2));
}
