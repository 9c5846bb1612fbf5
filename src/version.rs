use anyhow::{Context, Result, bail};

/// Kubernetes version the provisioned cluster is pinned to
pub const PINNED: &str = "1.34";

/// Given a version, parse the minor version
///
/// For example, the format Amazon EKS uses for the cluster version is `1.34`, which
/// yields `34`. Anything that is not a `1.<minor>` pair is rejected
pub fn parse_minor(version: &str) -> Result<i32> {
  let mut parts = version.trim().split('.');

  match (parts.next(), parts.next(), parts.next()) {
    (Some("1"), Some(minor), None) => minor
      .parse::<i32>()
      .with_context(|| format!("Unable to parse minor version from `{version}`")),
    _ => bail!("`{version}` is not a valid Kubernetes version (expected `1.<minor>`)"),
  }
}
