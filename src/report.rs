use anyhow::Result;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled, settings::Style};

use crate::checks::{Group, Mismatch};

/// Result of evaluating a single check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  Passed,
  Failed,
  /// Excluded by configuration; never used for a check that could not find its data
  Skipped,
}

impl Status {
  pub(crate) fn symbol(&self) -> &'static str {
    match self {
      Status::Passed => "✅",
      Status::Failed => "❌",
      Status::Skipped => "⏭️",
    }
  }
}

impl std::fmt::Display for Status {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match *self {
      Status::Passed => write!(f, "Passed"),
      Status::Failed => write!(f, "Failed"),
      Status::Skipped => write!(f, "Skipped"),
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckOutcome {
  pub group: Group,
  pub check: String,
  pub status: Status,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub mismatches: Vec<Mismatch>,
}

impl CheckOutcome {
  pub fn evaluated(group: Group, check: &str, mismatches: Vec<Mismatch>) -> Self {
    let status = if mismatches.is_empty() {
      Status::Passed
    } else {
      Status::Failed
    };

    Self {
      group,
      check: check.to_owned(),
      status,
      mismatches,
    }
  }

  pub fn skipped(group: Group, check: &str) -> Self {
    Self {
      group,
      check: check.to_owned(),
      status: Status::Skipped,
      mismatches: vec![],
    }
  }
}

/// Outcomes of one test group, sharing a single live snapshot
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupReport {
  pub group: Group,
  /// Name of the cluster the group described, when it could be resolved
  pub cluster: Option<String>,
  pub outcomes: Vec<CheckOutcome>,
  /// Set when the group could not run at all (no cluster name, or the describe call failed)
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl GroupReport {
  pub fn aborted(group: Group, cluster: Option<String>, error: impl std::fmt::Display) -> Self {
    Self {
      group,
      cluster,
      outcomes: vec![],
      error: Some(error.to_string()),
    }
  }

  pub fn passed(&self) -> bool {
    self.error.is_none() && self.outcomes.iter().all(|o| o.status != Status::Failed)
  }

  fn count(&self, status: Status) -> usize {
    self.outcomes.iter().filter(|o| o.status == status).count()
  }
}

/// Totals across every group of a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
  pub passed: usize,
  pub failed: usize,
  pub skipped: usize,
  /// Groups that aborted before evaluating any check
  pub aborted: usize,
}

impl std::fmt::Display for Summary {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(
      f,
      "{} passed, {} failed, {} skipped",
      self.passed, self.failed, self.skipped
    )?;
    if self.aborted > 0 {
      write!(f, ", {} group(s) aborted", self.aborted)?;
    }
    Ok(())
  }
}

/// Container of all group reports collected in a run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Report {
  pub groups: Vec<GroupReport>,
}

#[derive(Tabled)]
#[tabled(rename_all = "UpperCase")]
struct OutcomeRow {
  #[tabled(rename = " ")]
  symbol: &'static str,
  check: String,
  details: String,
}

impl From<&CheckOutcome> for OutcomeRow {
  fn from(outcome: &CheckOutcome) -> Self {
    Self {
      symbol: outcome.status.symbol(),
      check: outcome.check.clone(),
      details: outcome
        .mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"),
    }
  }
}

impl Report {
  /// True when no check failed and no group aborted
  pub fn passed(&self) -> bool {
    self.groups.iter().all(GroupReport::passed)
  }

  pub fn summary(&self) -> Summary {
    self.groups.iter().fold(Summary::default(), |mut acc, group| {
      acc.passed += group.count(Status::Passed);
      acc.failed += group.count(Status::Failed);
      acc.skipped += group.count(Status::Skipped);
      if group.error.is_some() {
        acc.aborted += 1;
      }
      acc
    })
  }

  /// Every mismatch in the run, prefixed with its group and check
  pub fn failures(&self) -> Vec<String> {
    self
      .groups
      .iter()
      .flat_map(|group| group.outcomes.iter())
      .flat_map(|outcome| {
        outcome
          .mismatches
          .iter()
          .map(move |m| format!("{}/{}: {m}", outcome.group, outcome.check))
      })
      .collect()
  }

  pub fn to_stdout_table(&self) -> Result<String> {
    let mut output = String::new();

    for group in &self.groups {
      let cluster = group.cluster.as_deref().unwrap_or("<unknown>");
      output.push_str(&format!("{} [{cluster}]\n", group.group));

      if let Some(error) = &group.error {
        output.push_str(&format!("{} {error}\n\n", Status::Failed.symbol()));
        continue;
      }

      let rows: Vec<OutcomeRow> = group.outcomes.iter().map(OutcomeRow::from).collect();
      let mut table = Table::new(rows);
      table.with(Style::sharp());
      output.push_str(&format!("{table}\n\n"));
    }

    output.push_str(&self.summary().to_string());
    output.push('\n');

    Ok(output)
  }
}
