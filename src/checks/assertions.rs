use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::error::OutputError;

/// A single divergence between what the provisioning run claims and what the cluster reports
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
  /// Output name or live field the divergence was found on
  pub subject: String,
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub expected: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub actual: Option<String>,
}

impl Mismatch {
  pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      subject: subject.into(),
      message: message.into(),
      expected: None,
      actual: None,
    }
  }

  pub fn expected(mut self, expected: impl fmt::Display) -> Self {
    self.expected = Some(expected.to_string());
    self
  }

  pub fn actual(mut self, actual: impl fmt::Display) -> Self {
    self.actual = Some(actual.to_string());
    self
  }
}

impl fmt::Display for Mismatch {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}: {}", self.subject, self.message)?;
    match (&self.expected, &self.actual) {
      (Some(expected), Some(actual)) => write!(f, " (expected `{expected}`, got `{actual}`)"),
      (Some(expected), None) => write!(f, " (expected `{expected}`)"),
      (None, Some(actual)) => write!(f, " (got `{actual}`)"),
      (None, None) => Ok(()),
    }
  }
}

/// Collects mismatches without stopping at the first one
///
/// Every method records a mismatch when its condition does not hold and returns whether it held,
/// so callers can still guard follow-up assertions that would only repeat the same failure
#[derive(Debug, Default)]
pub struct Assertions {
  mismatches: Vec<Mismatch>,
}

impl Assertions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn fail(&mut self, mismatch: Mismatch) {
    self.mismatches.push(mismatch);
  }

  /// Unwrap a resolved output, recording a mismatch named after the output when it is missing
  /// or of the wrong shape
  pub fn output<T>(&mut self, resolved: Result<T, OutputError>) -> Option<T> {
    match resolved {
      Ok(value) => Some(value),
      Err(err) => {
        self.fail(Mismatch::new(err.name(), err.to_string()));
        None
      }
    }
  }

  /// `expected` (from `subject`) must equal the live `field`; an absent live value never passes
  pub fn equal(&mut self, subject: &str, field: &str, expected: &str, actual: Option<&str>) -> bool {
    match actual {
      Some(actual) if actual == expected => true,
      Some(actual) => {
        self.fail(
          Mismatch::new(subject, format!("does not match live `{field}`"))
            .expected(expected)
            .actual(actual),
        );
        false
      }
      None => {
        self.fail(Mismatch::new(subject, format!("live `{field}` is absent")).expected(expected));
        false
      }
    }
  }

  /// A live field must carry a fixed value
  pub fn field_equal(&mut self, field: &str, expected: &str, actual: Option<&str>) -> bool {
    match actual {
      Some(actual) if actual == expected => true,
      Some(actual) => {
        self.fail(Mismatch::new(field, "unexpected value").expected(expected).actual(actual));
        false
      }
      None => {
        self.fail(Mismatch::new(field, "is absent").expected(expected));
        false
      }
    }
  }

  pub fn not_empty(&mut self, subject: &str, value: &str) -> bool {
    if value.trim().is_empty() {
      self.fail(Mismatch::new(subject, "is empty"));
      return false;
    }
    true
  }

  /// A live field must be present and non-empty
  pub fn present<'a>(&mut self, field: &str, value: Option<&'a str>) -> Option<&'a str> {
    match value {
      Some(v) if !v.trim().is_empty() => Some(v),
      Some(_) => {
        self.fail(Mismatch::new(field, "is empty"));
        None
      }
      None => {
        self.fail(Mismatch::new(field, "is absent"));
        None
      }
    }
  }

  pub fn contains(&mut self, subject: &str, value: &str, needle: &str) -> bool {
    if !value.contains(needle) {
      self.fail(Mismatch::new(subject, format!("does not contain `{needle}`")).actual(value));
      return false;
    }
    true
  }

  pub fn starts_with(&mut self, subject: &str, value: &str, prefix: &str) -> bool {
    if !value.starts_with(prefix) {
      self.fail(Mismatch::new(subject, format!("does not start with `{prefix}`")).actual(value));
      return false;
    }
    true
  }

  pub fn at_least(&mut self, subject: &str, actual: usize, minimum: usize) -> bool {
    if actual < minimum {
      self.fail(
        Mismatch::new(subject, format!("has fewer than {minimum} entries"))
          .expected(format!(">= {minimum}"))
          .actual(actual),
      );
      return false;
    }
    true
  }

  pub fn flag(&mut self, field: &str, expected: bool, actual: bool) -> bool {
    if expected != actual {
      self.fail(Mismatch::new(field, "unexpected value").expected(expected).actual(actual));
      return false;
    }
    true
  }

  pub fn has_key(&mut self, subject: &str, map: &BTreeMap<String, String>, key: &str) -> bool {
    if !map.contains_key(key) {
      self.fail(Mismatch::new(subject, format!("is missing key `{key}`")));
      return false;
    }
    true
  }

  pub fn finish(self) -> Vec<Mismatch> {
    self.mismatches
  }
}
