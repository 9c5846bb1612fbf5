use std::{fs::File, io::prelude::*};

use anyhow::{Context, Result};
use clap::ValueEnum;
use handlebars::Handlebars;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use tabled::{Table, settings::Style};

use crate::{checks::CheckInfo, report::Report};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Format {
  /// JSON format used for logging or writing to a *.json file
  Json,
  /// Markdown format suited for CI job summaries
  Markdown,
  /// Text format used for writing to stdout
  #[default]
  Text,
}

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

#[derive(Debug, Serialize)]
struct MarkdownRow {
  symbol: &'static str,
  check: String,
  details: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MarkdownGroup {
  name: String,
  cluster: String,
  error: Option<String>,
  rows: Vec<MarkdownRow>,
}

/// Data passed to the report template
#[derive(Debug, Serialize)]
struct MarkdownData {
  passed: bool,
  summary: String,
  groups: Vec<MarkdownGroup>,
}

impl From<&Report> for MarkdownData {
  fn from(report: &Report) -> Self {
    let groups = report
      .groups
      .iter()
      .map(|group| MarkdownGroup {
        name: group.group.to_string(),
        cluster: group.cluster.clone().unwrap_or_else(|| "unknown".to_string()),
        error: group.error.clone(),
        rows: group
          .outcomes
          .iter()
          .map(|outcome| MarkdownRow {
            symbol: outcome.status.symbol(),
            check: outcome.check.clone(),
            // Pipes would otherwise end the table cell early
            details: outcome.mismatches.iter().map(|m| m.to_string().replace('|', "\\|")).collect(),
          })
          .collect(),
      })
      .collect();

    Self {
      passed: report.passed(),
      summary: report.summary().to_string(),
      groups,
    }
  }
}

fn to_markdown(report: &Report) -> Result<String> {
  let mut handlebars = Handlebars::new();
  handlebars.register_escape_fn(handlebars::no_escape);
  handlebars
    .register_embed_templates::<Templates>()
    .context("Failed to register report templates")?;

  let rendered = handlebars.render("report.md", &MarkdownData::from(report))?;
  Ok(rendered)
}

/// Render the verification report in the requested format
pub fn render(report: &Report, format: &Format) -> Result<String> {
  let rendered = match format {
    Format::Json => serde_json::to_string_pretty(report)?,
    Format::Markdown => to_markdown(report)?,
    Format::Text => report.to_stdout_table()?,
  };

  Ok(rendered)
}

/// Render the list of registered checks in the requested format
pub fn render_checks(checks: &[CheckInfo], format: &Format) -> Result<String> {
  let rendered = match format {
    Format::Json => serde_json::to_string_pretty(checks)?,
    Format::Markdown => Table::new(checks).with(Style::markdown()).to_string(),
    Format::Text => Table::new(checks).with(Style::sharp()).to_string(),
  };

  Ok(rendered)
}

/// Write rendered output to a file, or stdout when no file is given
pub fn output(rendered: &str, filename: &Option<String>) -> Result<()> {
  match filename {
    Some(filename) => {
      let mut file = File::create(filename).with_context(|| format!("Failed to create {filename}"))?;
      file.write_all(rendered.as_bytes())?;
    }
    None => {
      println!("{rendered}");
    }
  }

  Ok(())
}
