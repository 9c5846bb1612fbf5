use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use serde::{Deserialize, Serialize};

use crate::{checks::Group, output::Format};

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

#[derive(Parser, Debug)]
#[command(author, about, version)]
#[command(propagate_version = true)]
#[command(styles=get_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub commands: Commands,

  #[clap(flatten)]
  pub verbose: Verbosity,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  #[command(arg_required_else_help = true)]
  Verify(Verify),
  ListChecks(ListChecks),
}

/// Verify a deployed Amazon EKS cluster against the outputs of the Terraform run that created it
#[derive(Args, Debug, Serialize, Deserialize)]
#[command(group(ArgGroup::new("source").required(true).args(["terraform_dir", "outputs_file"])))]
pub struct Verify {
  /// Directory of the Terraform configuration to read outputs from
  #[arg(short = 'd', long)]
  pub terraform_dir: Option<PathBuf>,

  /// File holding previously captured `terraform output -json`
  #[arg(long)]
  pub outputs_file: Option<PathBuf>,

  /// Terraform compatible binary used to read the outputs
  #[arg(long, default_value = "terraform")]
  pub terraform_bin: String,

  /// The AWS region where the cluster is provisioned
  #[arg(short, long)]
  pub region: Option<String>,

  /// Test groups to run, all groups when omitted
  #[arg(short, long = "group", value_enum)]
  pub groups: Vec<Group>,

  /// Path to the configuration file, `.eksverify.yaml` is used when present
  #[arg(short, long)]
  pub config: Option<String>,

  #[arg(short, long, value_enum, default_value_t)]
  pub format: Format,

  /// Write to file instead of stdout
  #[arg(short, long)]
  pub output: Option<String>,
}

/// List the checks eksverify runs
#[derive(Args, Debug, Serialize, Deserialize)]
pub struct ListChecks {
  #[arg(short, long, value_enum, default_value_t)]
  pub format: Format,
}
