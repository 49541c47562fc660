/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::aws::AwsOptions;
use crate::records::{LookupMode, RecordId};

/// ddbpeek — fetch a quote or policy record from DynamoDB and print it as JSON.
#[derive(Debug, Parser)]
#[command(
    name = "ddbpeek",
    about = "Fetch a quote or policy record from DynamoDB and pretty-print it as colorized JSON",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Quote or policy ID (a UUID).
    #[arg(value_name = "ID", value_parser = RecordId::parse)]
    pub id: RecordId,

    /// Look up a policy instead of a quote and choose which sort key to fetch.
    #[arg(long)]
    pub policy: bool,

    /// With --policy, fetch the STATE sort key without prompting. Ignored for quotes.
    #[arg(long)]
    pub latest: bool,

    /// With --policy, print the policy's ordered sort keys and exit.
    #[arg(long, requires = "policy", conflicts_with = "latest")]
    pub list_keys: bool,

    /// Output format. Auto-detects: colored when stdout is a TTY, plain JSON when piped.
    #[arg(long, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, conflicts_with = "output")]
    pub no_color: bool,

    /// JSON file mapping account numbers to table names (replaces the built-in map).
    #[arg(long, value_name = "FILE", env = "DDBPEEK_TABLES")]
    pub tables: Option<PathBuf>,

    /// AWS shared config profile to use.
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// AWS region override.
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Custom DynamoDB endpoint (e.g. DynamoDB Local). Identity lookup still uses STS.
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print per-step timing to stderr.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    #[must_use]
    pub fn mode(&self) -> LookupMode {
        LookupMode::from_policy_flag(self.policy)
    }

    #[must_use]
    pub fn aws_options(&self) -> AwsOptions {
        AwsOptions {
            profile: self.profile.clone(),
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Auto-detect: color when stdout is a TTY, json when piped.
    #[default]
    Auto,
    /// Colorized, 2-space indented JSON.
    Color,
    /// Plain 2-space indented JSON.
    Json,
    /// Compact single-line JSON.
    Compact,
}
