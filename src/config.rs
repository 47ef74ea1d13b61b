//! Configuration constants and environment lookups.
//!
//! Values can be set in the environment or a `.env` file (loaded by `dotenv`
//! at startup).

use crate::error::PartitionError;
use std::fmt;
use std::str::FromStr;

/// Default log4rs configuration file, relative to the working directory.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";
/// Overrides [`LOG_CONFIG_FILE`].
pub const ENV_LOG_CONFIG: &str = "SUBNET_PLAN_LOG_CONFIG";
/// Default reservation policy for the CLI (aws, azure, gcp, oci, none).
pub const ENV_PROVIDER: &str = "SUBNET_PLAN_PROVIDER";
/// Default output format for the CLI (csv, json).
pub const ENV_FORMAT: &str = "SUBNET_PLAN_FORMAT";
/// Prefix of plan files written without an explicit path.
pub const PLAN_FILE_PREFIX: &str = "subnet_plan";

/// Path of the log4rs configuration file to load.
pub fn log_config_file() -> String {
    std::env::var(ENV_LOG_CONFIG).unwrap_or_else(|_| LOG_CONFIG_FILE.to_string())
}

/// How plans are printed.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = PartitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(PartitionError::InvalidArgument(format!(
                "Unknown output format '{other}' (expected csv or json)"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => f.write_str("csv"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}
