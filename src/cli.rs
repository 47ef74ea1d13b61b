//! Command line interface.
//!
//! Kept in the library so argument handling can be tested; `main.rs` only
//! sets up logging and calls [`run`].

use crate::config::{self, OutputFormat};
use crate::input::{read_plan_requests, PlanRequest, PlanRequests};
use crate::models::{AddressBlock, CloudProvider};
use crate::output::{plan_print, plans_to_json, write_plan_file};
use crate::processing::{find_overlapping_plans, log_overlapping_plans, NamedPlan};
use crate::{check_plans, plan_requests};
use clap::{Args, Parser, Subcommand};
use std::error::Error;

/// subnet-planner - split a network block into public and private subnets
#[derive(Parser, Debug)]
#[command(name = "subnet-planner")]
#[command(version, about = "Split a network block into public and private subnets")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Reservation rules to apply: aws, azure, gcp, oci or none
    #[arg(long, global = true, env = config::ENV_PROVIDER, default_value_t = CloudProvider::default())]
    pub provider: CloudProvider,

    /// Output format on stdout: csv or json
    #[arg(long, global = true, env = config::ENV_FORMAT, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    /// Also write the plans as JSON to this file
    #[arg(long, global = true)]
    pub out: Option<String>,

    /// Write the plans to a dated JSON file (ignored when --out is given)
    #[arg(long, global = true)]
    pub save: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Partition a single CIDR block
    Plan(PlanArgs),

    /// Plan every request in a JSON request file
    File(FileArgs),
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Parent CIDR block, e.g. 172.16.0.0/24
    pub cidr: String,

    /// Number of public subnets
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub public: i64,

    /// Number of private subnets
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub private: i64,

    /// Comma separated availability zones
    #[arg(long, value_delimiter = ',')]
    pub zones: Vec<String>,

    /// Label for the plan in output
    #[arg(long, default_value = "plan")]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Path to the JSON request file
    pub path: String,
}

/// Execute the parsed command line.
pub fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let plans = match &cli.command {
        Commands::Plan(args) => vec![plan_command(args, cli.provider)?],
        Commands::File(args) => file_command(args, cli.provider)?,
    };
    check_plans(&plans)?;

    match cli.format {
        OutputFormat::Csv => plan_print(&plans)?,
        OutputFormat::Json => println!("{}", plans_to_json(&plans)?),
    }

    if let Some(target) = plan_file_target(cli.out.as_deref(), cli.save) {
        let written = write_plan_file(&plans, target)?;
        log::info!("Plan file written: {written}");
    }
    Ok(())
}

/// Where `run` writes the plan file: `Some(None)` means the dated default name.
fn plan_file_target(out: Option<&str>, save: bool) -> Option<Option<&str>> {
    match (out, save) {
        (Some(file), _) => Some(Some(file)),
        (None, true) => Some(None),
        (None, false) => None,
    }
}

/// Plan one block from command line arguments.
pub fn plan_command(args: &PlanArgs, provider: CloudProvider) -> Result<NamedPlan, Box<dyn Error>> {
    let request = PlanRequest {
        name: args.name.clone(),
        cidr: AddressBlock::new(&args.cidr)?,
        public: args.public,
        private: args.private,
        zones: args.zones.clone(),
        provider: Some(provider),
    };
    let requests = PlanRequests {
        requests: vec![request],
    };
    let mut plans = plan_requests(&requests, provider)?;
    plans
        .pop()
        .ok_or_else(|| "No plan computed".into())
}

/// Plan every request in a file and warn about overlapping parents.
pub fn file_command(
    args: &FileArgs,
    provider: CloudProvider,
) -> Result<Vec<NamedPlan>, Box<dyn Error>> {
    let requests = read_plan_requests(&args.path)?;
    let plans = plan_requests(&requests, provider)?;

    let conflicts = find_overlapping_plans(&plans);
    log_overlapping_plans(&conflicts);
    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_parse_plan_args() {
        let cli = Cli::try_parse_from([
            "subnet-planner",
            "plan",
            "172.16.0.0/24",
            "--public",
            "2",
            "--private",
            "2",
            "--zones",
            "us-west-2a,us-west-2b",
            "--provider",
            "aws",
        ])
        .unwrap();
        assert_eq!(cli.provider, CloudProvider::Aws);
        assert_eq!(cli.format, OutputFormat::Csv);
        let Commands::Plan(args) = &cli.command else {
            panic!("expected plan command");
        };
        assert_eq!(args.zones, vec!["us-west-2a", "us-west-2b"]);

        let named = plan_command(args, cli.provider).unwrap();
        assert_eq!(named.plan.public_cidrs(), vec!["172.16.0.0/26", "172.16.0.64/26"]);
        assert_eq!(named.plan.subnets[3].zone.as_deref(), Some("us-west-2b"));
    }

    #[test]
    #[serial]
    fn test_plan_command_rejects_negative_count() {
        let cli = Cli::try_parse_from([
            "subnet-planner",
            "plan",
            "172.16.0.0/24",
            "--public",
            "-1",
            "--private",
            "2",
        ])
        .unwrap();
        let Commands::Plan(args) = &cli.command else {
            panic!("expected plan command");
        };
        let err = plan_command(args, cli.provider).unwrap_err();
        assert!(err.to_string().contains("must not be negative"), "{err}");
    }

    #[test]
    #[serial]
    fn test_parse_rejects_unknown_provider() {
        let result = Cli::try_parse_from([
            "subnet-planner",
            "--provider",
            "digitalocean",
            "plan",
            "10.0.0.0/16",
            "--public",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_file_command() {
        let args = FileArgs {
            path: "src/tests/test_data/plan_requests_01.json".to_string(),
        };
        let plans = file_command(&args, CloudProvider::Azure).unwrap();
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].provider, CloudProvider::Aws);
        assert_eq!(plans[1].provider, CloudProvider::Azure);
        assert_eq!(find_overlapping_plans(&plans).len(), 1);
    }

    #[test]
    #[serial]
    fn test_provider_and_format_from_env() {
        std::env::set_var(config::ENV_PROVIDER, "gcp");
        std::env::set_var(config::ENV_FORMAT, "json");
        let from_env = Cli::try_parse_from(["subnet-planner", "plan", "10.0.0.0/16", "--public", "1"]);
        let flag_wins = Cli::try_parse_from([
            "subnet-planner",
            "--provider",
            "oci",
            "plan",
            "10.0.0.0/16",
            "--public",
            "1",
        ]);
        std::env::remove_var(config::ENV_PROVIDER);
        std::env::remove_var(config::ENV_FORMAT);

        let cli = from_env.unwrap();
        assert_eq!(cli.provider, CloudProvider::Gcp);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(flag_wins.unwrap().provider, CloudProvider::Oci);
    }

    #[test]
    #[serial]
    fn test_run_json_writes_out_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plan.json");
        let cli = Cli::try_parse_from([
            "subnet-planner",
            "--format",
            "json",
            "--out",
            out.to_str().unwrap(),
            "plan",
            "10.0.0.0/16",
            "--public",
            "3",
            "--private",
            "2",
            "--provider",
            "aws",
        ])
        .unwrap();
        run(cli).unwrap();

        let json = std::fs::read_to_string(&out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let plan = &value["plans"][0];
        assert_eq!(plan["provider"], "aws");
        assert_eq!(plan["public"][2], "10.0.64.0/19");
        assert_eq!(plan["private"][1], "10.0.128.0/19");
        assert_eq!(plan["free"][0], "10.0.160.0/19");
    }

    #[test]
    #[serial]
    fn test_run_csv_from_request_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plans.json");
        let cli = Cli::try_parse_from([
            "subnet-planner",
            "file",
            "src/tests/test_data/plan_requests_01.json",
            "--out",
            out.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Csv);
        run(cli).unwrap();

        let json = std::fs::read_to_string(&out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["plans"].as_array().unwrap().len(), 3);
    }

    #[test]
    #[serial]
    fn test_run_fails_on_unplannable_request() {
        let cli = Cli::try_parse_from([
            "subnet-planner",
            "plan",
            "172.16.0.0/30",
            "--public",
            "1",
            "--private",
            "1",
        ])
        .unwrap();
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("172.16.0.0/30"), "{err}");

        let cli = Cli::try_parse_from(["subnet-planner", "file", "src/tests/test_data/plan_requests_03.json"])
            .unwrap();
        assert!(run(cli).is_err());
    }

    #[test]
    fn test_plan_file_target() {
        assert_eq!(plan_file_target(None, false), None);
        assert_eq!(plan_file_target(None, true), Some(None));
        assert_eq!(plan_file_target(Some("a.json"), false), Some(Some("a.json")));
        assert_eq!(plan_file_target(Some("a.json"), true), Some(Some("a.json")));
    }
}
