//! CSV output formatting for subnet plans.

use crate::processing::{free_blocks, NamedPlan};
use colored::Colorize;
use std::error::Error;

use super::terminal::{format_field, summary_line};

/// Represents a row of plan data for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanPrintRow {
    /// Row index within the plan (0 for free space rows).
    pub j: usize,
    /// Pool name, or "-free-" for unallocated space.
    pub status: String,
    /// Subnet CIDR notation.
    pub subnet_cidr: String,
    /// Highest address in the block.
    pub broadcast: String,
    /// Usable hosts after the provider's reservations.
    pub hosts: u128,
    /// Availability zone.
    pub zone: String,
    /// Request name.
    pub name: String,
}

/// Build output rows for one plan: planned subnets, then free space.
pub fn plan_rows(named: &NamedPlan) -> Result<Vec<PlanPrintRow>, Box<dyn Error>> {
    let policy = named.provider.policy();
    let plan = &named.plan;

    let mut rows: Vec<PlanPrintRow> = plan
        .subnets
        .iter()
        .enumerate()
        .map(|(i, s)| PlanPrintRow {
            j: i + 1,
            status: s.role.to_string(),
            subnet_cidr: s.cidr.to_string(),
            broadcast: s.cidr.hi().to_string(),
            hosts: policy.usable_hosts(&s.cidr),
            zone: s.zone.clone().unwrap_or_else(|| "None".to_string()),
            name: named.name.clone(),
        })
        .collect();

    for gap in free_blocks(plan)? {
        rows.push(PlanPrintRow {
            j: 0,
            status: "-free-".to_string(),
            subnet_cidr: gap.to_string(),
            broadcast: gap.hi().to_string(),
            hosts: policy.usable_hosts(&gap),
            zone: "None".to_string(),
            name: named.name.clone(),
        });
    }
    Ok(rows)
}

/// CSV header matching [`format_csv_row`].
pub fn csv_header() -> String {
    format!(
        "{},{},{},{},{},{},{}",
        format_field("cnt", 6),
        format_field("role", 9),
        format_field("subnet_cidr", 22),
        format_field("broadcast", 19),
        format_field("hosts", 12),
        format_field("zone", 14),
        format_field("name", 20),
    )
}

/// Format a single CSV row.
pub fn format_csv_row(row: &PlanPrintRow) -> String {
    format!(
        r#"{j},{status},{subnet_cidr},{broadcast},{hosts},{zone},{name}"#,
        j = format_field(row.j, 6),
        status = format_field(&row.status, 9),
        subnet_cidr = format_field(&row.subnet_cidr, 22),
        broadcast = format_field(format!("{}_br", row.broadcast), 19),
        hosts = format_field(format!("{}_hosts", row.hosts), 12),
        zone = format_field(&row.zone, 14),
        name = format_field(&row.name, 20),
    )
}

/// Print plans as CSV to stdout, with a summary line per plan on stderr.
pub fn plan_print(plans: &[NamedPlan]) -> Result<(), Box<dyn Error>> {
    log::info!("#Start plan_print() for {} plan(s)", plans.len());

    println!("{}", csv_header());
    for named in plans {
        eprintln!("{}", summary_line(named));
        for row in plan_rows(named)? {
            println!("{}", format_csv_row(&row));
        }
    }

    log::info!("#{}# End plan_print()", "DONE".on_green());
    Ok(())
}
