//! JSON output for subnet plans.

use crate::models::{AddressBlock, CloudProvider, SubnetPlan};
use crate::processing::{free_blocks, NamedPlan};
use serde::Serialize;
use std::error::Error;

/// A plan as written to JSON, with the pools flattened to CIDR strings.
#[derive(Serialize, Debug)]
pub struct PlanEntry<'a> {
    pub name: &'a str,
    pub provider: CloudProvider,
    pub public: Vec<String>,
    pub private: Vec<String>,
    pub free: Vec<AddressBlock>,
    pub plan: &'a SubnetPlan,
}

/// Top level JSON document.
#[derive(Serialize, Debug)]
pub struct PlanDocument<'a> {
    pub generated: String,
    pub plans: Vec<PlanEntry<'a>>,
}

/// Build the JSON document for a set of plans.
pub fn plan_document(plans: &[NamedPlan]) -> Result<PlanDocument<'_>, Box<dyn Error>> {
    let mut entries = Vec::with_capacity(plans.len());
    for named in plans {
        entries.push(PlanEntry {
            name: &named.name,
            provider: named.provider,
            public: named.plan.public_cidrs(),
            private: named.plan.private_cidrs(),
            free: free_blocks(&named.plan)?,
            plan: &named.plan,
        });
    }
    Ok(PlanDocument {
        generated: chrono::Utc::now().to_rfc3339(),
        plans: entries,
    })
}

/// Serialize plans as pretty printed JSON.
pub fn plans_to_json(plans: &[NamedPlan]) -> Result<String, Box<dyn Error>> {
    let document = plan_document(plans)?;
    let json =
        serde_json::to_string_pretty(&document).map_err(|e| format!("Error serializing JSON: {e}"))?;
    Ok(json)
}

/// Write plans to `plan_file`, or to `subnet_plan_<date>.json` when not given.
///
/// # Returns
/// The path written to.
pub fn write_plan_file(
    plans: &[NamedPlan],
    plan_file: Option<&str>,
) -> Result<String, Box<dyn Error>> {
    let plan_file = match plan_file {
        Some(file) => file.to_string(),
        None => format!(
            "{}_{}.json",
            crate::config::PLAN_FILE_PREFIX,
            chrono::Utc::now().format("%Y-%m-%d")
        ),
    };

    let json = plans_to_json(plans)?;
    log::warn!("Writing {} plan(s) to file: {plan_file}", plans.len());
    std::fs::write(&plan_file, json)
        .map_err(|e| format!("Error writing plan file {plan_file}: {e}"))?;
    Ok(plan_file)
}
