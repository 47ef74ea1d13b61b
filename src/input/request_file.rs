//! JSON request files.
//!
//! A request file lists the networks to plan:
//!
//! ```json
//! { "requests": [ { "name": "eks", "cidr": "172.16.0.0/22", "public": 2, "private": 2,
//!                   "zones": ["us-west-2a", "us-west-2b"], "provider": "aws" } ] }
//! ```

use crate::error::PartitionResult;
use crate::models::{AddressBlock, CloudProvider, SubnetCount, SubnetPlan};
use crate::processing::{assign_zones, compute_subnets_with_policy};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

/// One network to partition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    /// Label used in output and overlap warnings.
    pub name: String,
    /// Parent block to partition.
    pub cidr: AddressBlock,
    /// Number of public subnets. Signed so negative input is reported, not truncated.
    pub public: i64,
    /// Number of private subnets.
    pub private: i64,
    /// Availability zones to spread each pool across.
    #[serde(default)]
    pub zones: Vec<String>,
    /// Reservation rules; falls back to the caller's default provider.
    #[serde(default)]
    pub provider: Option<CloudProvider>,
}

impl PlanRequest {
    /// Compute the plan for this request.
    pub fn plan(&self, default_provider: CloudProvider) -> PartitionResult<SubnetPlan> {
        let public = SubnetCount::try_from(self.public)?;
        let private = SubnetCount::try_from(self.private)?;
        let policy = self.provider.unwrap_or(default_provider).policy();

        let plan = compute_subnets_with_policy(self.cidr, public.get(), private.get(), &policy)?;
        Ok(assign_zones(&plan, &self.zones))
    }
}

/// Contents of a request file.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct PlanRequests {
    pub requests: Vec<PlanRequest>,
}

/// Parse request JSON, naming the failing path on error.
pub fn parse_plan_requests(json: &str) -> Result<PlanRequests, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let requests: PlanRequests = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing request JSON: path={} error={}", e.path(), e))?;
    Ok(requests)
}

/// Read a request file from disk.
pub fn read_plan_requests(request_file: &str) -> Result<PlanRequests, Box<dyn Error>> {
    if !Path::new(request_file).exists() {
        return Err(format!("Request file does not exist: {request_file}").into());
    }
    log::info!("Reading requests from file: {request_file}");

    let json = std::fs::read_to_string(request_file)
        .map_err(|e| format!("Error reading request file {request_file}: {e}"))?;
    let requests = parse_plan_requests(&json)?;

    log::info!(
        "Got {} request(s) from {request_file}",
        requests.requests.len()
    );
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_plan_requests_01() {
        let requests = read_plan_requests("src/tests/test_data/plan_requests_01.json")
            .expect("Error reading request file");
        assert_eq!(requests.requests.len(), 3);
        assert_eq!(requests.requests[0].name, "eks-platform");
        assert_eq!(requests.requests[0].provider, Some(CloudProvider::Aws));
        assert_eq!(requests.requests[1].zones.len(), 0);
        assert_eq!(requests.requests[1].provider, None);
    }

    #[test]
    fn test_read_plan_requests_bad_cidr() {
        let err = read_plan_requests("src/tests/test_data/plan_requests_02.json").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("requests[1].cidr"), "unexpected error: {msg}");
    }

    #[test]
    fn test_read_plan_requests_missing_file() {
        let err = read_plan_requests("src/tests/test_data/does_not_exist.json").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_plan_request_negative_count() {
        let requests = read_plan_requests("src/tests/test_data/plan_requests_03.json")
            .expect("Error reading request file");
        let err = requests.requests[0]
            .plan(CloudProvider::default())
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_plan_request_with_zones() {
        let requests = parse_plan_requests(
            r#"{"requests":[{"name":"vpc","cidr":"10.0.0.0/16","public":2,"private":2,
                "zones":["a","b"],"provider":"gcp"}]}"#,
        )
        .unwrap();
        let plan = requests.requests[0].plan(CloudProvider::Aws).unwrap();
        assert_eq!(plan.subnets[1].zone.as_deref(), Some("b"));
        assert_eq!(plan.subnets[2].zone.as_deref(), Some("a"));
        assert_eq!(plan.private_cidrs(), vec!["10.0.128.0/18", "10.0.192.0/18"]);
    }
}
