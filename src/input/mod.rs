//! Plan request input.
//!
//! - [`request_file`] - Reading JSON request files

mod request_file;

pub use request_file::{parse_plan_requests, read_plan_requests, PlanRequest, PlanRequests};
