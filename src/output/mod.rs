//! Output formatting for subnet plans.
//!
//! This module handles formatting and outputting plans:
//! - [`csv`] - CSV output formatting
//! - [`json`] - JSON documents and plan files
//! - [`terminal`] - Terminal output with colors

mod csv;
mod json;
mod terminal;

pub use csv::{csv_header, format_csv_row, plan_print, plan_rows, PlanPrintRow};
pub use json::{plan_document, plans_to_json, write_plan_file, PlanDocument, PlanEntry};
pub use terminal::{format_field, status_label, summary_line};
