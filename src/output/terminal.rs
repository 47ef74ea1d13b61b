//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use crate::processing::NamedPlan;
use colored::{ColoredString, Colorize};

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Colour a row status for the summary banner.
pub fn status_label(status: &str) -> ColoredString {
    match status {
        "public" => status.green(),
        "private" => status.blue(),
        _ => status.yellow(),
    }
}

/// One line per plan: name, parent, child size and pool counts.
pub fn summary_line(named: &NamedPlan) -> String {
    let plan = &named.plan;
    format!(
        "{tag} '{name}' {parent} -> /{mask}: {public} {n_public}, {private} {n_private}, {spare} {n_spare} ({provider})",
        tag = "PLAN".on_blue(),
        name = named.name,
        parent = plan.parent,
        mask = plan.child_mask,
        public = status_label("public"),
        n_public = plan.public().len(),
        private = status_label("private"),
        n_private = plan.private().len(),
        spare = status_label("spare"),
        n_spare = plan.spare.len(),
        provider = named.provider,
    )
}
