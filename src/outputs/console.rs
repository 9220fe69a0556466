//! Terminal summary of an extracted job record.

use crate::models::JobRecord;
use crate::utils::preview;
use std::fmt::Write;

const RULE_WIDTH: usize = 70;
const DESCRIPTION_PREVIEW_CHARS: usize = 400;

/// Render the present fields of `record` as a readable block of text.
///
/// Absent fields are left out. The description is cut to a short preview;
/// the full text is in the JSON output.
pub fn render_summary(record: &JobRecord) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{rule}\nSCRAPED JOB DETAILS\n{rule}\n");

    let fields = [
        ("Job Title", &record.job_title),
        ("Company", &record.company),
        ("Location", &record.location),
        ("Job ID", &record.job_id),
        ("Posted Date", &record.posted_date),
        ("Employment Type", &record.employment_type),
        ("Salary", &record.salary),
    ];
    for (label, value) in fields {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            let _ = writeln!(out, "{label}: {value}");
        }
    }

    if !record.additional_info.is_empty() {
        let _ = writeln!(out, "\nAdditional Information:");
        for (label, value) in record.additional_info.iter() {
            let _ = writeln!(out, "  - {label}: {value}");
        }
    }

    if let Some(description) = record.description.as_deref().filter(|d| !d.is_empty()) {
        let (head, truncated) = preview(description, DESCRIPTION_PREVIEW_CHARS);
        let _ = writeln!(
            out,
            "\nJob Description ({} characters):\n  {head}...",
            description.chars().count()
        );
        if truncated {
            let _ = writeln!(out, "  [Truncated - full description in JSON file]");
        }
    }

    let _ = writeln!(out, "\n{rule}");
    out
}
