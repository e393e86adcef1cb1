use std::path::Path;

use anyhow::Context as _;

use crate::formats::Report;

/// Loads candidate reports from a directory of JSON report files.
///
/// This is the mailbox adapter: it restricts the reports to a sender pattern
/// and a subject pattern (case-insensitive substring matches) and returns the
/// candidates ordered by receipt time descending, the order the planner
/// expects. Other file extensions in the directory are ignored; a `.json`
/// file that does not deserialize is an error (an unreadable source aborts
/// the run).
pub fn load_reports(
    dir: &Path,
    sender_filter: &str,
    subject_filter: &str,
) -> anyhow::Result<Vec<Report>> {
    let sender_filter = sender_filter.to_lowercase();
    let subject_filter = subject_filter.to_lowercase();

    let mut reports = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("read reports dir: {}", dir.display()))?
    {
        let entry = entry.context("read reports dir entry")?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("read report file: {}", path.display()))?;
        let report: Report = serde_json::from_str(&contents)
            .with_context(|| format!("parse report file: {}", path.display()))?;

        if !report.sender.to_lowercase().contains(&sender_filter) {
            tracing::debug!(path = %path.display(), sender = %report.sender, "sender filter miss");
            continue;
        }
        if !report.subject.to_lowercase().contains(&subject_filter) {
            tracing::debug!(path = %path.display(), subject = %report.subject, "subject filter miss");
            continue;
        }

        reports.push(report);
    }

    reports.sort_by(|a, b| b.received_at.cmp(&a.received_at));
    Ok(reports)
}
