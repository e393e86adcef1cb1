use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};

use crate::formats::{Report, Row};
use crate::{subject, table};

/// Per-report scan result. No error crosses a report boundary: every way a
/// report can drop out of the run is a tagged outcome the planner logs.
#[derive(Debug, PartialEq)]
pub enum ReportOutcome {
    Parsed { rows: Vec<Row> },
    NoSubjectDate,
    NotNewer { report_date: NaiveDate },
    NoTableData { report_date: NaiveDate },
}

/// Accumulated output of one scan over the candidate reports.
#[derive(Debug, Default)]
pub struct SyncPlan {
    pub rows: Vec<Row>,
    pub touched_dates: BTreeSet<NaiveDate>,
}

impl SyncPlan {
    /// True when the run has nothing to append: no new dates, or new dates
    /// that produced zero rows.
    pub fn is_noop(&self) -> bool {
        self.touched_dates.is_empty() || self.rows.is_empty()
    }
}

/// Scans the candidate reports (newest first, pre-filtered by the source)
/// against the watermark and accumulates rows for genuinely new report dates.
///
/// Newness is decided at day granularity from the subject date alone; a report
/// that is not strictly newer than the watermark is skipped without the body
/// ever being parsed.
pub fn plan(reports: &[Report], watermark: NaiveDate) -> SyncPlan {
    let mut plan = SyncPlan::default();

    for report in reports {
        match evaluate_report(report, watermark) {
            ReportOutcome::Parsed { rows } => {
                let report_date = rows[0].report_date.date();
                tracing::info!(
                    subject = %report.subject,
                    date = %report_date,
                    rows = rows.len(),
                    "collected rows for new report date"
                );
                plan.rows.extend(rows);
                plan.touched_dates.insert(report_date);
            }
            ReportOutcome::NoSubjectDate => {
                tracing::warn!(subject = %report.subject, "no report date in subject; skipping");
            }
            ReportOutcome::NotNewer { report_date } => {
                tracing::debug!(
                    subject = %report.subject,
                    date = %report_date,
                    watermark = %watermark,
                    "report date not newer than watermark; skipping"
                );
            }
            ReportOutcome::NoTableData { report_date } => {
                tracing::warn!(
                    subject = %report.subject,
                    date = %report_date,
                    "no table data found in report body"
                );
            }
        }
    }

    plan
}

/// Evaluates a single candidate. Body parsing only happens once the subject
/// date has proven the report strictly newer than the watermark.
pub fn evaluate_report(report: &Report, watermark: NaiveDate) -> ReportOutcome {
    let Some(report_date) = subject::report_date(&report.subject) else {
        return ReportOutcome::NoSubjectDate;
    };

    if report_date <= watermark {
        return ReportOutcome::NotNewer { report_date };
    }

    // Rows carry the subject date at midnight; receipt time only orders the
    // candidate scan.
    let stamp = report_date.and_time(NaiveTime::MIN);
    let rows = table::parse_report_body(&report.body_html, stamp);
    if rows.is_empty() {
        return ReportOutcome::NoTableData { report_date };
    }

    ReportOutcome::Parsed { rows }
}

/// Deterministic ordering for the append batch: `report_date` ascending, then
/// `series_desc` ascending. Repeated runs over unchanged input produce
/// byte-identical batches, which downstream diffing relies on.
pub fn sort_rows(rows: &mut [Row]) {
    rows.sort_by(|a, b| {
        a.report_date
            .cmp(&b.report_date)
            .then_with(|| a.series_desc.cmp(&b.series_desc))
    });
}
