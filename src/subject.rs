use chrono::NaiveDate;

/// Marker phrase that precedes the date expression in a report subject.
pub const SUBJECT_MARKER: &str = "risk range™ signals:";

/// Extracts the report date from a subject line.
///
/// The subject must contain [`SUBJECT_MARKER`] (matched case-insensitively,
/// first occurrence) followed by a month-name/day/year expression such as
/// `January 5, 2025`. Returns `None` when the marker is absent or the date
/// does not parse as a real calendar date; the caller skips that report.
pub fn report_date(subject: &str) -> Option<NaiveDate> {
    let lowered = subject.to_lowercase();
    let start = lowered.find(SUBJECT_MARKER)? + SUBJECT_MARKER.len();
    parse_month_day_year(&lowered[start..])
}

/// Parses a leading `Month D, YYYY` expression, tolerating missing spaces
/// around the day (`June 5,2025`, `June5, 2025`).
fn parse_month_day_year(text: &str) -> Option<NaiveDate> {
    let rest = text.trim_start();

    let month_len = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    if month_len == 0 {
        return None;
    }
    let (month, rest) = rest.split_at(month_len);

    let rest = rest.trim_start();
    let day_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if day_len == 0 {
        return None;
    }
    let (day, rest) = rest.split_at(day_len);

    let rest = rest.trim_start().strip_prefix(',')?;
    let rest = rest.trim_start();
    let year_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if year_len != 4 {
        return None;
    }
    let year = &rest[..year_len];

    NaiveDate::parse_from_str(&format!("{month} {day}, {year}"), "%B %d, %Y").ok()
}
