use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One inbound report, as serialized by the mailbox export (one JSON document
/// per report file).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub sender: String,
    pub subject: String,
    pub body_html: String,
    pub received_at: NaiveDateTime,
}

/// One extracted observation: one instrument, one report date.
///
/// A missing or unparsable numeric field is `None`, never an error; the row is
/// still emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub report_date: NaiveDateTime,
    pub series_id: String,
    pub series_desc: String,
    pub buy_level: Option<f64>,
    pub sell_level: Option<f64>,
    pub prev_close: Option<f64>,
}
