use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Context as _;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::formats::Row;

/// Canonical column header, created when the store file does not exist yet.
pub const STORE_HEADER: [&str; 6] = [
    "report_date",
    "series_id",
    "series_desc",
    "buy_level",
    "sell_level",
    "prev_close",
];

/// Fixed offset added to every row timestamp on write. Existing stored data
/// was produced with this normalization, so it must be preserved bit-for-bit.
pub const STORE_TIME_OFFSET_HOURS: i64 = 8;

/// Timestamp display format of the temporal column (`yyyy-mm-dd h:mm:ss`,
/// hour not zero-padded).
pub const STORE_TIME_FORMAT: &str = "%Y-%m-%d %-H:%M:%S";

/// Reads the store's watermark: the maximum value of the temporal column.
///
/// A missing file or a header-only file yields `Ok(None)`; whether that is
/// fatal is the caller's policy. A file whose temporal column cannot be
/// parsed is an error (corrupt store).
pub fn read_watermark(path: &Path) -> anyhow::Result<Option<NaiveDateTime>> {
    if !path.exists() {
        return Ok(None);
    }

    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("open store: {}", path.display()))?;

    let mut latest: Option<NaiveDateTime> = None;
    for record in reader.records() {
        let record = record.with_context(|| format!("read store record: {}", path.display()))?;
        let field = record
            .get(0)
            .ok_or_else(|| anyhow::anyhow!("store record has no temporal column"))?;
        let stamp = parse_store_timestamp(field)
            .with_context(|| format!("parse store timestamp: {field:?}"))?;
        latest = Some(latest.map_or(stamp, |current| current.max(stamp)));
    }

    Ok(latest)
}

/// Appends the ordered batch to the store, creating it with the canonical
/// header when absent. Physical order is the given order.
pub fn append_rows(path: &Path, rows: &[Row]) -> anyhow::Result<()> {
    let needs_header = !path.exists();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open store for append: {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    if needs_header {
        writer
            .write_record(STORE_HEADER)
            .context("write store header")?;
    }

    for row in rows {
        writer
            .write_record([
                store_timestamp(row.report_date),
                row.series_id.clone(),
                row.series_desc.clone(),
                level_field(row.buy_level),
                level_field(row.sell_level),
                level_field(row.prev_close),
            ])
            .with_context(|| format!("append store row: {}", row.series_id))?;
    }

    writer.flush().context("flush store")?;
    Ok(())
}

/// Temporal column value for one row: the fixed offset applied, then the
/// store's display format.
pub fn store_timestamp(report_date: NaiveDateTime) -> String {
    (report_date + Duration::hours(STORE_TIME_OFFSET_HOURS))
        .format(STORE_TIME_FORMAT)
        .to_string()
}

fn parse_store_timestamp(value: &str) -> anyhow::Result<NaiveDateTime> {
    let value = value.trim();
    if let Ok(stamp) = NaiveDateTime::parse_from_str(value, STORE_TIME_FORMAT) {
        return Ok(stamp);
    }

    // Data exported from the legacy workbook can carry raw serial dates.
    if let Ok(serial) = value.parse::<f64>() {
        return decode_excel_serial(serial)
            .ok_or_else(|| anyhow::anyhow!("serial date out of range: {value}"));
    }

    // Hand-seeded stores sometimes carry date-only values.
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("unrecognized temporal value: {value:?}"))?;
    Ok(date.and_time(NaiveTime::MIN))
}

/// Decodes a workbook serial date: whole and fractional days since the 1900
/// date system's day zero (1899-12-30, the historical leap-year quirk folded
/// in).
pub fn decode_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    let millis = (serial * 86_400_000.0).round();
    epoch.checked_add_signed(Duration::milliseconds(millis as i64))
}

fn level_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
