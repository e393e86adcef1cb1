use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};

use crate::formats::Row;

/// Parses a report's HTML body into structured rows.
///
/// Every `tr` in the markup is considered, regardless of which table owns it;
/// only rows with exactly four `td` cells are eligible (reports carry
/// decorative and layout tables too, which are silently ignored). An empty
/// result is a valid outcome meaning the report had no recognizable data
/// table.
pub fn parse_report_body(html: &str, report_date: NaiveDateTime) -> Vec<Row> {
    let document = Html::parse_document(html);
    let tr = Selector::parse("tr").unwrap();
    let td = Selector::parse("td").unwrap();

    let mut rows = Vec::new();
    for table_row in document.select(&tr) {
        let cells = table_row.select(&td).collect::<Vec<_>>();
        if cells.len() != 4 {
            continue;
        }

        let (series_id, series_desc) = split_series_cell(cells[0]);
        rows.push(Row {
            report_date,
            series_id,
            series_desc,
            buy_level: parse_level(cells[1]),
            sell_level: parse_level(cells[2]),
            prev_close: parse_level(cells[3]),
        });
    }

    rows
}

/// The first cell renders as two lines: an identifier and a descriptive label
/// separated by a line break. With a single line the identifier is that text
/// and the description is empty.
fn split_series_cell(cell: ElementRef<'_>) -> (String, String) {
    let mut lines = cell
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty());

    let series_id = lines.next().unwrap_or_default().to_owned();
    let series_desc = lines.next().unwrap_or_default().to_owned();
    (series_id, series_desc)
}

/// Numeric cell coercion: strip thousands separators, then parse. Failure
/// yields "no value", never an error.
fn parse_level(cell: ElementRef<'_>) -> Option<f64> {
    let text = cell.text().collect::<String>();
    text.trim().replace(',', "").parse::<f64>().ok()
}
