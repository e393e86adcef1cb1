use std::path::Path;

use predicates::prelude::*;

const STORE_HEADER: &str = "report_date,series_id,series_desc,buy_level,sell_level,prev_close";

fn seed_store(path: &Path) {
    std::fs::write(
        path,
        format!("{STORE_HEADER}\n2025-01-01 8:00:00,SPX,S&P 500 Index,5800,5950,5875\n"),
    )
    .expect("seed store");
}

fn write_report(dir: &Path, name: &str, subject: &str, received_at: &str, body_html: &str) {
    let json = serde_json::json!({
        "sender": "Hedgeye Risk Management <info@hedgeye.com>",
        "subject": subject,
        "body_html": body_html,
        "received_at": received_at,
    });
    std::fs::write(dir.join(name), json.to_string()).expect("write report file");
}

fn signal_body() -> &'static str {
    r#"<html><body>
      <table class="layout"><tr><td>logo</td><td>nav</td></tr></table>
      <table>
        <tr><td>SPX<br>S&amp;P 500 Index</td><td>5,850</td><td>5,975.25</td><td>5,900</td></tr>
      </table>
    </body></html>"#
}

fn sync_cmd(reports: &Path, store: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("riskrange-sync");
    cmd.args([
        "sync",
        "--reports",
        reports.to_str().expect("reports path utf-8"),
        "--store",
        store.to_str().expect("store path utf-8"),
    ]);
    cmd
}

#[test]
fn appends_only_reports_newer_than_the_watermark() {
    let workspace = tempfile::tempdir().expect("tempdir");
    let reports_dir = workspace.path().join("reports");
    std::fs::create_dir(&reports_dir).expect("create reports dir");
    let store_path = workspace.path().join("raw.csv");
    seed_store(&store_path);

    write_report(
        &reports_dir,
        "jan1.json",
        "RISK RANGE™ SIGNALS: January 1, 2025",
        "2025-01-01T06:05:00",
        signal_body(),
    );
    write_report(
        &reports_dir,
        "jan3.json",
        "RISK RANGE™ SIGNALS: January 3, 2025",
        "2025-01-03T06:05:00",
        signal_body(),
    );

    sync_cmd(&reports_dir, &store_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("appended new rows to store"));

    let contents = std::fs::read_to_string(&store_path).expect("read store");
    let lines = contents.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3, "store: {contents}");
    assert_eq!(lines[0], STORE_HEADER);
    assert_eq!(lines[1], "2025-01-01 8:00:00,SPX,S&P 500 Index,5800,5950,5875");
    assert_eq!(
        lines[2],
        "2025-01-03 8:00:00,SPX,S&P 500 Index,5850,5975.25,5900"
    );
}

#[test]
fn second_run_over_unchanged_input_appends_nothing() {
    let workspace = tempfile::tempdir().expect("tempdir");
    let reports_dir = workspace.path().join("reports");
    std::fs::create_dir(&reports_dir).expect("create reports dir");
    let store_path = workspace.path().join("raw.csv");
    seed_store(&store_path);

    write_report(
        &reports_dir,
        "jan3.json",
        "RISK RANGE™ SIGNALS: January 3, 2025",
        "2025-01-03T06:05:00",
        signal_body(),
    );

    sync_cmd(&reports_dir, &store_path).assert().success();
    let after_first = std::fs::read_to_string(&store_path).expect("read store");

    sync_cmd(&reports_dir, &store_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("store is up to date"));
    let after_second = std::fs::read_to_string(&store_path).expect("read store");

    assert_eq!(after_first, after_second);
}

#[test]
fn run_with_no_newer_reports_leaves_the_store_untouched() {
    let workspace = tempfile::tempdir().expect("tempdir");
    let reports_dir = workspace.path().join("reports");
    std::fs::create_dir(&reports_dir).expect("create reports dir");
    let store_path = workspace.path().join("raw.csv");
    seed_store(&store_path);
    let seeded = std::fs::read_to_string(&store_path).expect("read store");

    write_report(
        &reports_dir,
        "jan1.json",
        "RISK RANGE™ SIGNALS: January 1, 2025",
        "2025-01-01T18:30:00",
        signal_body(),
    );

    sync_cmd(&reports_dir, &store_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("store is up to date"));

    assert_eq!(std::fs::read_to_string(&store_path).expect("read store"), seeded);
}

#[test]
fn empty_reports_dir_is_nothing_to_do() {
    let workspace = tempfile::tempdir().expect("tempdir");
    let reports_dir = workspace.path().join("reports");
    std::fs::create_dir(&reports_dir).expect("create reports dir");
    let store_path = workspace.path().join("raw.csv");
    seed_store(&store_path);

    sync_cmd(&reports_dir, &store_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("no matching reports found"));
}

#[test]
fn missing_store_watermark_is_fatal() {
    let workspace = tempfile::tempdir().expect("tempdir");
    let reports_dir = workspace.path().join("reports");
    std::fs::create_dir(&reports_dir).expect("create reports dir");
    let store_path = workspace.path().join("raw.csv");

    write_report(
        &reports_dir,
        "jan3.json",
        "RISK RANGE™ SIGNALS: January 3, 2025",
        "2025-01-03T06:05:00",
        signal_body(),
    );

    sync_cmd(&reports_dir, &store_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no watermark"));

    assert!(!store_path.exists(), "fatal run must not create the store");
}

#[test]
fn reports_without_table_data_count_as_no_progress() {
    let workspace = tempfile::tempdir().expect("tempdir");
    let reports_dir = workspace.path().join("reports");
    std::fs::create_dir(&reports_dir).expect("create reports dir");
    let store_path = workspace.path().join("raw.csv");
    seed_store(&store_path);
    let seeded = std::fs::read_to_string(&store_path).expect("read store");

    write_report(
        &reports_dir,
        "jan3.json",
        "RISK RANGE™ SIGNALS: January 3, 2025",
        "2025-01-03T06:05:00",
        "<html><body><p>Holiday — no signals published.</p></body></html>",
    );

    sync_cmd(&reports_dir, &store_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("no table data"))
        .stderr(predicate::str::contains("store is up to date"));

    assert_eq!(std::fs::read_to_string(&store_path).expect("read store"), seeded);
}
