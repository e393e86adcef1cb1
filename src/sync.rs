use std::path::PathBuf;

use anyhow::Context as _;

use crate::cli::{StatusArgs, SyncArgs};
use crate::{planner, source, store};

/// One full synchronization run: read the watermark, scan the candidate
/// reports, and append the sorted batch of new rows to the store.
///
/// All resources are acquired here and live for this run only. The watermark
/// is read exactly once; the append implicitly advances it for the next run.
pub fn run(args: SyncArgs) -> anyhow::Result<()> {
    let reports_dir = PathBuf::from(&args.reports);
    let store_path = PathBuf::from(&args.store);

    let watermark = store::read_watermark(&store_path)
        .context("read store watermark")?
        .ok_or_else(|| {
            anyhow::anyhow!(
                "store has no watermark (missing or empty): {} — seed it with at least one dated row",
                store_path.display()
            )
        })?;
    tracing::info!(watermark = %watermark.date(), "loaded store watermark");

    let reports = source::load_reports(&reports_dir, &args.sender, &args.subject_contains)
        .context("load candidate reports")?;
    if reports.is_empty() {
        tracing::info!(dir = %reports_dir.display(), "no matching reports found");
        return Ok(());
    }
    tracing::info!(candidates = reports.len(), "scanning candidate reports");

    let mut plan = planner::plan(&reports, watermark.date());
    if plan.is_noop() {
        tracing::info!("store is up to date; nothing to append");
        return Ok(());
    }

    planner::sort_rows(&mut plan.rows);
    store::append_rows(&store_path, &plan.rows).context("append rows to store")?;

    tracing::info!(
        rows = plan.rows.len(),
        dates = ?plan.touched_dates,
        "appended new rows to store"
    );
    Ok(())
}

/// Read-only operator convenience: print the store's current watermark.
pub fn status(args: StatusArgs) -> anyhow::Result<()> {
    let store_path = PathBuf::from(&args.store);
    match store::read_watermark(&store_path).context("read store watermark")? {
        Some(watermark) => println!("watermark: {}", watermark.date()),
        None => println!("store is empty"),
    }
    Ok(())
}
