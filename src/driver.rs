use std::fmt;

use crate::catalog::CatalogOps;
use crate::manifest::{ReconciliationRecord, ResolutionStrategy};
use crate::{resolver, updater};

/// Per-run outcome counts, printed as the closing console line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records whose path change the catalog confirmed.
    pub updated: usize,
    /// Records that resolved to no single catalog image.
    pub skipped: usize,
    /// Records the catalog refused to update.
    pub rejected: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.updated + self.skipped + self.rejected
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} record(s): {} updated, {} skipped, {} not updated",
            self.total(),
            self.updated,
            self.skipped,
            self.rejected
        )
    }
}

/// Walk the records in manifest order, resolving and applying each one.
///
/// Misses and rejections are reported and skipped; the batch proceeds.
/// There is no rollback — every confirmed update is an independent,
/// already-committed remote side effect. Errors abort the loop and
/// propagate; the caller still releases the session.
pub async fn run<C: CatalogOps>(
    catalog: &mut C,
    strategy: ResolutionStrategy,
    records: &[ReconciliationRecord],
) -> anyhow::Result<RunSummary> {
    let mut summary = RunSummary::default();

    for record in records {
        let Some(image_id) = resolver::resolve(catalog, strategy, record).await? else {
            println!("* No image identifier found, skipping");
            summary.skipped += 1;
            continue;
        };
        println!("* Got imageId {image_id}");

        match updater::apply(catalog, &image_id, &record.new_path).await? {
            Some(confirmed) => {
                println!(
                    "* Changed from \"{}\" to \"{confirmed}\"",
                    record.old_path
                );
                summary.updated += 1;
            }
            None => {
                println!("* Update produced no confirmed change, skipping");
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}
