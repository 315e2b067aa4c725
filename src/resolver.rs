use anyhow::Context;

use crate::catalog::CatalogOps;
use crate::manifest::{ReconciliationRecord, ResolutionStrategy};

/// Resolve one manifest record to a catalog image id.
///
/// Under [`ResolutionStrategy::ByIdentifier`] the pk is authoritative: a
/// missing catalog entry is a hard error. Under
/// [`ResolutionStrategy::ByCurrentPath`] anything but exactly one match is
/// "nothing to do" — catalog locations are not guaranteed unique.
pub async fn resolve<C: CatalogOps>(
    catalog: &mut C,
    strategy: ResolutionStrategy,
    record: &ReconciliationRecord,
) -> anyhow::Result<Option<String>> {
    match strategy {
        ResolutionStrategy::ByIdentifier => {
            let pk = record
                .pk
                .context("manifest row has no pk under identifier resolution")?;
            println!("Processing image [pk {pk}]:");

            let image = catalog
                .image_by_pk(pk)
                .await?
                .with_context(|| format!("no catalog image found for pk {pk}"))?;
            Ok(Some(image.id))
        }
        ResolutionStrategy::ByCurrentPath => {
            println!("Processing image [{}]:", record.old_path);

            let mut matches = catalog.images_by_location(&record.old_path).await?;
            if matches.len() == 1 {
                Ok(Some(matches.remove(0).id))
            } else {
                tracing::debug!(
                    matches = matches.len(),
                    location = %record.old_path,
                    "location lookup did not resolve to exactly one image"
                );
                Ok(None)
            }
        }
    }
}
