use crate::catalog::CatalogOps;

/// Apply a new path to a resolved catalog image.
///
/// Returns the path the catalog confirmed, or `None` when the catalog
/// reported the change as failed or mutated nothing — the caller logs that
/// and moves on. Transport and protocol faults propagate.
pub async fn apply<C: CatalogOps>(
    catalog: &mut C,
    image_id: &str,
    new_path: &str,
) -> anyhow::Result<Option<String>> {
    let outcome = catalog.change_image_location(image_id, new_path).await?;

    if let Some(failures) = &outcome.failed {
        for failure in failures {
            tracing::debug!(
                error = failure.error.as_deref().unwrap_or("unspecified"),
                "catalog rejected the location change"
            );
        }
        return Ok(None);
    }

    Ok(outcome.confirmed_location().map(str::to_owned))
}
