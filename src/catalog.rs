use catalog_api::{CatalogApiError, CatalogSession, ImageRef, MutationOutcome};

/// The catalog operations the reconciliation core consumes.
///
/// [`CatalogSession`] is the production implementation; tests script one
/// without a network. `&mut self` keeps the one-request-in-flight contract
/// of the underlying channel visible at the seam.
#[allow(async_fn_in_trait)]
pub trait CatalogOps {
    async fn image_by_pk(&mut self, pk: i64) -> Result<Option<ImageRef>, CatalogApiError>;

    async fn images_by_location(
        &mut self,
        location: &str,
    ) -> Result<Vec<ImageRef>, CatalogApiError>;

    async fn change_image_location(
        &mut self,
        image_id: &str,
        new_location: &str,
    ) -> Result<MutationOutcome, CatalogApiError>;
}

impl CatalogOps for CatalogSession {
    async fn image_by_pk(&mut self, pk: i64) -> Result<Option<ImageRef>, CatalogApiError> {
        CatalogSession::image_by_pk(self, pk).await
    }

    async fn images_by_location(
        &mut self,
        location: &str,
    ) -> Result<Vec<ImageRef>, CatalogApiError> {
        CatalogSession::images_by_location(self, location).await
    }

    async fn change_image_location(
        &mut self,
        image_id: &str,
        new_location: &str,
    ) -> Result<MutationOutcome, CatalogApiError> {
        CatalogSession::change_image_location(self, image_id, new_location).await
    }
}
