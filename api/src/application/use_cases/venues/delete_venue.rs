use uuid::Uuid;

use crate::application::access::{self, Actor, Capability};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::venue_repository::VenueRepository;

pub struct DeleteVenue<'a, R: VenueRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: VenueRepository + ?Sized> DeleteVenue<'a, R> {
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> ServiceResult<()> {
        let venue = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue not found"))?;
        if access::resolve_venue(Some(actor), &venue) < Capability::Edit {
            return Err(ServiceError::forbidden("Not allowed to delete this venue"));
        }
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("Venue not found"));
        }
        tracing::info!(venue_id = %id, actor_id = %actor.id, "venue_deleted");
        Ok(())
    }
}
