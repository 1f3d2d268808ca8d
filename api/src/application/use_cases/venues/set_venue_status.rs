use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::venue_repository::VenueRepository;
use crate::domain::venues::venue::{Venue, VenueStatus};

pub struct SetVenueStatus<'a, R: VenueRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: VenueRepository + ?Sized> SetVenueStatus<'a, R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        id: Uuid,
        status: VenueStatus,
    ) -> ServiceResult<Venue> {
        access::require_admin(actor)?;
        let venue = self
            .repo
            .set_status(id, status)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue not found"))?;
        tracing::info!(venue_id = %id, status = %status, "venue_status_changed");
        Ok(venue)
    }
}
