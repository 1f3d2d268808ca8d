use uuid::Uuid;

use crate::application::access::{self, Actor, Capability};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::venue_repository::VenueRepository;
use crate::domain::venues::venue::Venue;

pub struct GetVenue<'a, R: VenueRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: VenueRepository + ?Sized> GetVenue<'a, R> {
    pub async fn execute(&self, actor: Option<&Actor>, id: Uuid) -> ServiceResult<Venue> {
        let venue = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue not found"))?;
        // Pending venues stay invisible to everyone but owner and admins
        if access::resolve_venue(actor, &venue) < Capability::View {
            return Err(ServiceError::not_found("Venue not found"));
        }
        Ok(venue)
    }
}
