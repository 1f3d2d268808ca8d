use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::venues::venue::{NewVenue, Venue, VenueFilter, VenuePatch, VenueStatus};

#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn list(&self, filter: &VenueFilter) -> anyhow::Result<Vec<Venue>>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Venue>>;

    async fn create(
        &self,
        owner_id: Uuid,
        venue: &NewVenue,
        status: VenueStatus,
    ) -> anyhow::Result<Venue>;

    async fn update(&self, id: Uuid, patch: &VenuePatch) -> anyhow::Result<Option<Venue>>;

    async fn set_status(&self, id: Uuid, status: VenueStatus) -> anyhow::Result<Option<Venue>>;

    // Bookings of the venue go with it
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
