use crate::application::access::{self, Actor};
use crate::application::error::ServiceResult;
use crate::application::ports::venue_repository::VenueRepository;
use crate::application::services::validation;
use crate::domain::users::user::Role;
use crate::domain::venues::venue::{NewVenue, Sport, Venue, VenueStatus};

use super::{clean_list, validate_sports};

pub struct CreateVenue<'a, R: VenueRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct CreateVenueRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub sports: Vec<Sport>,
    pub amenities: Vec<String>,
    pub photos: Vec<String>,
}

impl<'a, R: VenueRepository + ?Sized> CreateVenue<'a, R> {
    pub async fn execute(&self, actor: &Actor, req: &CreateVenueRequest) -> ServiceResult<Venue> {
        access::require_role(actor, &[Role::Owner, Role::Admin])?;
        let venue = NewVenue {
            name: validation::required(req.name.as_deref(), "name")?,
            description: validation::non_blank(req.description.clone()),
            address: validation::required(req.address.as_deref(), "address")?,
            sports: validate_sports(&req.sports)?,
            amenities: clean_list(&req.amenities),
            photos: clean_list(&req.photos),
        };
        let status = if actor.is_admin() {
            VenueStatus::Approved
        } else {
            VenueStatus::Pending
        };
        let created = self.repo.create(actor.id, &venue, status).await?;
        tracing::info!(venue_id = %created.id, owner_id = %actor.id, status = %created.status, "venue_created");
        Ok(created)
    }
}
