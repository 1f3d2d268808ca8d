use uuid::Uuid;

use crate::application::access::{self, Actor, Capability};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::venue_repository::VenueRepository;
use crate::application::services::validation;
use crate::domain::venues::venue::{Sport, Venue, VenuePatch};

use super::{clean_list, validate_sports};

pub struct UpdateVenue<'a, R: VenueRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub sports: Option<Vec<Sport>>,
    pub amenities: Option<Vec<String>>,
    pub photos: Option<Vec<String>>,
}

impl<'a, R: VenueRepository + ?Sized> UpdateVenue<'a, R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        id: Uuid,
        req: &UpdateVenueRequest,
    ) -> ServiceResult<Venue> {
        let venue = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue not found"))?;
        if access::resolve_venue(Some(actor), &venue) < Capability::Edit {
            return Err(ServiceError::forbidden("Not allowed to modify this venue"));
        }

        let patch = VenuePatch {
            name: match &req.name {
                Some(n) => Some(validation::required(Some(n.as_str()), "name")?),
                None => None,
            },
            description: req.description.as_ref().map(|d| d.trim().to_string()),
            address: match &req.address {
                Some(a) => Some(validation::required(Some(a.as_str()), "address")?),
                None => None,
            },
            sports: match &req.sports {
                Some(s) => Some(validate_sports(s)?),
                None => None,
            },
            amenities: req.amenities.as_deref().map(clean_list),
            photos: req.photos.as_deref().map(clean_list),
        };
        self.repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::user::Role;
    use crate::domain::venues::venue::{NewVenue, VenueStatus};
    use crate::infrastructure::memory::MemoryStore;

    async fn seeded(owner: Uuid) -> (MemoryStore, Venue) {
        let store = MemoryStore::new();
        let venue = store
            .create(
                owner,
                &NewVenue {
                    name: "Smash Arena".into(),
                    description: Some("Indoor".into()),
                    address: "Pune".into(),
                    sports: vec![],
                    amenities: vec![],
                    photos: vec![],
                },
                VenueStatus::Pending,
            )
            .await
            .unwrap();
        (store, venue)
    }

    #[tokio::test]
    async fn owner_patches_only_given_fields() {
        let owner = Actor {
            id: Uuid::new_v4(),
            role: Role::Owner,
        };
        let (store, venue) = seeded(owner.id).await;
        let updated = UpdateVenue { repo: &store }
            .execute(
                &owner,
                venue.id,
                &UpdateVenueRequest {
                    address: Some(" Pune, Baner ".into()),
                    amenities: Some(vec!["Lockers".into(), "".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Smash Arena");
        assert_eq!(updated.address, "Pune, Baner");
        assert_eq!(updated.amenities, vec!["Lockers".to_string()]);
        assert_eq!(updated.status, VenueStatus::Pending);
    }

    #[tokio::test]
    async fn strangers_are_forbidden_and_blank_names_rejected() {
        let owner = Actor {
            id: Uuid::new_v4(),
            role: Role::Owner,
        };
        let (store, venue) = seeded(owner.id).await;
        let uc = UpdateVenue { repo: &store };
        let stranger = Actor {
            id: Uuid::new_v4(),
            role: Role::Owner,
        };
        let req = UpdateVenueRequest {
            name: Some("Taken over".into()),
            ..Default::default()
        };
        assert!(matches!(
            uc.execute(&stranger, venue.id, &req).await,
            Err(ServiceError::Forbidden(_))
        ));

        let admin = Actor {
            id: Uuid::new_v4(),
            role: Role::Admin,
        };
        let blank = UpdateVenueRequest {
            name: Some("   ".into()),
            ..Default::default()
        };
        assert!(matches!(
            uc.execute(&admin, venue.id, &blank).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            uc.execute(&admin, Uuid::new_v4(), &req).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
