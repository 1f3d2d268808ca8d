use crate::application::access::{self, Actor};
use crate::application::error::ServiceResult;
use crate::application::ports::venue_repository::VenueRepository;
use crate::domain::users::user::Role;
use crate::domain::venues::venue::{Venue, VenueFilter, VenueStatus};

pub struct ListVenues<'a, R: VenueRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct ListVenuesQuery {
    pub status: Option<VenueStatus>,
    pub sport: Option<String>,
    pub q: Option<String>,
}

impl<'a, R: VenueRepository + ?Sized> ListVenues<'a, R> {
    pub async fn execute(
        &self,
        actor: Option<&Actor>,
        query: ListVenuesQuery,
    ) -> ServiceResult<Vec<Venue>> {
        // Only admins look past the approved catalogue
        let status = match actor {
            Some(a) if a.is_admin() => query.status,
            _ => Some(VenueStatus::Approved),
        };
        let filter = VenueFilter {
            status,
            owner_id: None,
            sport: query.sport,
            query: query.q,
        };
        Ok(self.repo.list(&filter).await?)
    }
}

pub struct ListMyVenues<'a, R: VenueRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: VenueRepository + ?Sized> ListMyVenues<'a, R> {
    pub async fn execute(&self, actor: &Actor) -> ServiceResult<Vec<Venue>> {
        access::require_role(actor, &[Role::Owner, Role::Admin])?;
        let filter = VenueFilter {
            owner_id: Some(actor.id),
            ..Default::default()
        };
        Ok(self.repo.list(&filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::venues::venue::{NewVenue, Sport};
    use crate::infrastructure::memory::MemoryStore;
    use uuid::Uuid;

    fn actor(role: Role) -> Actor {
        Actor {
            id: Uuid::new_v4(),
            role,
        }
    }

    async fn add(store: &MemoryStore, owner: Uuid, name: &str, status: VenueStatus) {
        store
            .create(
                owner,
                &NewVenue {
                    name: name.into(),
                    description: None,
                    address: "Hyderabad".into(),
                    sports: vec![Sport {
                        name: "Football".into(),
                        price_per_hour: 900.0,
                    }],
                    amenities: vec![],
                    photos: vec![],
                },
                status,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn status_filter_is_admin_only() {
        let store = MemoryStore::new();
        let owner = actor(Role::Owner);
        add(&store, owner.id, "Turf One", VenueStatus::Approved).await;
        add(&store, owner.id, "Turf Two", VenueStatus::Pending).await;
        let uc = ListVenues { repo: &store };
        let pending = ListVenuesQuery {
            status: Some(VenueStatus::Pending),
            ..Default::default()
        };

        let anon = uc.execute(None, pending.clone()).await.unwrap();
        assert_eq!(anon.len(), 1);
        assert_eq!(anon[0].name, "Turf One");

        let admin = actor(Role::Admin);
        let seen = uc.execute(Some(&admin), pending).await.unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].name, "Turf Two");
        let all = uc
            .execute(Some(&admin), ListVenuesQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn mine_lists_own_venues_for_owners_only() {
        let store = MemoryStore::new();
        let owner = actor(Role::Owner);
        add(&store, owner.id, "Turf One", VenueStatus::Pending).await;
        add(&store, Uuid::new_v4(), "Elsewhere", VenueStatus::Approved).await;
        let uc = ListMyVenues { repo: &store };
        let mine = uc.execute(&owner).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Turf One");
        assert!(uc.execute(&actor(Role::Player)).await.is_err());
    }
}
