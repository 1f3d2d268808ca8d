use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::booking_repository::BookingRepository;
use crate::application::ports::stats_repository::StatsRepository;
use crate::application::ports::user_repository::{
    UpdateUserOutcome, UserCredentials, UserRepository,
};
use crate::application::ports::venue_repository::VenueRepository;
use crate::domain::admin::stats::{AdminStats, BookingCounts, DailyCount, UserCounts, VenueCounts};
use crate::domain::bookings::booking::{Booking, BookingStatus, NewBooking};
use crate::domain::users::user::{NewUser, User, UserPatch};
use crate::domain::venues::venue::{NewVenue, Venue, VenueFilter, VenuePatch, VenueStatus};

struct StoredUser {
    user: User,
    password_hash: String,
    reset_token_hash: Option<String>,
    reset_token_expires_at: Option<DateTime<Utc>>,
}

impl StoredUser {
    fn credentials(&self) -> UserCredentials {
        UserCredentials {
            user: self.user.clone(),
            password_hash: self.password_hash.clone(),
        }
    }
}

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, StoredUser>,
    venues: HashMap<Uuid, Venue>,
    bookings: HashMap<Uuid, Booking>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.user.email == email && Some(u.user.id) != except)
    }

    // Mirrors the ON DELETE CASCADE foreign keys of the SQL schema
    fn remove_venue(&mut self, id: Uuid) -> bool {
        let removed = self.venues.remove(&id).is_some();
        if removed {
            self.bookings.retain(|_, b| b.venue_id != id);
        }
        removed
    }
}

/// Process-local backend for development and tests. Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_newest_first<T, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, new_user: &NewUser) -> anyhow::Result<Option<User>> {
        let mut t = self.tables.write().await;
        if t.email_taken(&new_user.email, None) {
            return Ok(None);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            phone: new_user.phone.clone(),
            role: new_user.role,
            is_banned: false,
            profile_photo: None,
            created_at: now,
            updated_at: now,
        };
        t.users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password_hash: new_user.password_hash.clone(),
                reset_token_hash: None,
                reset_token_expires_at: None,
            },
        );
        Ok(Some(user))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        let t = self.tables.read().await;
        Ok(t.users
            .values()
            .find(|u| u.user.email == email)
            .map(StoredUser::credentials))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.get(&id).map(|u| u.user.clone()))
    }

    async fn find_credentials_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserCredentials>> {
        let t = self.tables.read().await;
        Ok(t.users.get(&id).map(StoredUser::credentials))
    }

    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        let t = self.tables.read().await;
        let mut users: Vec<User> = t.users.values().map(|u| u.user.clone()).collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn update_user(&self, id: Uuid, patch: &UserPatch) -> anyhow::Result<UpdateUserOutcome> {
        let mut t = self.tables.write().await;
        if let Some(email) = &patch.email {
            if t.email_taken(email, Some(id)) {
                return Ok(UpdateUserOutcome::EmailTaken);
            }
        }
        let Some(stored) = t.users.get_mut(&id) else {
            return Ok(UpdateUserOutcome::NotFound);
        };
        let u = &mut stored.user;
        if let Some(v) = &patch.name {
            u.name = v.clone();
        }
        if let Some(v) = &patch.email {
            u.email = v.clone();
        }
        if let Some(v) = &patch.phone {
            u.phone = Some(v.clone()).filter(|p| !p.is_empty());
        }
        if let Some(v) = patch.role {
            u.role = v;
        }
        if let Some(v) = patch.is_banned {
            u.is_banned = v;
        }
        if let Some(v) = &patch.profile_photo {
            u.profile_photo = Some(v.clone()).filter(|p| !p.is_empty());
        }
        if let Some(v) = &patch.password_hash {
            stored.password_hash = v.clone();
        }
        stored.user.updated_at = Utc::now();
        Ok(UpdateUserOutcome::Updated(stored.user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut t = self.tables.write().await;
        if t.users.remove(&id).is_none() {
            return Ok(false);
        }
        let owned: Vec<Uuid> = t
            .venues
            .values()
            .filter(|v| v.owner_id == id)
            .map(|v| v.id)
            .collect();
        for venue_id in owned {
            t.remove_venue(venue_id);
        }
        t.bookings.retain(|_, b| b.user_id != id);
        Ok(true)
    }

    async fn toggle_ban(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let mut t = self.tables.write().await;
        Ok(t.users.get_mut(&id).map(|stored| {
            stored.user.is_banned = !stored.user.is_banned;
            stored.user.updated_at = Utc::now();
            stored.user.clone()
        }))
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut t = self.tables.write().await;
        Ok(match t.users.get_mut(&id) {
            Some(stored) => {
                stored.reset_token_hash = Some(token_hash.to_string());
                stored.reset_token_expires_at = Some(expires_at);
                true
            }
            None => false,
        })
    }

    async fn reset_password(
        &self,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<User>> {
        let mut t = self.tables.write().await;
        let stored = t.users.values_mut().find(|u| {
            u.reset_token_hash.as_deref() == Some(token_hash)
                && u.reset_token_expires_at.is_some_and(|exp| exp > now)
        });
        Ok(stored.map(|u| {
            u.password_hash = password_hash.to_string();
            u.reset_token_hash = None;
            u.reset_token_expires_at = None;
            u.user.updated_at = now;
            u.user.clone()
        }))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl VenueRepository for MemoryStore {
    async fn list(&self, filter: &VenueFilter) -> anyhow::Result<Vec<Venue>> {
        let t = self.tables.read().await;
        let items = t
            .venues
            .values()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect();
        Ok(sorted_newest_first(items, |v: &Venue| v.created_at))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Venue>> {
        let t = self.tables.read().await;
        Ok(t.venues.get(&id).cloned())
    }

    async fn create(
        &self,
        owner_id: Uuid,
        venue: &NewVenue,
        status: VenueStatus,
    ) -> anyhow::Result<Venue> {
        let now = Utc::now();
        let created = Venue {
            id: Uuid::new_v4(),
            owner_id,
            name: venue.name.clone(),
            description: venue.description.clone(),
            address: venue.address.clone(),
            sports: venue.sports.clone(),
            amenities: venue.amenities.clone(),
            photos: venue.photos.clone(),
            average_rating: 0.0,
            status,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .venues
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, patch: &VenuePatch) -> anyhow::Result<Option<Venue>> {
        let mut t = self.tables.write().await;
        Ok(t.venues.get_mut(&id).map(|v| {
            if let Some(x) = &patch.name {
                v.name = x.clone();
            }
            if let Some(x) = &patch.description {
                v.description = Some(x.clone()).filter(|d| !d.is_empty());
            }
            if let Some(x) = &patch.address {
                v.address = x.clone();
            }
            if let Some(x) = &patch.sports {
                v.sports = x.clone();
            }
            if let Some(x) = &patch.amenities {
                v.amenities = x.clone();
            }
            if let Some(x) = &patch.photos {
                v.photos = x.clone();
            }
            v.updated_at = Utc::now();
            v.clone()
        }))
    }

    async fn set_status(&self, id: Uuid, status: VenueStatus) -> anyhow::Result<Option<Venue>> {
        let mut t = self.tables.write().await;
        Ok(t.venues.get_mut(&id).map(|v| {
            v.status = status;
            v.updated_at = Utc::now();
            v.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.tables.write().await.remove_venue(id))
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create_if_slot_free(&self, booking: &NewBooking) -> anyhow::Result<Option<Booking>> {
        // The write lock spans check and insert
        let mut t = self.tables.write().await;
        let clash = t.bookings.values().any(|b| {
            b.venue_id == booking.venue_id
                && b.conflicts_with(&booking.sport, booking.date, &booking.slot)
        });
        if clash {
            return Ok(None);
        }
        let created = Booking {
            id: Uuid::new_v4(),
            user_id: booking.user_id,
            venue_id: booking.venue_id,
            sport: booking.sport.clone(),
            date: booking.date,
            start_time: booking.slot.start,
            end_time: booking.slot.end,
            total_price: booking.total_price,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        };
        t.bookings.insert(created.id, created.clone());
        Ok(Some(created))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Booking>> {
        Ok(self.tables.read().await.bookings.get(&id).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Booking>> {
        let t = self.tables.read().await;
        let items = t
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        Ok(sorted_newest_first(items, |b: &Booking| b.created_at))
    }

    async fn list_for_venue(&self, venue_id: Uuid) -> anyhow::Result<Vec<Booking>> {
        let t = self.tables.read().await;
        let items = t
            .bookings
            .values()
            .filter(|b| b.venue_id == venue_id)
            .cloned()
            .collect();
        Ok(sorted_newest_first(items, |b: &Booking| b.created_at))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Booking>> {
        let t = self.tables.read().await;
        let items = t.bookings.values().cloned().collect();
        Ok(sorted_newest_first(items, |b: &Booking| b.created_at))
    }

    async fn set_status(&self, id: Uuid, status: BookingStatus) -> anyhow::Result<Option<Booking>> {
        let mut t = self.tables.write().await;
        Ok(t.bookings.get_mut(&id).map(|b| {
            b.status = status;
            b.clone()
        }))
    }
}

#[async_trait]
impl StatsRepository for MemoryStore {
    async fn admin_stats(&self, since: DateTime<Utc>) -> anyhow::Result<AdminStats> {
        let t = self.tables.read().await;
        let count = |pred: &dyn Fn(&Venue) -> bool| t.venues.values().filter(|v| pred(v)).count();

        let mut per_day: BTreeMap<chrono::NaiveDate, i64> = BTreeMap::new();
        for b in t.bookings.values().filter(|b| b.created_at >= since) {
            *per_day.entry(b.created_at.date_naive()).or_default() += 1;
        }

        Ok(AdminStats {
            users: UserCounts {
                total: t.users.len() as i64,
                banned: t.users.values().filter(|u| u.user.is_banned).count() as i64,
            },
            venues: VenueCounts {
                total: t.venues.len() as i64,
                approved: count(&|v| v.status == VenueStatus::Approved) as i64,
                pending: count(&|v| v.status == VenueStatus::Pending) as i64,
            },
            bookings: BookingCounts {
                total: t.bookings.len() as i64,
                trend: per_day
                    .into_iter()
                    .map(|(date, count)| DailyCount { date, count })
                    .collect(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::bookings::booking::TimeSlot;
    use crate::domain::users::user::Role;
    use chrono::{NaiveDate, NaiveTime};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "N".into(),
            email: email.into(),
            phone: None,
            role: Role::Owner,
            password_hash: "h".into(),
        }
    }

    fn new_venue() -> NewVenue {
        NewVenue {
            name: "V".into(),
            description: None,
            address: "A".into(),
            sports: vec![],
            amenities: vec![],
            photos: vec![],
        }
    }

    #[tokio::test]
    async fn email_is_unique_across_create_and_update() {
        let store = MemoryStore::new();
        let a = store.create_user(&new_user("a@x.io")).await.unwrap().unwrap();
        assert!(store.create_user(&new_user("a@x.io")).await.unwrap().is_none());
        let b = store.create_user(&new_user("b@x.io")).await.unwrap().unwrap();

        let patch = UserPatch {
            email: Some("a@x.io".into()),
            ..Default::default()
        };
        assert!(matches!(
            store.update_user(b.id, &patch).await.unwrap(),
            UpdateUserOutcome::EmailTaken
        ));
        assert!(matches!(
            store.update_user(a.id, &patch).await.unwrap(),
            UpdateUserOutcome::Updated(_)
        ));
    }

    #[tokio::test]
    async fn deleting_owner_cascades_to_venues_and_bookings() {
        let store = MemoryStore::new();
        let owner = store.create_user(&new_user("o@x.io")).await.unwrap().unwrap();
        let venue = store
            .create(owner.id, &new_venue(), VenueStatus::Approved)
            .await
            .unwrap();
        let slot = TimeSlot::new(
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        )
        .unwrap();
        store
            .create_if_slot_free(&NewBooking {
                user_id: Uuid::new_v4(),
                venue_id: venue.id,
                sport: "Tennis".into(),
                date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                slot,
                total_price: 0.0,
            })
            .await
            .unwrap()
            .unwrap();

        assert!(store.delete_user(owner.id).await.unwrap());
        assert!(VenueRepository::get_by_id(&store, venue.id).await.unwrap().is_none());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_requests_for_one_slot_book_it_once() {
        let store = Arc::new(MemoryStore::new());
        let venue_id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();

        let mut handles = Vec::new();
        for i in 0..16u32 {
            let store = store.clone();
            // Every request overlaps 10:00-11:00 but none is identical
            let slot = TimeSlot::new(at(9, 30 + i), at(10, 30 + i)).unwrap();
            handles.push(tokio::spawn(async move {
                store
                    .create_if_slot_free(&NewBooking {
                        user_id: Uuid::new_v4(),
                        venue_id,
                        sport: if i % 2 == 0 { "Tennis" } else { "TENNIS" }.into(),
                        date,
                        slot,
                        total_price: 0.0,
                    })
                    .await
                    .unwrap()
            }));
        }

        let mut created = 0;
        for h in handles {
            if h.await.unwrap().is_some() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.list_for_venue(venue_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stats_count_everything() {
        let store = MemoryStore::new();
        let owner = store.create_user(&new_user("o@x.io")).await.unwrap().unwrap();
        store.create_user(&new_user("p@x.io")).await.unwrap();
        store.toggle_ban(owner.id).await.unwrap();
        store
            .create(owner.id, &new_venue(), VenueStatus::Approved)
            .await
            .unwrap();
        store
            .create(owner.id, &new_venue(), VenueStatus::Pending)
            .await
            .unwrap();

        let stats = store
            .admin_stats(Utc::now() - chrono::Duration::days(6))
            .await
            .unwrap();
        assert_eq!(stats.users, UserCounts { total: 2, banned: 1 });
        assert_eq!(
            stats.venues,
            VenueCounts {
                total: 2,
                approved: 1,
                pending: 1
            }
        );
        assert_eq!(stats.bookings.total, 0);
        assert!(stats.bookings.trend.is_empty());
    }
}
