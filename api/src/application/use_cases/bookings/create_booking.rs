use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::application::access::Actor;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::booking_repository::BookingRepository;
use crate::application::ports::venue_repository::VenueRepository;
use crate::application::services::validation;
use crate::domain::bookings::booking::{Booking, NewBooking, TimeSlot};

pub struct CreateBooking<'a, B, V>
where
    B: BookingRepository + ?Sized,
    V: VenueRepository + ?Sized,
{
    pub bookings: &'a B,
    pub venues: &'a V,
}

#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    pub venue_id: Uuid,
    pub sport: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl<'a, B, V> CreateBooking<'a, B, V>
where
    B: BookingRepository + ?Sized,
    V: VenueRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Actor, req: &CreateBookingRequest) -> ServiceResult<Booking> {
        let venue = self
            .venues
            .get_by_id(req.venue_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue not found"))?;
        if !venue.is_bookable() {
            return Err(ServiceError::validation("Venue is not available for booking"));
        }

        let slot = TimeSlot::new(req.start_time, req.end_time)
            .ok_or_else(|| ServiceError::validation("start_time must be before end_time"))?;
        if req.date < chrono::Utc::now().date_naive() {
            return Err(ServiceError::validation("Cannot book a date in the past"));
        }

        let requested = validation::non_blank(req.sport.clone());
        let (sport, price_per_hour) = if venue.sports.is_empty() {
            let sport =
                requested.ok_or_else(|| ServiceError::validation("sport is required"))?;
            (sport, 0.0)
        } else {
            let wanted = match requested {
                Some(s) => s,
                // Single-sport venues need no explicit choice
                None if venue.sports.len() == 1 => venue.sports[0].name.clone(),
                None => return Err(ServiceError::validation("sport is required")),
            };
            let offered = venue
                .find_sport(&wanted)
                .ok_or_else(|| ServiceError::validation("Sport not offered at this venue"))?;
            (offered.name.clone(), offered.price_per_hour)
        };

        let new_booking = NewBooking {
            user_id: actor.id,
            venue_id: venue.id,
            sport,
            date: req.date,
            slot,
            total_price: slot.price(price_per_hour),
        };
        let booking = self
            .bookings
            .create_if_slot_free(&new_booking)
            .await?
            .ok_or_else(|| ServiceError::conflict("Time slot already booked"))?;
        tracing::info!(booking_id = %booking.id, venue_id = %venue.id, user_id = %actor.id, "booking_created");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::venue_repository::VenueRepository;
    use crate::domain::users::user::Role;
    use crate::domain::venues::venue::{NewVenue, Sport, Venue, VenueStatus};
    use crate::infrastructure::memory::MemoryStore;

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn future_date() -> NaiveDate {
        chrono::Utc::now().date_naive() + chrono::Duration::days(30)
    }

    fn player() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            role: Role::Player,
        }
    }

    async fn venue(store: &MemoryStore, status: VenueStatus, sports: Vec<Sport>) -> Venue {
        store
            .create(
                Uuid::new_v4(),
                &NewVenue {
                    name: "Arena".into(),
                    description: None,
                    address: "Chennai".into(),
                    sports,
                    amenities: vec![],
                    photos: vec![],
                },
                status,
            )
            .await
            .unwrap()
    }

    fn badminton() -> Vec<Sport> {
        vec![
            Sport {
                name: "Badminton".into(),
                price_per_hour: 300.0,
            },
            Sport {
                name: "Squash".into(),
                price_per_hour: 450.0,
            },
        ]
    }

    fn request(venue_id: Uuid, sport: &str, start: u32, end: u32) -> CreateBookingRequest {
        CreateBookingRequest {
            venue_id,
            sport: Some(sport.into()),
            date: future_date(),
            start_time: t(start),
            end_time: t(end),
        }
    }

    #[tokio::test]
    async fn books_and_prices_slot() {
        let store = MemoryStore::new();
        let v = venue(&store, VenueStatus::Approved, badminton()).await;
        let uc = CreateBooking {
            bookings: &store,
            venues: &store,
        };
        let b = uc
            .execute(&player(), &request(v.id, "badminton", 18, 20))
            .await
            .unwrap();
        assert_eq!(b.sport, "Badminton");
        assert_eq!(b.total_price, 600.0);
    }

    #[tokio::test]
    async fn overlapping_slot_conflicts_but_other_sport_does_not() {
        let store = MemoryStore::new();
        let v = venue(&store, VenueStatus::Approved, badminton()).await;
        let uc = CreateBooking {
            bookings: &store,
            venues: &store,
        };
        uc.execute(&player(), &request(v.id, "Badminton", 18, 20))
            .await
            .unwrap();
        let err = uc
            .execute(&player(), &request(v.id, "Badminton", 19, 21))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        uc.execute(&player(), &request(v.id, "Squash", 19, 21))
            .await
            .unwrap();
        uc.execute(&player(), &request(v.id, "Badminton", 20, 21))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rejects_unbookable_requests() {
        let store = MemoryStore::new();
        let pending = venue(&store, VenueStatus::Pending, badminton()).await;
        let approved = venue(&store, VenueStatus::Approved, badminton()).await;
        let uc = CreateBooking {
            bookings: &store,
            venues: &store,
        };

        assert!(matches!(
            uc.execute(&player(), &request(pending.id, "Badminton", 9, 10)).await,
            Err(ServiceError::Validation(m)) if m.contains("not available")
        ));
        assert!(matches!(
            uc.execute(&player(), &request(Uuid::new_v4(), "Badminton", 9, 10)).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            uc.execute(&player(), &request(approved.id, "Badminton", 10, 9)).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            uc.execute(&player(), &request(approved.id, "Tennis", 9, 10)).await,
            Err(ServiceError::Validation(m)) if m.contains("not offered")
        ));

        let mut past = request(approved.id, "Badminton", 9, 10);
        past.date = chrono::Utc::now().date_naive() - chrono::Duration::days(1);
        assert!(matches!(
            uc.execute(&player(), &past).await,
            Err(ServiceError::Validation(m)) if m.contains("past")
        ));
    }

    #[tokio::test]
    async fn venue_without_sport_list_books_free_of_charge() {
        let store = MemoryStore::new();
        let v = venue(&store, VenueStatus::Approved, vec![]).await;
        let uc = CreateBooking {
            bookings: &store,
            venues: &store,
        };
        let b = uc
            .execute(&player(), &request(v.id, "Football", 7, 8))
            .await
            .unwrap();
        assert_eq!(b.total_price, 0.0);
    }
}
