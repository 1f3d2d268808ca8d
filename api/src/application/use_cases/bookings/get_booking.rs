use uuid::Uuid;

use crate::application::access::{self, Actor, Capability};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::booking_repository::BookingRepository;
use crate::application::ports::venue_repository::VenueRepository;
use crate::domain::bookings::booking::Booking;

pub struct GetBooking<'a, B, V>
where
    B: BookingRepository + ?Sized,
    V: VenueRepository + ?Sized,
{
    pub bookings: &'a B,
    pub venues: &'a V,
}

impl<'a, B, V> GetBooking<'a, B, V>
where
    B: BookingRepository + ?Sized,
    V: VenueRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> ServiceResult<Booking> {
        let booking = self
            .bookings
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Booking not found"))?;
        let owner = self
            .venues
            .get_by_id(booking.venue_id)
            .await?
            .map(|v| v.owner_id);
        if access::resolve_booking(actor, &booking, owner) < Capability::View {
            return Err(ServiceError::forbidden("Not allowed to view this booking"));
        }
        Ok(booking)
    }
}
