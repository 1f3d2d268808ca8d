use uuid::Uuid;

use crate::application::access::{self, Actor, Capability};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::booking_repository::BookingRepository;
use crate::application::ports::venue_repository::VenueRepository;
use crate::domain::bookings::booking::Booking;

pub struct ListMyBookings<'a, B: BookingRepository + ?Sized> {
    pub bookings: &'a B,
}

impl<'a, B: BookingRepository + ?Sized> ListMyBookings<'a, B> {
    pub async fn execute(&self, actor: &Actor) -> ServiceResult<Vec<Booking>> {
        Ok(self.bookings.list_for_user(actor.id).await?)
    }
}

pub struct ListAllBookings<'a, B: BookingRepository + ?Sized> {
    pub bookings: &'a B,
}

impl<'a, B: BookingRepository + ?Sized> ListAllBookings<'a, B> {
    pub async fn execute(&self, actor: &Actor) -> ServiceResult<Vec<Booking>> {
        access::require_admin(actor)?;
        Ok(self.bookings.list_all().await?)
    }
}

pub struct ListVenueBookings<'a, B, V>
where
    B: BookingRepository + ?Sized,
    V: VenueRepository + ?Sized,
{
    pub bookings: &'a B,
    pub venues: &'a V,
}

impl<'a, B, V> ListVenueBookings<'a, B, V>
where
    B: BookingRepository + ?Sized,
    V: VenueRepository + ?Sized,
{
    pub async fn execute(&self, actor: &Actor, venue_id: Uuid) -> ServiceResult<Vec<Booking>> {
        let venue = self
            .venues
            .get_by_id(venue_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue not found"))?;
        if access::resolve_venue(Some(actor), &venue) < Capability::Edit {
            return Err(ServiceError::forbidden("Not allowed to view bookings for this venue"));
        }
        Ok(self.bookings.list_for_venue(venue_id).await?)
    }
}
