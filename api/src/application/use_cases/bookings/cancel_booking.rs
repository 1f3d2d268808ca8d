use uuid::Uuid;

use crate::application::access::{self, Actor, Capability};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::booking_repository::BookingRepository;
use crate::domain::bookings::booking::{Booking, BookingStatus};

pub struct CancelBooking<'a, B: BookingRepository + ?Sized> {
    pub bookings: &'a B,
}

impl<'a, B: BookingRepository + ?Sized> CancelBooking<'a, B> {
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> ServiceResult<Booking> {
        let booking = self
            .bookings
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Booking not found"))?;
        if access::resolve_booking(actor, &booking, None) < Capability::Edit {
            return Err(ServiceError::forbidden("Not allowed to cancel this booking"));
        }
        if booking.status == BookingStatus::Cancelled {
            return Err(ServiceError::validation("Booking already cancelled"));
        }
        let cancelled = self
            .bookings
            .set_status(id, BookingStatus::Cancelled)
            .await?
            .ok_or_else(|| ServiceError::not_found("Booking not found"))?;
        tracing::info!(booking_id = %id, actor_id = %actor.id, "booking_cancelled");
        Ok(cancelled)
    }
}
