use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::bookings::booking::{Booking, BookingStatus, NewBooking};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking unless a confirmed booking for the same venue,
    /// sport and date overlaps its slot. Check and insert are atomic per venue.
    /// Returns None on conflict.
    async fn create_if_slot_free(&self, booking: &NewBooking) -> anyhow::Result<Option<Booking>>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Booking>>;

    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Booking>>;

    async fn list_for_venue(&self, venue_id: Uuid) -> anyhow::Result<Vec<Booking>>;

    async fn list_all(&self) -> anyhow::Result<Vec<Booking>>;

    async fn set_status(&self, id: Uuid, status: BookingStatus) -> anyhow::Result<Option<Booking>>;
}
