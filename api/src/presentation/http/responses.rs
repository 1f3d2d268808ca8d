use serde::Serialize;
use utoipa::ToSchema;

use crate::presentation::http::admin::StatsResponse;
use crate::presentation::http::bookings::BookingResponse;
use crate::presentation::http::users::UserResponse;
use crate::presentation::http::venues::VenueResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// `{ success: true, data }` wrapper used by the resource endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    UserEnvelope = Envelope<UserResponse>,
    UserListEnvelope = Envelope<Vec<UserResponse>>,
    VenueEnvelope = Envelope<VenueResponse>,
    VenueListEnvelope = Envelope<Vec<VenueResponse>>,
    BookingEnvelope = Envelope<BookingResponse>,
    BookingListEnvelope = Envelope<Vec<BookingResponse>>,
    StatsEnvelope = Envelope<StatsResponse>
)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
