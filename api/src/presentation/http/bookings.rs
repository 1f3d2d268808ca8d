use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch},
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::error::ServiceError;
use crate::application::use_cases::bookings::cancel_booking::CancelBooking;
use crate::application::use_cases::bookings::create_booking::{
    CreateBooking, CreateBookingRequest,
};
use crate::application::use_cases::bookings::get_booking::GetBooking;
use crate::application::use_cases::bookings::list_bookings::{
    ListAllBookings, ListMyBookings, ListVenueBookings,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::bookings::booking::{Booking, BookingStatus};
use crate::presentation::http::auth::CurrentUser;
use crate::presentation::http::error::{ApiError, ApiJson, ApiPath, ApiResult};
use crate::presentation::http::responses::Envelope;

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub venue_id: Uuid,
    pub sport: String,
    #[schema(value_type = String, example = "2026-05-01")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "10:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "11:30:00")]
    pub end_time: NaiveTime,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        BookingResponse {
            id: b.id,
            user_id: b.user_id,
            venue_id: b.venue_id,
            sport: b.sport,
            date: b.date,
            start_time: b.start_time,
            end_time: b.end_time,
            total_price: b.total_price,
            status: b.status,
            created_at: b.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateBookingBody {
    #[serde(alias = "venueId")]
    pub venue_id: Option<Uuid>,
    pub sport: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `HH:MM` or `HH:MM:SS`
    #[serde(alias = "startTime")]
    pub start_time: Option<String>,
    #[serde(alias = "endTime")]
    pub end_time: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_all_bookings).post(create_booking))
        .route("/me", get(list_my_bookings))
        .route("/:id", get(get_booking))
        .route("/:id/cancel", patch(cancel_booking))
        .with_state(ctx)
}

fn booking_list(items: Vec<Booking>) -> Json<Envelope<Vec<BookingResponse>>> {
    Json(Envelope::new(
        items.into_iter().map(BookingResponse::from).collect(),
    ))
}

fn parse_time(raw: Option<&str>, field: &str) -> Result<NaiveTime, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError(ServiceError::validation(format!("{field} is required"))))?;
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| ApiError(ServiceError::validation(format!("Invalid {field}"))))
}

fn parse_body(body: CreateBookingBody) -> Result<CreateBookingRequest, ApiError> {
    let venue_id = body
        .venue_id
        .ok_or_else(|| ApiError(ServiceError::validation("venue_id is required")))?;
    let date = body
        .date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError(ServiceError::validation("date is required")))?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ApiError(ServiceError::validation("Invalid date")))?;
    Ok(CreateBookingRequest {
        venue_id,
        sport: body.sport,
        date,
        start_time: parse_time(body.start_time.as_deref(), "start_time")?,
        end_time: parse_time(body.end_time.as_deref(), "end_time")?,
    })
}

#[utoipa::path(post, path = "/api/bookings", tag = "Bookings", request_body = CreateBookingBody, responses(
    (status = 201, body = BookingEnvelope),
    (status = 400, body = MessageResponse),
    (status = 404, body = MessageResponse),
    (status = 409, body = MessageResponse)
))]
pub async fn create_booking(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiJson(body): ApiJson<CreateBookingBody>,
) -> ApiResult<(StatusCode, Json<Envelope<BookingResponse>>)> {
    let dto = parse_body(body)?;
    let bookings = ctx.booking_repo();
    let venues = ctx.venue_repo();
    let uc = CreateBooking {
        bookings: bookings.as_ref(),
        venues: venues.as_ref(),
    };
    let booking = uc.execute(&current.actor(), &dto).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(booking.into()))))
}

#[utoipa::path(get, path = "/api/bookings/me", tag = "Bookings", responses(
    (status = 200, body = BookingListEnvelope)
))]
pub async fn list_my_bookings(
    State(ctx): State<AppContext>,
    current: CurrentUser,
) -> ApiResult<Json<Envelope<Vec<BookingResponse>>>> {
    let bookings = ctx.booking_repo();
    let uc = ListMyBookings {
        bookings: bookings.as_ref(),
    };
    Ok(booking_list(uc.execute(&current.actor()).await?))
}

#[utoipa::path(get, path = "/api/bookings", tag = "Bookings", responses(
    (status = 200, body = BookingListEnvelope),
    (status = 403, body = MessageResponse)
))]
pub async fn list_all_bookings(
    State(ctx): State<AppContext>,
    current: CurrentUser,
) -> ApiResult<Json<Envelope<Vec<BookingResponse>>>> {
    let bookings = ctx.booking_repo();
    let uc = ListAllBookings {
        bookings: bookings.as_ref(),
    };
    Ok(booking_list(uc.execute(&current.actor()).await?))
}

#[utoipa::path(get, path = "/api/venues/{id}/bookings", tag = "Bookings",
    params(("id" = Uuid, Path, description = "Venue ID")),
    responses((status = 200, body = BookingListEnvelope), (status = 403, body = MessageResponse), (status = 404, body = MessageResponse)))]
pub async fn list_venue_bookings(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiPath(venue_id): ApiPath<Uuid>,
) -> ApiResult<Json<Envelope<Vec<BookingResponse>>>> {
    let bookings = ctx.booking_repo();
    let venues = ctx.venue_repo();
    let uc = ListVenueBookings {
        bookings: bookings.as_ref(),
        venues: venues.as_ref(),
    };
    Ok(booking_list(uc.execute(&current.actor(), venue_id).await?))
}

#[utoipa::path(get, path = "/api/bookings/{id}", tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses((status = 200, body = BookingEnvelope), (status = 403, body = MessageResponse), (status = 404, body = MessageResponse)))]
pub async fn get_booking(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Envelope<BookingResponse>>> {
    let bookings = ctx.booking_repo();
    let venues = ctx.venue_repo();
    let uc = GetBooking {
        bookings: bookings.as_ref(),
        venues: venues.as_ref(),
    };
    let booking = uc.execute(&current.actor(), id).await?;
    Ok(Json(Envelope::new(booking.into())))
}

#[utoipa::path(patch, path = "/api/bookings/{id}/cancel", tag = "Bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses((status = 200, body = BookingEnvelope), (status = 400, body = MessageResponse), (status = 403, body = MessageResponse)))]
pub async fn cancel_booking(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Envelope<BookingResponse>>> {
    let bookings = ctx.booking_repo();
    let uc = CancelBooking {
        bookings: bookings.as_ref(),
    };
    let booking = uc.execute(&current.actor(), id).await?;
    Ok(Json(Envelope::new(booking.into())))
}
