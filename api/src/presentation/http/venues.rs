use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::error::ServiceError;
use crate::application::use_cases::venues::create_venue::{CreateVenue, CreateVenueRequest};
use crate::application::use_cases::venues::delete_venue::DeleteVenue;
use crate::application::use_cases::venues::get_venue::GetVenue;
use crate::application::use_cases::venues::list_venues::{ListMyVenues, ListVenues, ListVenuesQuery};
use crate::application::use_cases::venues::set_venue_status::SetVenueStatus;
use crate::application::use_cases::venues::update_venue::{UpdateVenue, UpdateVenueRequest};
use crate::bootstrap::app_context::AppContext;
use crate::domain::venues::venue::{Sport, Venue, VenueStatus};
use crate::presentation::http::auth::{CurrentUser, MaybeActor};
use crate::presentation::http::bookings::list_venue_bookings;
use crate::presentation::http::error::{ApiError, ApiJson, ApiPath, ApiQuery, ApiResult};
use crate::presentation::http::responses::{Envelope, MessageResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct VenueResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub sports: Vec<Sport>,
    pub amenities: Vec<String>,
    pub photos: Vec<String>,
    pub average_rating: f64,
    pub status: VenueStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Venue> for VenueResponse {
    fn from(v: Venue) -> Self {
        VenueResponse {
            id: v.id,
            owner_id: v.owner_id,
            name: v.name,
            description: v.description,
            address: v.address,
            sports: v.sports,
            amenities: v.amenities,
            photos: v.photos,
            average_rating: v.average_rating,
            status: v.status,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListVenuesParams {
    /// `pending` or `approved`; honoured for admins only
    pub status: Option<String>,
    pub sport: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateVenueBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub sports: Vec<Sport>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateVenueBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub sports: Option<Vec<Sport>>,
    pub amenities: Option<Vec<String>>,
    pub photos: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VenueStatusBody {
    pub status: VenueStatus,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_venues).post(create_venue))
        .route("/mine", get(list_my_venues))
        .route("/:id", get(get_venue).put(update_venue).delete(delete_venue))
        .route("/:id/status", patch(set_venue_status))
        .route("/:id/bookings", get(list_venue_bookings))
        .with_state(ctx)
}

fn venue_list(venues: Vec<Venue>) -> Json<Envelope<Vec<VenueResponse>>> {
    Json(Envelope::new(
        venues.into_iter().map(VenueResponse::from).collect(),
    ))
}

#[utoipa::path(get, path = "/api/venues", tag = "Venues", params(ListVenuesParams), security(()), responses(
    (status = 200, body = VenueListEnvelope)
))]
pub async fn list_venues(
    State(ctx): State<AppContext>,
    MaybeActor(actor): MaybeActor,
    ApiQuery(params): ApiQuery<ListVenuesParams>,
) -> ApiResult<Json<Envelope<Vec<VenueResponse>>>> {
    let status = match params.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Some(
            s.parse::<VenueStatus>()
                .map_err(|_| ApiError(ServiceError::validation("Invalid venue status")))?,
        ),
        None => None,
    };
    let repo = ctx.venue_repo();
    let uc = ListVenues {
        repo: repo.as_ref(),
    };
    let venues = uc
        .execute(
            actor.as_ref(),
            ListVenuesQuery {
                status,
                sport: params.sport,
                q: params.q,
            },
        )
        .await?;
    Ok(venue_list(venues))
}

#[utoipa::path(get, path = "/api/venues/mine", tag = "Venues", responses(
    (status = 200, body = VenueListEnvelope),
    (status = 403, body = MessageResponse)
))]
pub async fn list_my_venues(
    State(ctx): State<AppContext>,
    current: CurrentUser,
) -> ApiResult<Json<Envelope<Vec<VenueResponse>>>> {
    let repo = ctx.venue_repo();
    let uc = ListMyVenues {
        repo: repo.as_ref(),
    };
    let venues = uc.execute(&current.actor()).await?;
    Ok(venue_list(venues))
}

#[utoipa::path(get, path = "/api/venues/{id}", tag = "Venues", security(()),
    params(("id" = Uuid, Path, description = "Venue ID")),
    responses((status = 200, body = VenueEnvelope), (status = 404, body = MessageResponse)))]
pub async fn get_venue(
    State(ctx): State<AppContext>,
    MaybeActor(actor): MaybeActor,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Envelope<VenueResponse>>> {
    let repo = ctx.venue_repo();
    let uc = GetVenue {
        repo: repo.as_ref(),
    };
    let venue = uc.execute(actor.as_ref(), id).await?;
    Ok(Json(Envelope::new(venue.into())))
}

#[utoipa::path(post, path = "/api/venues", tag = "Venues", request_body = CreateVenueBody, responses(
    (status = 201, body = VenueEnvelope),
    (status = 400, body = MessageResponse),
    (status = 403, body = MessageResponse)
))]
pub async fn create_venue(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiJson(body): ApiJson<CreateVenueBody>,
) -> ApiResult<(StatusCode, Json<Envelope<VenueResponse>>)> {
    let repo = ctx.venue_repo();
    let uc = CreateVenue {
        repo: repo.as_ref(),
    };
    let dto = CreateVenueRequest {
        name: body.name,
        description: body.description,
        address: body.address,
        sports: body.sports,
        amenities: body.amenities,
        photos: body.photos,
    };
    let venue = uc.execute(&current.actor(), &dto).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(venue.into()))))
}

#[utoipa::path(put, path = "/api/venues/{id}", tag = "Venues", request_body = UpdateVenueBody,
    params(("id" = Uuid, Path, description = "Venue ID")),
    responses((status = 200, body = VenueEnvelope), (status = 403, body = MessageResponse), (status = 404, body = MessageResponse)))]
pub async fn update_venue(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateVenueBody>,
) -> ApiResult<Json<Envelope<VenueResponse>>> {
    let repo = ctx.venue_repo();
    let uc = UpdateVenue {
        repo: repo.as_ref(),
    };
    let dto = UpdateVenueRequest {
        name: body.name,
        description: body.description,
        address: body.address,
        sports: body.sports,
        amenities: body.amenities,
        photos: body.photos,
    };
    let venue = uc.execute(&current.actor(), id, &dto).await?;
    Ok(Json(Envelope::new(venue.into())))
}

#[utoipa::path(delete, path = "/api/venues/{id}", tag = "Venues",
    params(("id" = Uuid, Path, description = "Venue ID")),
    responses((status = 200, body = MessageResponse), (status = 403, body = MessageResponse), (status = 404, body = MessageResponse)))]
pub async fn delete_venue(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let repo = ctx.venue_repo();
    let uc = DeleteVenue {
        repo: repo.as_ref(),
    };
    uc.execute(&current.actor(), id).await?;
    Ok(Json(MessageResponse::ok("Venue deleted")))
}

#[utoipa::path(patch, path = "/api/venues/{id}/status", tag = "Venues", request_body = VenueStatusBody,
    params(("id" = Uuid, Path, description = "Venue ID")),
    responses((status = 200, body = VenueEnvelope), (status = 403, body = MessageResponse), (status = 404, body = MessageResponse)))]
pub async fn set_venue_status(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<VenueStatusBody>,
) -> ApiResult<Json<Envelope<VenueResponse>>> {
    let repo = ctx.venue_repo();
    let uc = SetVenueStatus {
        repo: repo.as_ref(),
    };
    let venue = uc.execute(&current.actor(), id, body.status).await?;
    Ok(Json(Envelope::new(venue.into())))
}
