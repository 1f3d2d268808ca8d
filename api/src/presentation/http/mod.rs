pub mod admin;
pub mod auth;
pub mod bookings;
pub mod error;
pub mod health;
pub mod openapi;
pub mod responses;
pub mod users;
pub mod venues;

use axum::{Json, Router, http::StatusCode};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::openapi::ApiDoc;
use crate::presentation::http::responses::MessageResponse;

/// Every `/api` route plus the OpenAPI document, without transport layers.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api", health::routes(ctx.clone()))
        .nest(
            "/api/users",
            auth::routes(ctx.clone())
                .merge(admin::routes(ctx.clone()))
                .merge(users::routes(ctx.clone())),
        )
        .nest("/api/venues", venues::routes(ctx.clone()))
        .nest("/api/bookings", bookings::routes(ctx))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
}

async fn not_found() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::failure("Not Found")),
    )
}
