use utoipa::OpenApi;

use crate::presentation::http::{admin, auth, bookings, health, responses, users, venues};

#[derive(OpenApi)]
#[openapi(
        paths(
            auth::send_otp,
            auth::verify_otp,
            auth::login,
            auth::logout,
            auth::forgot_password,
            auth::reset_password,
            auth::me,
            auth::update_me,
            users::list_users,
            users::get_user,
            users::create_user,
            users::update_user,
            users::delete_user,
            users::toggle_ban,
            admin::get_stats,
            venues::list_venues,
            venues::list_my_venues,
            venues::get_venue,
            venues::create_venue,
            venues::update_venue,
            venues::delete_venue,
            venues::set_venue_status,
            bookings::create_booking,
            bookings::list_my_bookings,
            bookings::list_all_bookings,
            bookings::list_venue_bookings,
            bookings::get_booking,
            bookings::cancel_booking,
            health::health,
        ),
        components(schemas(
            responses::MessageResponse,
            responses::UserEnvelope,
            responses::UserListEnvelope,
            responses::VenueEnvelope,
            responses::VenueListEnvelope,
            responses::BookingEnvelope,
            responses::BookingListEnvelope,
            responses::StatsEnvelope,
            auth::SendOtpBody,
            auth::VerifyOtpBody,
            auth::VerifyOtpResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::MeResponse,
            auth::UpdateProfileBody,
            auth::ForgotPasswordBody,
            auth::ForgotPasswordResponse,
            auth::ResetPasswordBody,
            users::UserResponse,
            users::CreateUserBody,
            users::UpdateUserBody,
            admin::StatsResponse,
            admin::UserStats,
            admin::VenueStats,
            admin::BookingStats,
            admin::TrendPoint,
            venues::VenueResponse,
            venues::CreateVenueBody,
            venues::UpdateVenueBody,
            venues::VenueStatusBody,
            bookings::BookingResponse,
            bookings::CreateBookingBody,
            health::HealthResp,
            crate::domain::users::user::Role,
            crate::domain::venues::venue::Sport,
            crate::domain::venues::venue::VenueStatus,
            crate::domain::bookings::booking::BookingStatus,
        )),
        tags(
            (name = "Auth", description = "Registration, sessions and profile"),
            (name = "Users", description = "User administration"),
            (name = "Admin", description = "Dashboard statistics"),
            (name = "Venues", description = "Venue catalogue and management"),
            (name = "Bookings", description = "Court bookings"),
            (name = "Health", description = "System health checks")
        )
    )]
pub struct ApiDoc;
