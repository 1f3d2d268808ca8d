use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::admin::get_stats::GetAdminStats;
use crate::bootstrap::app_context::AppContext;
use crate::domain::admin::stats::{AdminStats, DailyCount};
use crate::presentation::http::auth::CurrentUser;
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::responses::Envelope;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserStats {
    pub total: i64,
    pub banned: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VenueStats {
    pub total: i64,
    pub approved: i64,
    pub pending: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrendPoint {
    /// `YYYY-MM-DD`, UTC
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingStats {
    pub total: i64,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub users: UserStats,
    pub venues: VenueStats,
    pub bookings: BookingStats,
}

impl From<DailyCount> for TrendPoint {
    fn from(d: DailyCount) -> Self {
        TrendPoint {
            date: d.date.format("%Y-%m-%d").to_string(),
            count: d.count,
        }
    }
}

impl From<AdminStats> for StatsResponse {
    fn from(s: AdminStats) -> Self {
        StatsResponse {
            users: UserStats {
                total: s.users.total,
                banned: s.users.banned,
            },
            venues: VenueStats {
                total: s.venues.total,
                approved: s.venues.approved,
                pending: s.venues.pending,
            },
            bookings: BookingStats {
                total: s.bookings.total,
                trend: s.bookings.trend.into_iter().map(TrendPoint::from).collect(),
            },
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/admin/stats", get(get_stats))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/users/admin/stats", tag = "Admin", responses(
    (status = 200, body = StatsEnvelope),
    (status = 403, body = MessageResponse)
))]
pub async fn get_stats(
    State(ctx): State<AppContext>,
    current: CurrentUser,
) -> ApiResult<Json<Envelope<StatsResponse>>> {
    let repo = ctx.stats_repo();
    let uc = GetAdminStats {
        repo: repo.as_ref(),
    };
    let stats = uc.execute(&current.actor(), chrono::Utc::now()).await?;
    Ok(Json(Envelope::new(stats.into())))
}
