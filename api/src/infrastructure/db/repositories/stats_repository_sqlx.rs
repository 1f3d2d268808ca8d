use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::application::ports::stats_repository::StatsRepository;
use crate::domain::admin::stats::{AdminStats, BookingCounts, DailyCount, UserCounts, VenueCounts};
use crate::infrastructure::db::PgPool;

pub struct SqlxStatsRepository {
    pub pool: PgPool,
}

impl SqlxStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for SqlxStatsRepository {
    async fn admin_stats(&self, since: DateTime<Utc>) -> anyhow::Result<AdminStats> {
        let totals = sqlx::query(
            r#"SELECT
                   (SELECT COUNT(*) FROM users) AS users_total,
                   (SELECT COUNT(*) FROM users WHERE is_banned) AS users_banned,
                   (SELECT COUNT(*) FROM venues) AS venues_total,
                   (SELECT COUNT(*) FROM venues WHERE status = 'approved') AS venues_approved,
                   (SELECT COUNT(*) FROM venues WHERE status = 'pending') AS venues_pending,
                   (SELECT COUNT(*) FROM bookings) AS bookings_total"#,
        )
        .fetch_one(&self.pool)
        .await?;

        let trend = sqlx::query(
            r#"SELECT (created_at AT TIME ZONE 'UTC')::date AS day, COUNT(*) AS count
               FROM bookings
               WHERE created_at >= $1
               GROUP BY day
               ORDER BY day ASC"#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| DailyCount {
            date: r.get("day"),
            count: r.get("count"),
        })
        .collect();

        Ok(AdminStats {
            users: UserCounts {
                total: totals.get("users_total"),
                banned: totals.get("users_banned"),
            },
            venues: VenueCounts {
                total: totals.get("venues_total"),
                approved: totals.get("venues_approved"),
                pending: totals.get("venues_pending"),
            },
            bookings: BookingCounts {
                total: totals.get("bookings_total"),
                trend,
            },
        })
    }
}
