use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::admin::stats::AdminStats;

#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Aggregate counts; the booking trend covers bookings created at or after `since`.
    async fn admin_stats(&self, since: DateTime<Utc>) -> anyhow::Result<AdminStats>;
}
