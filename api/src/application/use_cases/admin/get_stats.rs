use chrono::{DateTime, Utc};

use crate::application::access::{self, Actor};
use crate::application::error::ServiceResult;
use crate::application::ports::stats_repository::StatsRepository;
use crate::domain::admin::stats::{AdminStats, trend_since};

pub struct GetAdminStats<'a, R: StatsRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: StatsRepository + ?Sized> GetAdminStats<'a, R> {
    pub async fn execute(&self, actor: &Actor, now: DateTime<Utc>) -> ServiceResult<AdminStats> {
        access::require_admin(actor)?;
        Ok(self.repo.admin_stats(trend_since(now)).await?)
    }
}
