use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::users::user::Role;

/// A registration waiting for its OTP to be confirmed.
#[derive(Debug, Clone)]
pub struct PendingRegistration {
    pub otp: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub password_hash: String,
    pub expires_at: DateTime<Utc>,
}

impl PendingRegistration {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[async_trait]
pub trait OtpStore: Send + Sync {
    // Replaces any earlier entry for the same email
    async fn put(&self, pending: PendingRegistration) -> anyhow::Result<()>;
    async fn get(&self, email: &str) -> anyhow::Result<Option<PendingRegistration>>;
    async fn remove(&self, email: &str) -> anyhow::Result<()>;
    async fn purge_expired(&self, now: DateTime<Utc>) -> anyhow::Result<usize>;
}
