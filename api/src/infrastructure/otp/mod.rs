use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::application::ports::otp_store::{OtpStore, PendingRegistration};

/// Pending registrations keyed by normalized email. Entries live only in this
/// process; a restart drops every outstanding code.
#[derive(Default)]
pub struct InMemoryOtpStore {
    entries: RwLock<HashMap<String, PendingRegistration>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, pending: PendingRegistration) -> anyhow::Result<()> {
        self.entries
            .write()
            .await
            .insert(pending.email.clone(), pending);
        Ok(())
    }

    async fn get(&self, email: &str) -> anyhow::Result<Option<PendingRegistration>> {
        Ok(self.entries.read().await.get(email).cloned())
    }

    async fn remove(&self, email: &str) -> anyhow::Result<()> {
        self.entries.write().await.remove(email);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> anyhow::Result<usize> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, p| !p.is_expired(now));
        Ok(before - entries.len())
    }
}
