use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::users::user::{NewUser, User, UserPatch};

#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    // Returns None when the email is already taken
    async fn create_user(&self, new_user: &NewUser) -> anyhow::Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserCredentials>>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    async fn find_credentials_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserCredentials>>;

    async fn list_users(&self) -> anyhow::Result<Vec<User>>;

    async fn update_user(&self, id: Uuid, patch: &UserPatch) -> anyhow::Result<UpdateUserOutcome>;

    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn toggle_ban(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    async fn set_reset_token(
        &self,
        id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<bool>;

    /// Replaces the password of the user holding an unexpired reset token and
    /// clears the token. Returns None when no such user exists.
    async fn reset_password(
        &self,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<User>>;

    async fn ping(&self) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub enum UpdateUserOutcome {
    Updated(User),
    NotFound,
    EmailTaken,
}
