use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::{passwords, tokens};
use crate::domain::users::user::User;

pub struct ResetPassword<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ResetPassword<'a, R> {
    pub async fn execute(&self, token: &str, new_password: &str) -> ServiceResult<User> {
        if new_password.is_empty() {
            return Err(ServiceError::validation("Password is required"));
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(ServiceError::validation("Invalid or expired reset token"));
        }
        let hash = passwords::hash_password(new_password)?;
        let user = self
            .repo
            .reset_password(&tokens::hash_token(token), &hash, chrono::Utc::now())
            .await?
            .ok_or_else(|| ServiceError::validation("Invalid or expired reset token"))?;
        tracing::info!(user_id = %user.id, "password_reset_completed");
        Ok(user)
    }
}
