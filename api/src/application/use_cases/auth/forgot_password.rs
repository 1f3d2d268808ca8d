use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::tokens;
use crate::domain::users::user::normalize_email;

pub struct ForgotPassword<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
    pub ttl: chrono::Duration,
}

impl<'a, R: UserRepository + ?Sized> ForgotPassword<'a, R> {
    /// Returns the raw reset token; only its digest is stored.
    pub async fn execute(&self, email: &str) -> ServiceResult<String> {
        let user = self
            .repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?
            .user;

        let token = tokens::generate_random_token(tokens::RESET_TOKEN_BYTES);
        let stored = self
            .repo
            .set_reset_token(
                user.id,
                &tokens::hash_token(&token),
                chrono::Utc::now() + self.ttl,
            )
            .await?;
        if !stored {
            return Err(ServiceError::not_found("User not found"));
        }
        tracing::info!(user_id = %user.id, "password_reset_token_issued");
        Ok(token)
    }
}
