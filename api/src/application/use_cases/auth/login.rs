use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords;
use crate::domain::users::user::{User, normalize_email};

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    pub async fn execute(&self, req: &LoginRequest) -> ServiceResult<User> {
        let creds = self
            .repo
            .find_by_email(&normalize_email(&req.email))
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;

        if creds.user.is_banned {
            return Err(ServiceError::forbidden("Account banned"));
        }
        if !passwords::verify_password(&req.password, &creds.password_hash)? {
            return Err(ServiceError::validation("Invalid credentials"));
        }
        Ok(creds.user)
    }
}
