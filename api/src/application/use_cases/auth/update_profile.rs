use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::{UpdateUserOutcome, UserRepository};
use crate::application::services::passwords;
use crate::domain::users::user::{User, UserPatch};

pub struct UpdateProfile<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub profile_photo: Option<String>,
    pub password: Option<String>,
    pub old_password: Option<String>,
}

impl<'a, R: UserRepository + ?Sized> UpdateProfile<'a, R> {
    pub async fn execute(&self, user_id: Uuid, req: &UpdateProfileRequest) -> ServiceResult<User> {
        let mut patch = UserPatch::default();
        if let Some(name) = &req.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ServiceError::validation("Name cannot be empty"));
            }
            patch.name = Some(name.to_string());
        }
        patch.phone = req.phone.as_ref().map(|p| p.trim().to_string());
        patch.profile_photo = req.profile_photo.as_ref().map(|p| p.trim().to_string());

        // An empty password means "unchanged"
        if let Some(password) = req.password.as_deref().filter(|p| !p.is_empty()) {
            let creds = self
                .repo
                .find_credentials_by_id(user_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User not found"))?;
            let old = req
                .old_password
                .as_deref()
                .filter(|p| !p.is_empty())
                .ok_or_else(|| {
                    ServiceError::validation("Old password is required to change password")
                })?;
            if !passwords::verify_password(old, &creds.password_hash)? {
                return Err(ServiceError::validation("Old password is incorrect"));
            }
            patch.password_hash = Some(passwords::hash_password(password)?);
        }

        if patch.is_empty() {
            return self
                .repo
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User not found"));
        }

        match self.repo.update_user(user_id, &patch).await? {
            UpdateUserOutcome::Updated(user) => Ok(user),
            UpdateUserOutcome::NotFound => Err(ServiceError::not_found("User not found")),
            UpdateUserOutcome::EmailTaken => {
                Err(ServiceError::validation("Email already registered"))
            }
        }
    }
}
