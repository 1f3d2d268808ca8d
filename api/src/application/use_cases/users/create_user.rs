use crate::application::access::{self, Actor};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::{passwords, validation};
use crate::domain::users::user::{NewUser, Role, User, normalize_email};

pub struct CreateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

impl<'a, R: UserRepository + ?Sized> CreateUser<'a, R> {
    pub async fn execute(&self, actor: &Actor, req: &CreateUserRequest) -> ServiceResult<User> {
        access::require_admin(actor)?;
        let name = validation::required(req.name.as_deref(), "name")?;
        let email = normalize_email(&validation::required(req.email.as_deref(), "email")?);
        if !validation::is_valid_email(&email) {
            return Err(ServiceError::validation("Invalid email address"));
        }
        let password = req
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ServiceError::validation("password is required"))?;
        let role: Role = match req.role.as_deref() {
            None => Role::Player,
            Some(r) => r
                .parse()
                .map_err(|_| ServiceError::validation("Invalid role selected"))?,
        };

        let new_user = NewUser {
            name,
            email,
            phone: validation::non_blank(req.phone.clone()),
            role,
            password_hash: passwords::hash_password(password)?,
        };
        let user = self
            .repo
            .create_user(&new_user)
            .await?
            .ok_or_else(|| ServiceError::validation("Email already registered"))?;
        tracing::info!(admin_id = %actor.id, user_id = %user.id, "admin_created_user");
        Ok(user)
    }
}
