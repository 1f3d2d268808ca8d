use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct ToggleBan<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ToggleBan<'a, R> {
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> ServiceResult<User> {
        access::require_admin(actor)?;
        let user = self
            .repo
            .toggle_ban(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;
        tracing::info!(admin_id = %actor.id, user_id = %id, banned = user.is_banned, "user_ban_toggled");
        Ok(user)
    }
}
