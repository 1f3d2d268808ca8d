use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;

pub struct DeleteUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> DeleteUser<'a, R> {
    pub async fn execute(&self, actor: &Actor, id: Uuid) -> ServiceResult<()> {
        access::require_admin(actor)?;
        if !self.repo.delete_user(id).await? {
            return Err(ServiceError::not_found("User not found"));
        }
        tracing::info!(admin_id = %actor.id, user_id = %id, "admin_deleted_user");
        Ok(())
    }
}
