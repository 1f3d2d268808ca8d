use crate::application::access::{self, Actor};
use crate::application::error::ServiceResult;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct ListUsers<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ListUsers<'a, R> {
    pub async fn execute(&self, actor: &Actor) -> ServiceResult<Vec<User>> {
        access::require_admin(actor)?;
        Ok(self.repo.list_users().await?)
    }
}
