use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::{UpdateUserOutcome, UserRepository};
use crate::application::services::validation;
use crate::domain::users::user::{Role, User, UserPatch, normalize_email};

pub struct UpdateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub is_banned: Option<bool>,
    pub profile_photo: Option<String>,
}

impl<'a, R: UserRepository + ?Sized> UpdateUser<'a, R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        id: Uuid,
        req: &UpdateUserRequest,
    ) -> ServiceResult<User> {
        access::require_admin(actor)?;

        let mut patch = UserPatch {
            phone: req.phone.clone(),
            is_banned: req.is_banned,
            profile_photo: req.profile_photo.clone(),
            ..Default::default()
        };
        if let Some(name) = &req.name {
            patch.name = Some(validation::required(Some(name.as_str()), "name")?);
        }
        if let Some(email) = &req.email {
            let email = normalize_email(email);
            if !validation::is_valid_email(&email) {
                return Err(ServiceError::validation("Invalid email address"));
            }
            patch.email = Some(email);
        }
        if let Some(role) = &req.role {
            patch.role = Some(
                role.parse::<Role>()
                    .map_err(|_| ServiceError::validation("Invalid role selected"))?,
            );
        }

        match self.repo.update_user(id, &patch).await? {
            UpdateUserOutcome::Updated(user) => Ok(user),
            UpdateUserOutcome::NotFound => Err(ServiceError::not_found("User not found")),
            UpdateUserOutcome::EmailTaken => {
                Err(ServiceError::validation("Email already registered"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::user::NewUser;
    use crate::infrastructure::memory::MemoryStore;

    async fn add(store: &MemoryStore, email: &str) -> User {
        store
            .create_user(&NewUser {
                name: "Someone".into(),
                email: email.into(),
                phone: None,
                role: Role::Player,
                password_hash: "h".into(),
            })
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn admin_edits_role_and_email() {
        let store = MemoryStore::new();
        let user = add(&store, "a@example.com").await;
        add(&store, "b@example.com").await;
        let admin = Actor {
            id: Uuid::new_v4(),
            role: Role::Admin,
        };
        let uc = UpdateUser { repo: &store };

        let updated = uc
            .execute(
                &admin,
                user.id,
                &UpdateUserRequest {
                    email: Some(" A2@Example.com".into()),
                    role: Some("owner".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.email, "a2@example.com");
        assert_eq!(updated.role, Role::Owner);

        let taken = UpdateUserRequest {
            email: Some("b@example.com".into()),
            ..Default::default()
        };
        assert!(matches!(
            uc.execute(&admin, user.id, &taken).await,
            Err(ServiceError::Validation(m)) if m == "Email already registered"
        ));
        let bad_role = UpdateUserRequest {
            role: Some("coach".into()),
            ..Default::default()
        };
        assert!(matches!(
            uc.execute(&admin, user.id, &bad_role).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            uc.execute(&admin, Uuid::new_v4(), &UpdateUserRequest::default()).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
