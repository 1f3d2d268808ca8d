use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::{
    UpdateUserOutcome, UserCredentials, UserRepository,
};
use crate::domain::users::user::{NewUser, User, UserPatch};
use crate::infrastructure::db::PgPool;

const USER_COLUMNS: &str =
    "id, name, email, phone, role, is_banned, profile_photo, created_at, updated_at";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(r: &PgRow) -> anyhow::Result<User> {
    let role: String = r.get("role");
    Ok(User {
        id: r.get("id"),
        name: r.get("name"),
        email: r.get("email"),
        phone: r.get("phone"),
        role: role.parse()?,
        is_banned: r.get("is_banned"),
        profile_photo: r.get("profile_photo"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

fn credentials_from_row(r: &PgRow) -> anyhow::Result<UserCredentials> {
    Ok(UserCredentials {
        user: user_from_row(r)?,
        password_hash: r.get("password_hash"),
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, new_user: &NewUser) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO users (name, email, phone, role, password_hash)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (email) DO NOTHING
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.phone)
        .bind(new_user.role.as_str())
        .bind(&new_user.password_hash)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(credentials_from_row).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_credentials_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserCredentials>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(credentials_from_row).transpose()
    }

    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn update_user(&self, id: Uuid, patch: &UserPatch) -> anyhow::Result<UpdateUserOutcome> {
        // An empty string clears the optional text columns
        let res = sqlx::query(&format!(
            r#"UPDATE users SET
                   name = COALESCE($2, name),
                   email = COALESCE($3, email),
                   phone = CASE WHEN $4::text IS NULL THEN phone ELSE NULLIF($4, '') END,
                   role = COALESCE($5, role),
                   is_banned = COALESCE($6, is_banned),
                   profile_photo = CASE WHEN $7::text IS NULL THEN profile_photo ELSE NULLIF($7, '') END,
                   password_hash = COALESCE($8, password_hash),
                   updated_at = now()
               WHERE id = $1
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.phone)
        .bind(patch.role.map(|r| r.as_str()))
        .bind(patch.is_banned)
        .bind(&patch.profile_photo)
        .bind(&patch.password_hash)
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(Some(row)) => Ok(UpdateUserOutcome::Updated(user_from_row(&row)?)),
            Ok(None) => Ok(UpdateUserOutcome::NotFound),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Ok(UpdateUserOutcome::EmailTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn toggle_ban(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            r#"UPDATE users SET is_banned = NOT is_banned, updated_at = now()
               WHERE id = $1
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"UPDATE users SET reset_token_hash = $2, reset_token_expires_at = $3
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn reset_password(
        &self,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(&format!(
            r#"UPDATE users SET password_hash = $2,
                   reset_token_hash = NULL,
                   reset_token_expires_at = NULL,
                   updated_at = $3
               WHERE reset_token_hash = $1 AND reset_token_expires_at > $3
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(token_hash)
        .bind(password_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
