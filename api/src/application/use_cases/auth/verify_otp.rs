use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::otp_store::OtpStore;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::{NewUser, User, normalize_email};

pub struct VerifyRegistrationOtp<'a, U, O>
where
    U: UserRepository + ?Sized,
    O: OtpStore + ?Sized,
{
    pub users: &'a U,
    pub otps: &'a O,
}

impl<'a, U, O> VerifyRegistrationOtp<'a, U, O>
where
    U: UserRepository + ?Sized,
    O: OtpStore + ?Sized,
{
    pub async fn execute(&self, email: &str, otp: &str) -> ServiceResult<User> {
        let email = normalize_email(email);
        let pending = self
            .otps
            .get(&email)
            .await?
            .ok_or_else(|| ServiceError::not_found("OTP not found or expired"))?;

        if pending.otp != otp.trim() {
            return Err(ServiceError::validation("Invalid OTP"));
        }
        if pending.is_expired(chrono::Utc::now()) {
            self.otps.remove(&email).await?;
            return Err(ServiceError::validation("OTP expired"));
        }

        let new_user = NewUser {
            name: pending.name,
            email: pending.email,
            phone: pending.phone,
            role: pending.role,
            password_hash: pending.password_hash,
        };
        let created = self.users.create_user(&new_user).await?;
        self.otps.remove(&email).await?;
        let user = created.ok_or_else(|| ServiceError::validation("Email already registered"))?;
        tracing::info!(user_id = %user.id, role = %user.role, "user_registered");
        Ok(user)
    }
}
