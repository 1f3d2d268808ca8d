use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::otp_sender::OtpSender;
use crate::application::ports::otp_store::{OtpStore, PendingRegistration};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::{otp, passwords, validation};
use crate::domain::users::user::{Role, normalize_email};

pub struct SendRegistrationOtp<'a, U, O, M>
where
    U: UserRepository + ?Sized,
    O: OtpStore + ?Sized,
    M: OtpSender + ?Sized,
{
    pub users: &'a U,
    pub otps: &'a O,
    pub mailer: &'a M,
    pub admin_secret: Option<&'a str>,
    pub ttl: chrono::Duration,
}

#[derive(Debug, Clone, Default)]
pub struct SendOtpRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub admin_key: Option<String>,
}

impl<'a, U, O, M> SendRegistrationOtp<'a, U, O, M>
where
    U: UserRepository + ?Sized,
    O: OtpStore + ?Sized,
    M: OtpSender + ?Sized,
{
    pub async fn execute(&self, req: &SendOtpRequest) -> ServiceResult<()> {
        let name = validation::non_blank(req.name.clone());
        let email = validation::non_blank(req.email.clone());
        let role = validation::non_blank(req.role.clone());
        let password = req.password.clone().filter(|p| !p.is_empty());
        let (Some(name), Some(email), Some(password), Some(role)) = (name, email, password, role)
        else {
            return Err(ServiceError::validation(
                "Name, email, password, and role are required",
            ));
        };

        let role: Role = role
            .parse()
            .map_err(|_| ServiceError::validation("Invalid role selected"))?;

        if role == Role::Admin {
            let key = req
                .admin_key
                .as_deref()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| ServiceError::validation("Admin key is required"))?;
            if self.admin_secret != Some(key) {
                return Err(ServiceError::forbidden("Invalid admin key"));
            }
        }

        let email = normalize_email(&email);
        if !validation::is_valid_email(&email) {
            return Err(ServiceError::validation("Invalid email address"));
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::validation("Email already registered"));
        }

        let code = otp::generate_otp();
        let pending = PendingRegistration {
            otp: code.clone(),
            name,
            email: email.clone(),
            phone: validation::non_blank(req.phone.clone()),
            role,
            password_hash: passwords::hash_password(&password)?,
            expires_at: chrono::Utc::now() + self.ttl,
        };
        self.otps.put(pending).await?;

        self.mailer
            .send_otp(&email, &code)
            .await
            .map_err(|e| ServiceError::Internal(e.context("failed to send OTP email")))?;
        tracing::info!(email = %email, role = %role, "registration_otp_issued");
        Ok(())
    }
}
