use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{HeaderMap, HeaderValue, header, request::Parts},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::access::Actor;
use crate::application::error::ServiceError;
use crate::application::use_cases::auth::forgot_password::ForgotPassword;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::reset_password::ResetPassword;
use crate::application::use_cases::auth::send_otp::{SendOtpRequest, SendRegistrationOtp};
use crate::application::use_cases::auth::update_profile::{UpdateProfile, UpdateProfileRequest};
use crate::application::use_cases::auth::verify_otp::VerifyRegistrationOtp;
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::users::user::User;
use crate::presentation::http::error::{ApiError, ApiJson, ApiResult};
use crate::presentation::http::responses::MessageResponse;
use crate::presentation::http::users::UserResponse;

pub const SESSION_COOKIE: &str = "token";

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SendOtpBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "adminKey", alias = "admin_key")]
    pub admin_key: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VerifyOtpBody {
    pub email: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
    pub access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub success: bool,
    pub user: UserResponse,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileBody {
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "profilePhoto")]
    pub profile_photo: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "oldPassword", alias = "old_password")]
    pub old_password: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ForgotPasswordBody {
    pub email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ForgotPasswordResponse {
    pub success: bool,
    pub message: String,
    pub reset_token: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ResetPasswordBody {
    pub token: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .route("/me", get(me).put(update_me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/users/send-otp", tag = "Auth", request_body = SendOtpBody, security(()), responses(
    (status = 200, body = MessageResponse),
    (status = 400, body = MessageResponse),
    (status = 403, body = MessageResponse)
))]
pub async fn send_otp(
    State(ctx): State<AppContext>,
    ApiJson(body): ApiJson<SendOtpBody>,
) -> ApiResult<Json<MessageResponse>> {
    let users = ctx.user_repo();
    let otps = ctx.otp_store();
    let mailer = ctx.otp_sender();
    let uc = SendRegistrationOtp {
        users: users.as_ref(),
        otps: otps.as_ref(),
        mailer: mailer.as_ref(),
        admin_secret: ctx.cfg.admin_secret_key.as_deref(),
        ttl: ctx.cfg.otp_ttl(),
    };
    let dto = SendOtpRequest {
        name: body.name,
        email: body.email,
        password: body.password,
        phone: body.phone,
        role: body.role,
        admin_key: body.admin_key,
    };
    uc.execute(&dto).await?;
    Ok(Json(MessageResponse::ok("OTP sent to your email")))
}

#[utoipa::path(post, path = "/api/users/verify-otp", tag = "Auth", request_body = VerifyOtpBody, security(()), responses(
    (status = 200, body = VerifyOtpResponse),
    (status = 400, body = MessageResponse),
    (status = 404, body = MessageResponse)
))]
pub async fn verify_otp(
    State(ctx): State<AppContext>,
    ApiJson(body): ApiJson<VerifyOtpBody>,
) -> ApiResult<Json<VerifyOtpResponse>> {
    let users = ctx.user_repo();
    let otps = ctx.otp_store();
    let uc = VerifyRegistrationOtp {
        users: users.as_ref(),
        otps: otps.as_ref(),
    };
    let user = uc
        .execute(
            body.email.as_deref().unwrap_or_default(),
            body.otp.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(VerifyOtpResponse {
        success: true,
        message: "Account created successfully".into(),
        user: user.into(),
    }))
}

#[utoipa::path(post, path = "/api/users/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse),
    (status = 400, body = MessageResponse),
    (status = 403, body = MessageResponse),
    (status = 404, body = MessageResponse)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<(HeaderMap, Json<LoginResponse>)> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    };
    let user = uc.execute(&dto).await?;
    let token = issue_token(&ctx.cfg, user.id)?;

    let mut headers = HeaderMap::new();
    let cookie = build_session_cookie(&token, ctx.cfg.jwt_expires_secs, ctx.cfg.is_production);
    headers.insert(header::SET_COOKIE, cookie_header(&cookie)?);
    tracing::info!(user_id = %user.id, "user_logged_in");

    Ok((
        headers,
        Json(LoginResponse {
            success: true,
            message: "Logged in successfully".into(),
            user: user.into(),
            access_token: token,
        }),
    ))
}

#[utoipa::path(post, path = "/api/users/logout", tag = "Auth", security(()), responses((status = 200, body = MessageResponse)))]
pub async fn logout(
    State(ctx): State<AppContext>,
) -> ApiResult<(HeaderMap, Json<MessageResponse>)> {
    let mut headers = HeaderMap::new();
    let cookie = build_session_cookie("", 0, ctx.cfg.is_production);
    headers.insert(header::SET_COOKIE, cookie_header(&cookie)?);
    Ok((headers, Json(MessageResponse::ok("Logged out successfully"))))
}

#[utoipa::path(post, path = "/api/users/forgot-password", tag = "Auth", request_body = ForgotPasswordBody, security(()), responses(
    (status = 200, body = ForgotPasswordResponse),
    (status = 404, body = MessageResponse)
))]
pub async fn forgot_password(
    State(ctx): State<AppContext>,
    ApiJson(body): ApiJson<ForgotPasswordBody>,
) -> ApiResult<Json<ForgotPasswordResponse>> {
    let repo = ctx.user_repo();
    let uc = ForgotPassword {
        repo: repo.as_ref(),
        ttl: ctx.cfg.reset_token_ttl(),
    };
    let reset_token = uc.execute(body.email.as_deref().unwrap_or_default()).await?;
    Ok(Json(ForgotPasswordResponse {
        success: true,
        message: "Reset token generated".into(),
        reset_token,
    }))
}

#[utoipa::path(post, path = "/api/users/reset-password", tag = "Auth", request_body = ResetPasswordBody, security(()), responses(
    (status = 200, body = MessageResponse),
    (status = 400, body = MessageResponse)
))]
pub async fn reset_password(
    State(ctx): State<AppContext>,
    ApiJson(body): ApiJson<ResetPasswordBody>,
) -> ApiResult<Json<MessageResponse>> {
    let repo = ctx.user_repo();
    let uc = ResetPassword {
        repo: repo.as_ref(),
    };
    uc.execute(
        body.token.as_deref().unwrap_or_default(),
        body.password.as_deref().unwrap_or_default(),
    )
    .await?;
    Ok(Json(MessageResponse::ok("Password reset successful")))
}

#[utoipa::path(get, path = "/api/users/me", tag = "Auth", responses(
    (status = 200, body = MeResponse),
    (status = 401, body = MessageResponse)
))]
pub async fn me(
    State(ctx): State<AppContext>,
    current: CurrentUser,
) -> ApiResult<Json<MeResponse>> {
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let user = uc.execute(current.0.id).await?;
    Ok(Json(MeResponse {
        success: true,
        user: user.into(),
    }))
}

#[utoipa::path(put, path = "/api/users/me", tag = "Auth", request_body = UpdateProfileBody, responses(
    (status = 200, body = MeResponse),
    (status = 400, body = MessageResponse)
))]
pub async fn update_me(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiJson(body): ApiJson<UpdateProfileBody>,
) -> ApiResult<Json<MeResponse>> {
    let repo = ctx.user_repo();
    let uc = UpdateProfile {
        repo: repo.as_ref(),
    };
    let dto = UpdateProfileRequest {
        name: body.name,
        phone: body.phone,
        profile_photo: body.profile_photo,
        password: body.password,
        old_password: body.old_password,
    };
    let user = uc.execute(current.0.id, &dto).await?;
    Ok(Json(MeResponse {
        success: true,
        user: user.into(),
    }))
}

// --- Bearer extractor & JWT utils ---

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(t) = auth.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty()) {
                return Ok(Bearer(t.to_string()));
            }
        }

        if let Some(cookie_hdr) = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(token) = get_cookie(cookie_hdr, SESSION_COOKIE).filter(|t| !t.is_empty()) {
                return Ok(Bearer(token));
            }
        }

        Err(ApiError::unauthorized("Not authorized, no token"))
    }
}

pub fn issue_token(cfg: &Config, user_id: Uuid) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now.saturating_add(cfg.jwt_expires_secs.max(0) as usize),
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<Uuid, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::unauthorized("Not authorized, token failed"))?;
    Uuid::parse_str(&data.claims.sub)
        .map_err(|_| ApiError::unauthorized("Not authorized, token failed"))
}

/// The authenticated, non-banned caller.
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn actor(&self) -> Actor {
        Actor::from(&self.0)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppContext> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let bearer = Bearer::from_request_parts(parts, ctx).await?;
        let user_id = validate_bearer(&ctx.cfg, bearer)?;
        let user = ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Not authorized, user not found"))?;
        if user.is_banned {
            return Err(ApiError::forbidden("Account banned"));
        }
        Ok(CurrentUser(user))
    }
}

/// Caller identity on public routes; anonymous when no usable token is sent.
pub struct MaybeActor(pub Option<Actor>);

#[axum::async_trait]
impl FromRequestParts<AppContext> for MaybeActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        match CurrentUser::from_request_parts(parts, ctx).await {
            Ok(current) => Ok(MaybeActor(Some(current.actor()))),
            Err(ApiError(ServiceError::Internal(e))) => Err(ApiError::from(e)),
            Err(_) => Ok(MaybeActor(None)),
        }
    }
}

// --- Cookie helpers ---

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

// Cross-site frontends in production need SameSite=None, which browsers only accept with Secure
fn build_session_cookie(token: &str, max_age_secs: i64, production: bool) -> String {
    let same_site = if production {
        "SameSite=None; Secure"
    } else {
        "SameSite=Lax"
    };
    format!(
        "{SESSION_COOKIE}={}; HttpOnly; Path=/; Max-Age={}; {same_site}",
        token,
        max_age_secs.max(0)
    )
}

fn cookie_header(cookie: &str) -> anyhow::Result<HeaderValue> {
    Ok(HeaderValue::from_str(cookie)?)
}
