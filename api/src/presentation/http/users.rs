use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::users::create_user::{CreateUser, CreateUserRequest};
use crate::application::use_cases::users::delete_user::DeleteUser;
use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::list_users::ListUsers;
use crate::application::use_cases::users::toggle_ban::ToggleBan;
use crate::application::use_cases::users::update_user::{UpdateUser, UpdateUserRequest};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::{Role, User};
use crate::presentation::http::auth::CurrentUser;
use crate::presentation::http::error::{ApiJson, ApiPath, ApiResult};
use crate::presentation::http::responses::{Envelope, MessageResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_banned: bool,
    pub profile_photo: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            role: u.role,
            is_banned: u.is_banned,
            profile_photo: u.profile_photo,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateUserBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    #[serde(alias = "isBanned")]
    pub is_banned: Option<bool>,
    #[serde(alias = "profilePhoto")]
    pub profile_photo: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/ban", patch(toggle_ban))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/users", tag = "Users", responses(
    (status = 200, body = UserListEnvelope),
    (status = 403, body = MessageResponse)
))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    current: CurrentUser,
) -> ApiResult<Json<Envelope<Vec<UserResponse>>>> {
    let repo = ctx.user_repo();
    let uc = ListUsers {
        repo: repo.as_ref(),
    };
    let users = uc.execute(&current.actor()).await?;
    Ok(Json(Envelope::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, body = UserEnvelope), (status = 404, body = MessageResponse)))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Envelope<UserResponse>>> {
    let repo = ctx.user_repo();
    let uc = GetUser {
        repo: repo.as_ref(),
    };
    let user = uc.execute(&current.actor(), id).await?;
    Ok(Json(Envelope::new(user.into())))
}

#[utoipa::path(post, path = "/api/users", tag = "Users", request_body = CreateUserBody, responses(
    (status = 201, body = UserEnvelope),
    (status = 400, body = MessageResponse)
))]
pub async fn create_user(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiJson(body): ApiJson<CreateUserBody>,
) -> ApiResult<(StatusCode, Json<Envelope<UserResponse>>)> {
    let repo = ctx.user_repo();
    let uc = CreateUser {
        repo: repo.as_ref(),
    };
    let dto = CreateUserRequest {
        name: body.name,
        email: body.email,
        password: body.password,
        phone: body.phone,
        role: body.role,
    };
    let user = uc.execute(&current.actor(), &dto).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(user.into()))))
}

#[utoipa::path(put, path = "/api/users/{id}", tag = "Users", request_body = UpdateUserBody,
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, body = UserEnvelope), (status = 404, body = MessageResponse)))]
pub async fn update_user(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateUserBody>,
) -> ApiResult<Json<Envelope<UserResponse>>> {
    let repo = ctx.user_repo();
    let uc = UpdateUser {
        repo: repo.as_ref(),
    };
    let dto = UpdateUserRequest {
        name: body.name,
        email: body.email,
        phone: body.phone,
        role: body.role,
        is_banned: body.is_banned,
        profile_photo: body.profile_photo,
    };
    let user = uc.execute(&current.actor(), id, &dto).await?;
    Ok(Json(Envelope::new(user.into())))
}

#[utoipa::path(delete, path = "/api/users/{id}", tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, body = MessageResponse), (status = 404, body = MessageResponse)))]
pub async fn delete_user(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let repo = ctx.user_repo();
    let uc = DeleteUser {
        repo: repo.as_ref(),
    };
    uc.execute(&current.actor(), id).await?;
    Ok(Json(MessageResponse::ok("User deleted")))
}

#[utoipa::path(patch, path = "/api/users/{id}/ban", tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, body = UserEnvelope), (status = 404, body = MessageResponse)))]
pub async fn toggle_ban(
    State(ctx): State<AppContext>,
    current: CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Envelope<UserResponse>>> {
    let repo = ctx.user_repo();
    let uc = ToggleBan {
        repo: repo.as_ref(),
    };
    let user = uc.execute(&current.actor(), id).await?;
    Ok(Json(Envelope::new(user.into())))
}
