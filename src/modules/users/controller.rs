use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::models::UserRecord;
use super::registry::UserRegistry;
use crate::error::{AppError, AppResult};

/// 注册请求体；role 缺省为 "user"
/// Registration payload; role defaults to "user".
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// 注册成功响应中的用户投影（有意不含 createdAt）
/// User projection in the 201 payload (createdAt intentionally omitted).
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: RegisteredUser,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserRecord>,
}

/// 获取用户列表
#[utoipa::path(
    get,
    path = "/api/rbac/users",
    tag = "users",
    responses((status = 200, description = "全部用户 / all registered users", body = UserListResponse))
)]
pub async fn list_users(registry: web::Data<UserRegistry>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserListResponse {
        users: registry.list(),
    }))
}

/// 注册新用户
///
/// 只做存在性校验，其余输入原样接受（mock 行为）
/// Presence checks only, anything else is accepted as-is (mock behavior).
#[utoipa::path(
    post,
    path = "/api/rbac/users/register",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "注册成功 / registered", body = RegisterResponse),
        (status = 400, description = "缺少用户名或邮箱 / username or email missing"),
        (status = 409, description = "用户名或邮箱已存在 / duplicate username or email")
    )
)]
pub async fn register_user(
    registry: web::Data<UserRegistry>,
    payload: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = payload.into_inner();

    // 空字符串与缺失字段同样视为未提供 / empty strings count as missing
    let (username, email) = match (req.username.as_deref(), req.email.as_deref()) {
        (Some(username), Some(email)) if !username.is_empty() && !email.is_empty() => {
            (username, email)
        }
        _ => return Err(AppError::validation("Username and email are required")),
    };
    let role = req.role.as_deref().unwrap_or("user");

    let record = registry.register(username, email, role)?;
    tracing::info!("registered user {} ({})", record.username, record.id);

    Ok(HttpResponse::Created().json(RegisterResponse {
        success: true,
        message: "User registered successfully".to_string(),
        user: RegisteredUser {
            id: record.id,
            username: record.username,
            email: record.email,
            role: record.role,
        },
    }))
}
