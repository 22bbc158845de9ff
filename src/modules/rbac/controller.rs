use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::modules::rbac::catalog::CatalogStore;
use crate::modules::rbac::models::{PermissionRecord, PluginRecord, PolicyRecord};
use crate::modules::users::registry::UserRegistry;

/// 策略列表响应：所有别名路径统一使用 data 包装
/// Policies list response: the `{data: [...]}` wrapper, on every alias.
#[derive(Debug, Serialize, ToSchema)]
pub struct PolicyListResponse {
    pub data: Vec<PolicyRecord>,
}

/// 健康检查响应
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    /// 当前注册表中的用户数 / current user count
    pub users: usize,
    pub timestamp: String,
}

/// 获取策略列表
#[utoipa::path(
    get,
    path = "/api/rbac/policies",
    tag = "rbac",
    responses((status = 200, description = "策略目录 / seeded policy catalog", body = PolicyListResponse))
)]
pub async fn list_policies(catalog: web::Data<CatalogStore>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(PolicyListResponse {
        data: catalog.policies().to_vec(),
    }))
}

/// 获取插件列表
#[utoipa::path(
    get,
    path = "/api/rbac/plugins",
    tag = "rbac",
    responses((status = 200, description = "插件目录 / seeded plugin catalog", body = [PluginRecord]))
)]
pub async fn list_plugins(catalog: web::Data<CatalogStore>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(catalog.plugins()))
}

/// 获取权限列表
#[utoipa::path(
    get,
    path = "/api/rbac/permissions",
    tag = "rbac",
    responses((status = 200, description = "权限目录 / seeded permission catalog", body = [PermissionRecord]))
)]
pub async fn list_permissions(catalog: web::Data<CatalogStore>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(catalog.permissions()))
}

/// 健康检查
#[utoipa::path(
    get,
    path = "/api/rbac/health",
    tag = "rbac",
    responses((status = 200, description = "服务状态 / service status", body = HealthResponse))
)]
pub async fn health(registry: web::Data<UserRegistry>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        message: "RBAC API Server is running".to_string(),
        users: registry.count(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
