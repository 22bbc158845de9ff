use actix_web::HttpResponse;
use utoipa::OpenApi;

/// OpenAPI 文档聚合
///
/// 文档本体以 JSON 形式在 /api-doc/openapi.json 提供
/// The document itself is served as JSON at /api-doc/openapi.json.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::rbac::controller::list_policies,
        crate::modules::rbac::controller::list_plugins,
        crate::modules::rbac::controller::list_permissions,
        crate::modules::rbac::controller::health,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::register_user,
    ),
    components(schemas(
        crate::modules::rbac::models::Effect,
        crate::modules::rbac::models::PolicyRecord,
        crate::modules::rbac::models::PermissionDescriptor,
        crate::modules::rbac::models::PluginRecord,
        crate::modules::rbac::models::PermissionRecord,
        crate::modules::rbac::controller::PolicyListResponse,
        crate::modules::rbac::controller::HealthResponse,
        crate::modules::users::models::UserRecord,
        crate::modules::users::controller::RegisterRequest,
        crate::modules::users::controller::RegisteredUser,
        crate::modules::users::controller::RegisterResponse,
        crate::modules::users::controller::UserListResponse,
    )),
    tags(
        (name = "rbac", description = "静态策略/插件/权限目录与健康检查"),
        (name = "users", description = "内存用户注册表")
    )
)]
pub struct ApiDoc;

/// 提供 OpenAPI 文档
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
