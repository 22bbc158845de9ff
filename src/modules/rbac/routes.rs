use actix_web::web;

use super::controller;

// 路由别名表：每个逻辑端点同时挂载在带 /api/rbac 前缀的规范路径和裸别名上，
// 处理器只有一份，杜绝按路径复制处理逻辑
// Alias table: one logical endpoint is mounted on the canonical prefixed
// path and on its bare alias; the handler body exists exactly once.
pub const HEALTH_PATHS: [&str; 2] = ["/api/rbac/health", "/health"];
pub const POLICY_PATHS: [&str; 2] = ["/api/rbac/policies", "/policies"];
pub const PLUGIN_PATHS: [&str; 2] = ["/api/rbac/plugins", "/plugins"];
pub const PERMISSION_PATHS: [&str; 2] = ["/api/rbac/permissions", "/permissions"];

/// 注册静态目录路由 / mount the catalog endpoints on every alias
pub fn configure_catalog(cfg: &mut web::ServiceConfig) {
    for path in POLICY_PATHS {
        cfg.route(path, web::get().to(controller::list_policies));
    }
    for path in PLUGIN_PATHS {
        cfg.route(path, web::get().to(controller::list_plugins));
    }
    for path in PERMISSION_PATHS {
        cfg.route(path, web::get().to(controller::list_permissions));
    }
}

/// 注册健康检查路由
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    for path in HEALTH_PATHS {
        cfg.route(path, web::get().to(controller::health));
    }
}

/// 目录路由的全部挂载点（供路由注册器展示）
/// every mount point, for the route registry listing
pub fn catalog_paths() -> Vec<String> {
    POLICY_PATHS
        .iter()
        .chain(PLUGIN_PATHS.iter())
        .chain(PERMISSION_PATHS.iter())
        .map(|p| p.to_string())
        .collect()
}

pub fn health_paths() -> Vec<String> {
    HEALTH_PATHS.iter().map(|p| p.to_string()).collect()
}
