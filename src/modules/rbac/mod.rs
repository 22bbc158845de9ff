/// RBAC 模块
/// 静态策略/插件/权限目录与健康检查
pub mod catalog;
pub mod cmd;
pub mod controller;
pub mod models;
pub mod routes;

pub use cmd::register_rbac_commands;

/// 注册RBAC模块的路由
pub fn register_rbac_routes() {
    crate::register_routes!(
        (
            "rbac_catalog",
            "策略/插件/权限静态目录 / static policy, plugin and permission catalogs",
            "rbac",
            routes::catalog_paths(),
            routes::configure_catalog
        ),
        (
            "rbac_health",
            "健康检查 / health check with running user count",
            "rbac",
            routes::health_paths(),
            routes::configure_health
        ),
    );
}
