pub mod api;
pub mod comm;
pub mod error;
pub mod middleware;
#[path = "bootstrap/app_bootstrap.rs"]
pub mod app_bootstrap;
#[path = "bootstrap/command_registry.rs"]
pub mod command_registry;
#[path = "bootstrap/route_registry.rs"]
pub mod route_registry;

// Modules
pub mod modules;

/// 初始化所有模块的命令
pub fn init_commands() {
    // 注册rbac模块的命令
    modules::rbac::register_rbac_commands();
}

/// 初始化所有模块的路由
pub fn init_routes() {
    // 注册rbac模块的路由
    modules::rbac::register_rbac_routes();

    // 注册users模块的路由
    modules::users::register_user_routes();
}

// Re-export bootstrap modules
pub use app_bootstrap::*;
pub use command_registry::*;
pub use route_registry::*;
