/// Users 模块
/// 内存用户注册表：列表与注册两个操作
pub mod controller;
pub mod models;
pub mod registry;
pub mod routes;

/// 注册users模块的路由
pub fn register_user_routes() {
    crate::register_routes!((
        "users",
        "用户列表与注册 / user listing and registration",
        "users",
        routes::user_paths(),
        routes::configure
    ),);
}
