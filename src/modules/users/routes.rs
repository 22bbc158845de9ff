use actix_web::web;

use super::controller;

// 用户端点只存在带前缀的形态，没有裸别名
// User endpoints only exist in their prefixed form, no bare alias.
pub const USERS_PATH: &str = "/api/rbac/users";
pub const REGISTER_PATH: &str = "/api/rbac/users/register";

/// 注册用户注册表路由
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(USERS_PATH, web::get().to(controller::list_users));
    cfg.route(REGISTER_PATH, web::post().to(controller::register_user));
}

/// 用户路由的全部挂载点
pub fn user_paths() -> Vec<String> {
    vec![USERS_PATH.to_string(), REGISTER_PATH.to_string()]
}
