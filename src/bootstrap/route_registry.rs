use actix_web::{web, HttpRequest, HttpResponse};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::AppError;

/// 路由配置函数类型
pub type RouteConfigFn = fn(&mut web::ServiceConfig);

/// 路由信息结构
///
/// paths 列出该逻辑路由的全部挂载点（规范路径在前，别名在后），
/// 处理器本身由 config_fn 挂载
/// `paths` lists every mount point of the logical route (canonical first,
/// aliases after); `config_fn` does the actual mounting.
#[derive(Debug, Clone)]
pub struct RouteInfo {
    pub name: String,
    pub description: String,
    pub module: String,
    pub paths: Vec<String>,
    pub config_fn: RouteConfigFn,
}

/// 全局路由注册器
#[derive(Debug)]
pub struct RouteRegistry {
    routes: HashMap<String, RouteInfo>,
}

impl RouteRegistry {
    /// 创建新的路由注册器
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// 注册路由
    pub fn register_route(&mut self, route_info: RouteInfo) {
        self.routes.insert(route_info.name.clone(), route_info);
    }

    /// 获取所有路由
    pub fn get_routes(&self) -> &HashMap<String, RouteInfo> {
        &self.routes
    }

    /// 配置所有路由到 ServiceConfig
    pub fn configure_all_routes(&self, cfg: &mut web::ServiceConfig) {
        for route_info in self.routes.values() {
            (route_info.config_fn)(cfg);
        }
    }

    /// 获取路由统计信息
    pub fn get_stats(&self) -> (usize, usize) {
        let logical = self.routes.len();
        let mounted = self.routes.values().map(|r| r.paths.len()).sum();
        (logical, mounted)
    }

    /// 打印路由信息
    pub fn print_routes_info(&self) {
        let mut names: Vec<&String> = self.routes.keys().collect();
        names.sort();

        tracing::info!("Available endpoints:");
        for name in names {
            let route = &self.routes[name];
            for path in &route.paths {
                tracing::info!("  {} ({})", path, route.module);
            }
        }

        let (logical, mounted) = self.get_stats();
        tracing::info!("{} logical routes, {} mount points", logical, mounted);
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// 全局路由注册器实例
lazy_static! {
    static ref GLOBAL_ROUTE_REGISTRY: RwLock<RouteRegistry> = RwLock::new(RouteRegistry::new());
}

/// 注册路由到全局注册器
pub fn register_global_route(route_info: RouteInfo) {
    GLOBAL_ROUTE_REGISTRY.write().unwrap().register_route(route_info);
}

/// 配置所有全局路由
pub fn configure_global_routes(cfg: &mut web::ServiceConfig) {
    GLOBAL_ROUTE_REGISTRY.read().unwrap().configure_all_routes(cfg);
}

/// 打印全局路由信息
pub fn print_global_routes_info() {
    GLOBAL_ROUTE_REGISTRY.read().unwrap().print_routes_info();
}

/// 获取全局路由统计信息
pub fn get_global_routes_stats() -> (usize, usize) {
    GLOBAL_ROUTE_REGISTRY.read().unwrap().get_stats()
}

/// 未匹配路由的默认处理器 / default handler for unmatched routes
///
/// 404 响应体携带被请求的路径 / the body carries the requested path
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(req.path()))
}

/// 便捷宏：注册路由
#[macro_export]
macro_rules! register_route {
    ($name:expr, $description:expr, $module:expr, $paths:expr, $config_fn:expr) => {
        $crate::route_registry::register_global_route($crate::route_registry::RouteInfo {
            name: $name.to_string(),
            description: $description.to_string(),
            module: $module.to_string(),
            paths: $paths,
            config_fn: $config_fn,
        });
    };
}

/// 便捷宏：批量注册路由
#[macro_export]
macro_rules! register_routes {
    ($(($name:expr, $description:expr, $module:expr, $paths:expr, $config_fn:expr)),* $(,)?) => {
        $(
            $crate::register_route!($name, $description, $module, $paths, $config_fn);
        )*
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_not_found_body_contains_path() {
        let app = test::init_service(
            App::new().default_service(web::route().to(not_found)),
        )
        .await;

        let req = test::TestRequest::get().uri("/does-not-exist").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["path"], "/does-not-exist");
    }

    #[::core::prelude::v1::test]
    fn test_registry_counts_mount_points() {
        fn noop(_cfg: &mut web::ServiceConfig) {}

        let mut registry = RouteRegistry::new();
        registry.register_route(RouteInfo {
            name: "a".to_string(),
            description: String::new(),
            module: "m".to_string(),
            paths: vec!["/api/rbac/a".to_string(), "/a".to_string()],
            config_fn: noop,
        });
        registry.register_route(RouteInfo {
            name: "b".to_string(),
            description: String::new(),
            module: "m".to_string(),
            paths: vec!["/b".to_string()],
            config_fn: noop,
        });

        assert_eq!(registry.get_stats(), (2, 3));
    }
}
