use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    http::Method,
    Error, HttpResponse,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use tracing::debug;

/// CORS配置
///
/// 默认值即调试用的全放行配置 / the default is the fully permissive
/// debugging setup the mock is expected to run with.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// 允许的来源
    pub allow_origin: String,
    /// 允许的方法
    pub allow_methods: String,
    /// 允许的请求头
    pub allow_headers: String,
    /// 是否允许携带凭证（使用 * 来源时必须为 false）
    /// must stay "false" while the origin is "*"
    pub allow_credentials: String,
    /// 预检结果缓存时长（秒）
    pub max_age: u32,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET, POST, PUT, DELETE, OPTIONS".to_string(),
            allow_headers: "Origin, X-Requested-With, Content-Type, Accept, Authorization"
                .to_string(),
            allow_credentials: "false".to_string(),
            max_age: 86400,
        }
    }
}

/// CORS中间件
///
/// 在路由之前处理每个请求：为所有响应注入跨域头，
/// OPTIONS 预检请求直接以 200 空响应短路，不进入内层服务
/// Runs ahead of routing: injects the CORS headers on every response and
/// short-circuits OPTIONS preflights with an empty 200 without ever
/// calling the inner service.
pub struct CorsMiddleware {
    config: CorsConfig,
}

impl CorsMiddleware {
    pub fn new(config: CorsConfig) -> Self {
        Self { config }
    }

    /// 全放行配置的便捷构造
    pub fn permissive() -> Self {
        Self::new(CorsConfig::default())
    }

    /// 添加跨域响应头
    fn add_cors_headers(response: &mut ServiceResponse, config: &CorsConfig) {
        let headers = response.headers_mut();
        let pairs = [
            ("access-control-allow-origin", config.allow_origin.as_str()),
            ("access-control-allow-methods", config.allow_methods.as_str()),
            ("access-control-allow-headers", config.allow_headers.as_str()),
            (
                "access-control-allow-credentials",
                config.allow_credentials.as_str(),
            ),
        ];
        for (name, value) in pairs {
            if let Ok(value) = HeaderValue::from_str(value) {
                headers.insert(HeaderName::from_static(name), value);
            }
        }
        headers.insert(
            HeaderName::from_static("access-control-max-age"),
            HeaderValue::from(config.max_age),
        );
    }
}

impl<S, B> Transform<S, ServiceRequest> for CorsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = CorsMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsMiddlewareService {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct CorsMiddlewareService<S> {
    service: Rc<S>,
    config: CorsConfig,
}

impl<S, B> Service<ServiceRequest> for CorsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let config = self.config.clone();

        Box::pin(async move {
            let method = req.method().clone();
            let path = req.path().to_string();
            let origin = req
                .headers()
                .get("origin")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("none")
                .to_string();

            debug!("CORS headers set for {} {} - Origin: {}", method, path, origin);

            // 预检请求：立即返回 200 空响应，跳过路由
            // Preflight: answer immediately, routing is skipped.
            if method == Method::OPTIONS {
                debug!("Handling OPTIONS preflight request: {}", path);
                let mut response = req
                    .into_response(HttpResponse::Ok().finish())
                    .map_into_boxed_body();
                CorsMiddleware::add_cors_headers(&mut response, &config);
                return Ok(response);
            }

            let mut response = service.call(req).await?.map_into_boxed_body();
            CorsMiddleware::add_cors_headers(&mut response, &config);
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn counting_handler(hits: web::Data<Arc<AtomicUsize>>) -> HttpResponse {
        hits.fetch_add(1, Ordering::SeqCst);
        HttpResponse::Ok().json(serde_json::json!({"message": "success"}))
    }

    #[actix_web::test]
    async fn test_cors_headers_on_normal_response() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = test::init_service(
            App::new()
                .wrap(CorsMiddleware::permissive())
                .app_data(web::Data::new(hits.clone()))
                .route("/test", web::get().to(counting_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/test").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(
            resp.headers()
                .get("access-control-allow-credentials")
                .unwrap(),
            "false"
        );
        assert_eq!(resp.headers().get("access-control-max-age").unwrap(), "86400");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_preflight_short_circuits_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = test::init_service(
            App::new()
                .wrap(CorsMiddleware::permissive())
                .app_data(web::Data::new(hits.clone()))
                .route("/test", web::get().to(counting_handler)),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/test")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        // 处理器不应被调用 / the resource handler must not run
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let body = test::read_body(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_preflight_for_unknown_path_still_ok() {
        let app = test::init_service(App::new().wrap(CorsMiddleware::permissive())).await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/anything/at/all")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
    }
}
