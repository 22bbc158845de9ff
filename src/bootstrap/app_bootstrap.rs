use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::{error, info};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

use crate::comm::port::is_port_available_sync;
use crate::error::{AppError, AppResult};
use crate::middleware::cors::CorsMiddleware;
use crate::modules::rbac::catalog::CatalogStore;
use crate::modules::users::registry::UserRegistry;
use crate::route_registry::{configure_global_routes, not_found, print_global_routes_info};

/// 应用配置结构体
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: None,
            debug: false,
        }
    }
}

/// 应用启动器
pub struct AppBootstrap {
    config: Option<AppConfig>,
}

impl AppBootstrap {
    /// 创建新的应用启动器
    pub fn new() -> Self {
        Self { config: None }
    }

    /// 设置配置
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// 设置端口
    pub fn with_port(mut self, port: u16) -> Self {
        let mut config = self.config.unwrap_or_default();
        config.port = port;
        self.config = Some(config);
        self
    }

    /// 运行应用服务器
    pub async fn run(self) -> AppResult<()> {
        let config = self.config.clone().unwrap_or_default();

        // 初始化日志
        let default_level = if config.debug { "debug" } else { "info" };
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let formatting_layer = BunyanFormattingLayer::new("v-rbac-mock".into(), std::io::stdout);
        let subscriber = Registry::default()
            .with(env_filter)
            .with(JsonStorageLayer)
            .with(formatting_layer);
        tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

        info!(
            "starting {} v{} on {}-{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH
        );
        info!("启动应用服务器，配置: {:?}", config);

        // 绑定前诊断：端口占用是致命错误，与请求期错误分开记录
        // Pre-bind diagnostic: a taken port is fatal and logged distinctly
        // from per-request errors.
        if !is_port_available_sync(&config.host, config.port) {
            error!(
                "Port {} is already in use. Please stop other processes using this port.",
                config.port
            );
            return Err(AppError::Internal(anyhow::anyhow!(
                "port {} already in use",
                config.port
            )));
        }

        self.start_http_server(config).await
    }

    /// 启动HTTP服务器
    async fn start_http_server(&self, config: AppConfig) -> AppResult<()> {
        // 种子数据只构建一次，以应用状态注入处理器
        // Stores are seeded once and injected as app state.
        let catalog = web::Data::new(CatalogStore::seed());
        let registry = web::Data::new(UserRegistry::seed());

        print_global_routes_info();

        let addr = format!("{}:{}", config.host, config.port);
        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                // CORS 在最外层：预检请求不进入路由 / CORS sits outermost so
                // preflights never reach routing
                .wrap(CorsMiddleware::permissive())
                .app_data(catalog.clone())
                .app_data(registry.clone())
                .route(
                    "/api-doc/openapi.json",
                    web::get().to(crate::api::swagger::openapi_json),
                )
                .configure(configure_global_routes)
                .default_service(web::route().to(not_found))
        });
        if let Some(workers) = config.workers {
            server = server.workers(workers);
        }

        info!("starting http server: bind={}", addr);
        server
            .bind(&addr)
            .map_err(|e| {
                error!("服务器绑定失败 / failed to bind {}: {}", addr, e);
                AppError::Internal(anyhow::Error::new(e))
            })?
            .run()
            .await
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

        info!("服务器已关闭 / server shut down");
        Ok(())
    }
}

impl Default for AppBootstrap {
    fn default() -> Self {
        Self::new()
    }
}
