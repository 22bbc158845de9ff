use clap::ArgMatches;
use std::error::Error;

use v_rbac_mock::comm::config::get_global_config_manager;
use v_rbac_mock::{build_app, handle_command, init_commands, init_routes, AppBootstrap, AppConfig};

mod cmd {
    #[path = "../cmd/version.rs"]
    pub mod version;
    pub use version::*;
}

use cmd::handle_version_command;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 初始化所有模块的命令
    init_commands();

    // 构建命令行应用
    let matches: ArgMatches = build_app().get_matches();

    match matches.subcommand() {
        Some(("server", sub_matches)) => {
            handle_server_command(sub_matches).await?;
        }
        Some(("version", _)) => {
            handle_version_command();
        }
        Some((command_name, sub_matches)) => {
            // 尝试使用模块处理命令
            if let Err(e) = handle_command(command_name, sub_matches) {
                eprintln!("处理命令 '{}' 时出错: {}", command_name, e);
                std::process::exit(1);
            }
        }
        _ => {
            // 这种情况不应该发生，因为我们设置了 subcommand_required(true)
            eprintln!("未知命令，请使用 --help 查看可用命令");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn handle_server_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    // 初始化路由
    init_routes();

    // 配置管理器：文件 + RBAC_* 环境变量
    let config_manager = get_global_config_manager()?;
    config_manager.print_sources_info();

    // 命令行参数优先于配置 / CLI flags override file and env config
    let host = match matches.get_one::<String>("host") {
        Some(host) => host.clone(),
        None => config_manager.get_or("server.host", "0.0.0.0".to_string()),
    };
    let port = match matches.get_one::<u16>("port") {
        Some(port) => *port,
        None => config_manager.get_or("server.port", 8080_i64) as u16,
    };
    let workers = matches
        .get_one::<usize>("workers")
        .copied()
        .or_else(|| config_manager.get_int("server.workers").ok().map(|w| w as usize));
    let debug = matches.get_flag("debug") || config_manager.get_or("server.debug", false);

    let config = AppConfig {
        host,
        port,
        workers,
        debug,
    };

    // 启动应用
    AppBootstrap::new().with_config(config).run().await?;

    Ok(())
}
