use clap::{Arg, Command};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// 命令注册器特trait，各模块实现此trait来注册命令
pub trait CommandModule {
    /// 获取模块名称
    fn module_name(&self) -> &'static str;

    /// 注册模块的子命令
    fn register_commands(&self) -> Vec<Command>;

    /// 处理模块命令
    fn handle_command(
        &self,
        command_name: &str,
        matches: &clap::ArgMatches,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// 命令注册器，使用单例模式
pub struct CommandRegistry {
    modules: HashMap<String, Box<dyn CommandModule + Send + Sync>>,
}

impl CommandRegistry {
    /// 创建新的命令注册器
    fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// 获取全局单例实例
    pub fn instance() -> &'static Arc<Mutex<CommandRegistry>> {
        static INSTANCE: OnceLock<Arc<Mutex<CommandRegistry>>> = OnceLock::new();
        INSTANCE.get_or_init(|| Arc::new(Mutex::new(CommandRegistry::new())))
    }

    /// 注册模块
    pub fn register_module(&mut self, module: Box<dyn CommandModule + Send + Sync>) {
        let module_name = module.module_name().to_string();
        self.modules.insert(module_name, module);
    }

    /// 构建完整的命令行应用
    pub fn build_app(&self) -> Command {
        let mut app = Command::new("v-rbac-mock")
            .version(env!("CARGO_PKG_VERSION"))
            .about("RBAC 权限接口的集成测试桩服务器 / Mock RBAC API server for integration testing")
            .subcommand_required(true)
            .arg_required_else_help(true);

        // 添加内置的server命令
        app = app.subcommand(
            Command::new("server")
                .about("启动 Mock RBAC 服务器 / Start the mock server")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("服务器主机地址（默认取配置，最终回落 0.0.0.0）"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("服务器端口（默认取配置，最终回落 8080）")
                        .value_parser(clap::value_parser!(u16)),
                )
                .arg(
                    Arg::new("workers")
                        .short('w')
                        .long("workers")
                        .value_name("WORKERS")
                        .help("工作线程数")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("debug")
                        .short('d')
                        .long("debug")
                        .help("启用调试日志")
                        .action(clap::ArgAction::SetTrue),
                ),
        );

        // 添加内置的version命令
        app = app.subcommand(Command::new("version").about("显示版本信息"));

        // 添加各模块注册的命令
        for module in self.modules.values() {
            for command in module.register_commands() {
                app = app.subcommand(command);
            }
        }

        app
    }

    /// 处理命令
    pub fn handle_command(
        &self,
        command_name: &str,
        matches: &clap::ArgMatches,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // 查找对应的模块来处理命令
        for module in self.modules.values() {
            for command in module.register_commands() {
                if command.get_name() == command_name {
                    return module.handle_command(command_name, matches);
                }
            }
        }

        Err(format!("未找到处理命令 '{}' 的模块", command_name).into())
    }

    /// 获取所有注册的模块名称
    pub fn get_registered_modules(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }
}

/// 便捷函数：注册模块
pub fn register_module(module: Box<dyn CommandModule + Send + Sync>) {
    let registry = CommandRegistry::instance();
    let mut registry = registry.lock().unwrap();
    registry.register_module(module);
}

pub fn build_app() -> Command {
    let registry = CommandRegistry::instance();
    let registry = registry.lock().unwrap();
    registry.build_app()
}

pub fn handle_command(
    command_name: &str,
    matches: &clap::ArgMatches,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let registry = CommandRegistry::instance();
    let registry = registry.lock().unwrap();
    registry.handle_command(command_name, matches)
}
