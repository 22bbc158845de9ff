use clap::{Arg, Command};

use crate::command_registry::CommandModule;
use crate::modules::rbac::catalog::CatalogStore;

/// RBAC模块的命令处理器
pub struct RbacCommands;

impl CommandModule for RbacCommands {
    fn module_name(&self) -> &'static str {
        "rbac"
    }

    fn register_commands(&self) -> Vec<Command> {
        vec![Command::new("catalog")
            .about("显示目录种子摘要 / Print the seeded catalog summary")
            .arg(
                Arg::new("format")
                    .short('f')
                    .long("format")
                    .value_name("FORMAT")
                    .help("输出格式 (json|text)")
                    .default_value("text"),
            )]
    }

    fn handle_command(
        &self,
        command_name: &str,
        matches: &clap::ArgMatches,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match command_name {
            "catalog" => {
                let catalog = CatalogStore::seed();
                let format = matches.get_one::<String>("format").unwrap();
                match format.as_str() {
                    "json" => {
                        println!(
                            "{}",
                            serde_json::json!({
                                "policies": catalog.policies().len(),
                                "plugins": catalog.plugins().len(),
                                "permissions": catalog.permissions().len(),
                            })
                        );
                    }
                    "text" => {
                        println!("目录种子 / catalog seed:");
                        println!("  策略 policies:    {}", catalog.policies().len());
                        println!("  插件 plugins:     {}", catalog.plugins().len());
                        println!("  权限 permissions: {}", catalog.permissions().len());
                    }
                    _ => {
                        return Err(format!("不支持的格式: {}", format).into());
                    }
                }
            }
            _ => {
                return Err(format!("未知命令: {}", command_name).into());
            }
        }
        Ok(())
    }
}

/// 注册RBAC模块的命令
pub fn register_rbac_commands() {
    crate::command_registry::register_module(Box::new(RbacCommands));
}
