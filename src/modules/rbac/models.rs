use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// 策略效果 / policy effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Allow,
    Deny,
}

/// 策略记录：主体、权限、动作、效果的四元组
/// Policy record: (subject, permission, action, effect) tuple.
/// 目录内 id 唯一，加载后不可变 / ids are unique within the catalog,
/// records are immutable after seeding.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    pub id: String,
    /// 主体标识，如 "role:default/admin" / subject, e.g. "role:default/admin"
    pub entity_reference: String,
    pub permission: String,
    /// 动作名：read/create/update/delete / the action name
    pub policy: String,
    pub effect: Effect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

/// 权限描述符：插件声明的单个能力
/// Permission descriptor: one capability a plugin declares.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDescriptor {
    pub name: String,
    pub display_name: String,
    pub resource_type: String,
    pub actions: Vec<String>,
}

/// 插件记录：拥有一组权限的功能域
/// Plugin record: a feature area owning a set of permissions.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PluginRecord {
    pub name: String,
    pub display_name: String,
    pub permissions: Vec<PermissionDescriptor>,
}

/// 权限记录：按插件展开的能力视图
/// Permission record: per-plugin flattened capability view.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRecord {
    pub plugin_id: String,
    pub name: String,
    pub display_name: String,
    pub resource_type: String,
    pub policies: Vec<String>,
}
