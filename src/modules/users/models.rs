use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 用户记录 / User record held by the in-memory registry
///
/// username 与 email 在注册表内各自唯一；createdAt 在创建时分配
/// username and email are each unique across the registry; createdAt is
/// assigned at creation and never updated (there is no update/delete).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// 按注册表大小顺序生成，如 "user1" / sequential, e.g. "user1"
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    /// RFC3339 UTC 时间戳
    pub created_at: String,
}
