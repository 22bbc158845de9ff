use std::sync::RwLock;

use chrono::Utc;
use thiserror::Error;

use super::models::UserRecord;
use crate::error::AppError;

/// 注册表错误 / registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// 用户名或邮箱与现有记录重复
    #[error("User with this username or email already exists")]
    Duplicate,
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Duplicate => AppError::conflict(err.to_string()),
        }
    }
}

/// 内存用户注册表 / In-memory user registry
///
/// 写锁覆盖整个「查重 + 追加」序列：多 worker 并发注册时该序列是临界区，
/// 不允许交错，否则唯一性约束会被破坏
/// The write lock spans the whole duplicate-check-then-append sequence;
/// with multiple workers that sequence is a critical section, interleaving
/// would break the uniqueness invariants.
#[derive(Debug)]
pub struct UserRegistry {
    users: RwLock<Vec<UserRecord>>,
}

impl UserRegistry {
    /// 构建带种子用户的注册表 / registry with the guest seed user
    pub fn seed() -> Self {
        Self {
            users: RwLock::new(vec![Self::seed_user()]),
        }
    }

    fn seed_user() -> UserRecord {
        UserRecord {
            id: "user1".to_string(),
            username: "guest".to_string(),
            email: "guest@example.com".to_string(),
            role: "admin".to_string(),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// 列出全部用户
    pub fn list(&self) -> Vec<UserRecord> {
        self.users.read().unwrap().clone()
    }

    /// 当前用户数
    pub fn count(&self) -> usize {
        self.users.read().unwrap().len()
    }

    /// 注册新用户
    ///
    /// 重复的用户名或邮箱返回 `RegistryError::Duplicate`；
    /// id 由当前注册表大小顺序派生
    pub fn register(
        &self,
        username: &str,
        email: &str,
        role: &str,
    ) -> Result<UserRecord, RegistryError> {
        let mut users = self.users.write().unwrap();

        if users
            .iter()
            .any(|u| u.username == username || u.email == email)
        {
            return Err(RegistryError::Duplicate);
        }

        let record = UserRecord {
            id: format!("user{}", users.len() + 1),
            username: username.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        users.push(record.clone());
        Ok(record)
    }

    /// 重置为种子状态（测试隔离用） / restore the seed state, for test isolation
    pub fn reset(&self) {
        *self.users.write().unwrap() = vec![Self::seed_user()];
    }
}
