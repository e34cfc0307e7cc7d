// ==========================================
// VisaFor/Heru - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (scope_id + key → value)
// ==========================================

use crate::config::import_config_trait::{
    ConfigError, LeadImportConfigReader, DEFAULT_FALLBACK_OWNER_NAME, DEFAULT_LOCALE,
};
use crate::db::open_sqlite_connection;
use crate::domain::TeamMember;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, ConfigError> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建 ConfigManager（与仓储共享连接）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, ConfigError> {
        let manager = Self { conn };
        manager.ensure_table()?;
        Ok(manager)
    }

    fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>, ConfigError> {
        self.conn
            .lock()
            .map_err(|e| format!("锁获取失败: {}", e).into())
    }

    /// 确保 config_kv 表存在
    fn ensure_table(&self) -> Result<(), ConfigError> {
        let conn = self.lock_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS config_kv (
              scope_id TEXT NOT NULL DEFAULT 'global',
              key TEXT NOT NULL,
              value TEXT NOT NULL,
              updated_at TEXT NOT NULL DEFAULT (datetime('now')),
              PRIMARY KEY (scope_id, key)
            );
            "#,
        )?;
        Ok(())
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let conn = self.lock_conn()?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::debug!(config_key = key, "配置已更新");
        Ok(())
    }

    /// 写入默认负责人列表（序列化为 JSON）
    pub fn set_default_owners(&self, owners: &[TeamMember]) -> Result<(), ConfigError> {
        let json = serde_json::to_string(owners)?;
        self.set_config_value(config_keys::DEFAULT_OWNERS, &json)
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        Ok(self
            .get_config_value(key)?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有 global 配置的快照
    pub fn get_config_snapshot(&self) -> Result<HashMap<String, String>, ConfigError> {
        let conn = self.lock_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map = HashMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }
        Ok(config_map)
    }
}

// ==========================================
// LeadImportConfigReader Trait 实现
// ==========================================
#[async_trait]
impl LeadImportConfigReader for ConfigManager {
    async fn get_default_owners(&self) -> Result<Vec<TeamMember>, ConfigError> {
        let value = self.get_config_or_default(config_keys::DEFAULT_OWNERS, "[]")?;
        let owners: Vec<TeamMember> = serde_json::from_str(&value).unwrap_or_else(|_| {
            tracing::warn!(
                config_key = config_keys::DEFAULT_OWNERS,
                raw_value = %value,
                "默认负责人配置格式错误，使用空列表"
            );
            Vec::new()
        });

        // 名称为空的成员视为无效
        Ok(owners
            .into_iter()
            .filter(|owner| !owner.name.trim().is_empty())
            .collect())
    }

    async fn get_fallback_owner_name(&self) -> Result<String, ConfigError> {
        self.get_config_or_default(config_keys::FALLBACK_OWNER_NAME, DEFAULT_FALLBACK_OWNER_NAME)
    }

    async fn get_locale(&self) -> Result<String, ConfigError> {
        self.get_config_or_default(config_keys::LOCALE, DEFAULT_LOCALE)
    }
}

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 线索导入
    pub const DEFAULT_OWNERS: &str = "lead_import/default_owners";
    pub const FALLBACK_OWNER_NAME: &str = "lead_import/fallback_owner_name";

    // 界面
    pub const LOCALE: &str = "ui/locale";
}
