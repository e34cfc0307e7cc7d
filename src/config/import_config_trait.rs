// ==========================================
// VisaFor/Heru - 导入配置读取 Trait
// ==========================================
// 职责: 定义线索导入所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::TeamMember;
use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;

/// 配置读取错误（跨 await 传递，要求 Send + Sync）
pub type ConfigError = Box<dyn Error + Send + Sync>;

/// 默认占位负责人名称
pub const DEFAULT_FALLBACK_OWNER_NAME: &str = "Unassigned";

/// 默认界面语言
pub const DEFAULT_LOCALE: &str = "en";

// ==========================================
// LeadImportConfigReader Trait
// ==========================================
// 用途: 线索导入模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait LeadImportConfigReader: Send + Sync {
    /// 获取默认负责人候选列表（按配置顺序）
    ///
    /// # 默认值
    /// - 空列表
    async fn get_default_owners(&self) -> Result<Vec<TeamMember>, ConfigError>;

    /// 获取占位负责人名称（无默认负责人时使用）
    ///
    /// # 默认值
    /// - "Unassigned"
    async fn get_fallback_owner_name(&self) -> Result<String, ConfigError>;

    /// 获取操作员提示文案语言
    ///
    /// # 默认值
    /// - "en"
    async fn get_locale(&self) -> Result<String, ConfigError>;

    /// 获取导入线索的负责人
    ///
    /// # 逻辑
    /// 1. 默认负责人列表非空 → 取第一位
    /// 2. 否则 → 占位身份（fallback_owner_name）
    async fn get_default_owner(&self) -> Result<TeamMember, ConfigError> {
        let owners = self.get_default_owners().await?;
        match owners.into_iter().next() {
            Some(owner) => Ok(owner),
            None => {
                let name = self.get_fallback_owner_name().await?;
                Ok(TeamMember::placeholder(name))
            }
        }
    }
}

#[async_trait]
impl<T: LeadImportConfigReader + ?Sized> LeadImportConfigReader for Arc<T> {
    async fn get_default_owners(&self) -> Result<Vec<TeamMember>, ConfigError> {
        (**self).get_default_owners().await
    }

    async fn get_fallback_owner_name(&self) -> Result<String, ConfigError> {
        (**self).get_fallback_owner_name().await
    }

    async fn get_locale(&self) -> Result<String, ConfigError> {
        (**self).get_locale().await
    }
}
