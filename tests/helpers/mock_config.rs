// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use visafor_leads::config::{ConfigError, LeadImportConfigReader};
use visafor_leads::domain::TeamMember;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub default_owners: Vec<TeamMember>,
    pub fallback_owner_name: String,
    pub locale: String,
    /// 为 true 时所有读取均返回错误
    pub unavailable: bool,
}

/// 默认配置（无默认负责人）
impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_owners: Vec::new(),
            fallback_owner_name: "Unassigned".to_string(),
            locale: "en".to_string(),
            unavailable: false,
        }
    }
}

impl MockConfig {
    /// 指定默认负责人
    pub fn with_owners(names: &[&str]) -> Self {
        Self {
            default_owners: names.iter().map(|n| TeamMember::placeholder(*n)).collect(),
            ..Self::default()
        }
    }

    /// 配置源不可用
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.unavailable {
            return Err("配置源不可用".into());
        }
        Ok(())
    }
}

#[async_trait]
impl LeadImportConfigReader for MockConfig {
    async fn get_default_owners(&self) -> Result<Vec<TeamMember>, ConfigError> {
        self.check()?;
        Ok(self.default_owners.clone())
    }

    async fn get_fallback_owner_name(&self) -> Result<String, ConfigError> {
        self.check()?;
        Ok(self.fallback_owner_name.clone())
    }

    async fn get_locale(&self) -> Result<String, ConfigError> {
        self.check()?;
        Ok(self.locale.clone())
    }
}
