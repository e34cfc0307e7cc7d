// ==========================================
// VisaFor/Heru - 线索领域模型
// ==========================================
// 职责: Lead 实体、团队成员引用
// 红线: 不含数据访问逻辑
// ==========================================

use crate::domain::types::{LeadSource, LeadStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 头像占位图地址前缀（按姓名首字母生成）
pub const AVATAR_PLACEHOLDER_BASE: &str = "https://placehold.co/100x100.png?text=";

// ==========================================
// TeamMember - 团队成员（线索负责人）
// ==========================================
// 弱引用: 仅按姓名 + 头像标识，不拥有成员生命周期
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

impl TeamMember {
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
        }
    }

    /// 未配置负责人时使用的占位身份
    pub fn placeholder(name: impl Into<String>) -> Self {
        let name = name.into();
        let avatar = avatar_hint(&name);
        Self { name, avatar }
    }
}

// ==========================================
// Lead - 线索
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub status: LeadStatus,
    pub source: LeadSource,
    pub owner: TeamMember,
    pub last_contacted: DateTime<Utc>,
    pub created_date: DateTime<Utc>,
    /// 展示用头像提示，不作为身份依据
    pub avatar: String,
}

/// 按姓名首字母派生头像占位地址
///
/// # 规则
/// - 取前两个单词的首字母并转大写（"Jane Doe" → "JD"）
/// - 姓名为空时使用 "?"
pub fn avatar_hint(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() {
        format!("{}?", AVATAR_PLACEHOLDER_BASE)
    } else {
        format!("{}{}", AVATAR_PLACEHOLDER_BASE, initials)
    }
}
