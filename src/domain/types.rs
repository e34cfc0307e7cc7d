// ==========================================
// VisaFor/Heru - 领域类型定义
// ==========================================
// 职责: 线索状态、线索来源等枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 线索状态 (Lead Status)
// ==========================================
// 销售漏斗: New → Contacted → Qualified / Unqualified
// 序列化格式: 与前端展示文本一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    New,         // 新线索
    Contacted,   // 已联系
    Qualified,   // 合格
    Unqualified, // 不合格
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadStatus::New => write!(f, "New"),
            LeadStatus::Contacted => write!(f, "Contacted"),
            LeadStatus::Qualified => write!(f, "Qualified"),
            LeadStatus::Unqualified => write!(f, "Unqualified"),
        }
    }
}

impl LeadStatus {
    /// 从字符串解析（不区分大小写）
    pub fn from_str_loose(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Some(LeadStatus::New),
            "contacted" => Some(LeadStatus::Contacted),
            "qualified" => Some(LeadStatus::Qualified),
            "unqualified" => Some(LeadStatus::Unqualified),
            _ => None,
        }
    }
}

// ==========================================
// 线索来源 (Lead Source)
// ==========================================
// 导入流程固定写入 Import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadSource {
    Website,
    Referral,
    Social,
    Manual,
    Import,
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadSource::Website => write!(f, "Website"),
            LeadSource::Referral => write!(f, "Referral"),
            LeadSource::Social => write!(f, "Social"),
            LeadSource::Manual => write!(f, "Manual"),
            LeadSource::Import => write!(f, "Import"),
        }
    }
}

impl LeadSource {
    pub fn from_str_loose(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "website" => Some(LeadSource::Website),
            "referral" => Some(LeadSource::Referral),
            "social" => Some(LeadSource::Social),
            "manual" => Some(LeadSource::Manual),
            "import" => Some(LeadSource::Import),
            _ => None,
        }
    }
}
