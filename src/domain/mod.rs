// ==========================================
// VisaFor/Heru - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含导入逻辑
// ==========================================

pub mod lead;
pub mod types;

// 重导出核心类型
pub use lead::{avatar_hint, Lead, TeamMember};
pub use types::{LeadSource, LeadStatus};
