// ==========================================
// VisaFor/Heru - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供线索写入/查询接口,屏蔽存储细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod lead_repo;
pub mod lead_sink;
pub mod memory_store;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use lead_repo::LeadRepository;
pub use lead_sink::LeadSink;
pub use memory_store::InMemoryLeadStore;
