// ==========================================
// VisaFor/Heru - 线索写入 Trait
// ==========================================
// 职责: 导入流程唯一依赖的写入接口（追加一条线索）
// 说明: 非幂等，重复导入同一文件会产生重复线索
// ==========================================

use crate::domain::Lead;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use std::sync::Arc;

// ==========================================
// LeadSink Trait
// ==========================================
// 实现者: LeadRepository（SQLite）, InMemoryLeadStore（内存）
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// 追加一条线索
    ///
    /// # 返回
    /// - Ok(()): 已写入，生命周期归 Sink 所有
    /// - Err: 写入失败（已写入的线索不回滚）
    async fn append_lead(&self, lead: Lead) -> RepositoryResult<()>;
}

#[async_trait]
impl<T: LeadSink + ?Sized> LeadSink for Arc<T> {
    async fn append_lead(&self, lead: Lead) -> RepositoryResult<()> {
        (**self).append_lead(lead).await
    }
}
