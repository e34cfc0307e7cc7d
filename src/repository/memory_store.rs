// ==========================================
// VisaFor/Heru - 内存线索存储
// ==========================================
// 职责: 进程内线索列表（演示数据 / 测试用 Sink）
// ==========================================

use crate::domain::Lead;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::lead_sink::LeadSink;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct InMemoryLeadStore {
    leads: Mutex<Vec<Lead>>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前线索快照（按追加顺序）
    pub fn snapshot(&self) -> Vec<Lead> {
        self.leads
            .lock()
            .map(|leads| leads.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LeadSink for InMemoryLeadStore {
    async fn append_lead(&self, lead: Lead) -> RepositoryResult<()> {
        let mut leads = self
            .leads
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        leads.push(lead);
        Ok(())
    }
}
