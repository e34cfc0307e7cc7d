// ==========================================
// VisaFor/Heru - 线索标准化器
// ==========================================
// 职责: RawRow → Lead（必填校验 + 默认值填充）
// 规则: name / email / company 任一 trim 后为空 → 静默跳过
// ==========================================

use crate::domain::{avatar_hint, Lead, LeadSource, LeadStatus, TeamMember};
use crate::importer::lead_importer_trait::LeadNormalizer;
use crate::importer::raw_row::{LeadColumn, RawRow};
use chrono::{DateTime, Utc};
use uuid::Uuid;

// ==========================================
// ImportContext - 导入上下文
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportContext {
    /// 导入线索的负责人
    pub owner: TeamMember,
    /// 导入时间（last_contacted / created_date 默认值）
    pub imported_at: DateTime<Utc>,
}

impl ImportContext {
    pub fn new(owner: TeamMember, imported_at: DateTime<Utc>) -> Self {
        Self { owner, imported_at }
    }
}

pub struct LeadNormalizerImpl;

impl LeadNormalizer for LeadNormalizerImpl {
    fn normalize(&self, row: &RawRow, ctx: &ImportContext) -> Option<Lead> {
        let value = |column: LeadColumn| row.field(column).trim().to_string();

        let missing_required = LeadColumn::REQUIRED
            .iter()
            .any(|column| row.field(*column).trim().is_empty());
        if missing_required {
            return None;
        }

        let name = value(LeadColumn::Name);
        let avatar = avatar_hint(&name);

        Some(Lead {
            id: Uuid::new_v4().to_string(),
            name,
            company: value(LeadColumn::Company),
            email: value(LeadColumn::Email),
            phone: value(LeadColumn::Phone),
            status: LeadStatus::New,
            source: LeadSource::Import,
            owner: ctx.owner.clone(),
            last_contacted: ctx.imported_at,
            created_date: ctx.imported_at,
            avatar,
        })
    }
}
