// ==========================================
// VisaFor/Heru - 线索导入API
// ==========================================
// 职责: 封装线索导入相关功能，供前端调用
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, LeadImportConfigReader};
use crate::domain::Lead;
use crate::importer::{
    sample_template_csv, ImportState, LeadImporter, LeadImporterImpl, ACCEPTED_MIME_TYPES,
    SAMPLE_TEMPLATE_FILE_NAME,
};
use crate::repository::LeadRepository;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportLeadsResponse {
    /// 是否成功
    pub success: bool,
    /// 新导入的线索数量
    pub imported: usize,
    /// 因必填字段缺失跳过的行数
    pub skipped: usize,
    /// 解码得到的数据行数
    pub total_rows: usize,
    /// 文件名
    pub file_name: Option<String>,
    /// 操作员提示（"Imported N lead(s)" 或失败原因）
    pub message: String,
    /// 导入耗时（毫秒）
    pub elapsed_ms: u64,
}

/// 导入模板响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleTemplateResponse {
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
}

type RepoImporter = LeadImporterImpl<Arc<LeadRepository>, Arc<ConfigManager>>;

/// 线索导入API
pub struct LeadImportApi {
    lead_repo: Arc<LeadRepository>,
    config: Arc<ConfigManager>,
    importer: RepoImporter,
}

impl LeadImportApi {
    /// 创建新的LeadImportApi实例
    pub fn new(lead_repo: Arc<LeadRepository>, config: Arc<ConfigManager>) -> Self {
        let importer = LeadImporterImpl::new(lead_repo.clone(), config.clone());
        Self {
            lead_repo,
            config,
            importer,
        }
    }

    /// 导入线索文件
    ///
    /// # 参数
    /// - file_path: 已选择的文件路径（None 表示未选择）
    ///
    /// # 返回
    /// - ImportLeadsResponse: 始终返回汇总，失败原因在 message 中
    pub async fn import_leads(&self, file_path: Option<&str>) -> ImportLeadsResponse {
        let summary = self
            .importer
            .import_file(file_path.map(Path::new))
            .await;

        ImportLeadsResponse {
            success: summary.is_success(),
            imported: summary.imported,
            skipped: summary.skipped,
            total_rows: summary.total_rows,
            message: summary.notification(),
            file_name: summary.file_name,
            elapsed_ms: summary.elapsed_ms,
        }
    }

    /// 当前导入状态
    pub fn import_state(&self) -> ImportState {
        self.importer.state()
    }

    /// 文件选择器可接受的 MIME 类型
    pub fn accepted_mime_types(&self) -> Vec<String> {
        ACCEPTED_MIME_TYPES.iter().map(|m| m.to_string()).collect()
    }

    /// 查询全部线索
    pub fn list_leads(&self) -> ApiResult<Vec<Lead>> {
        Ok(self.lead_repo.list_leads()?)
    }

    /// 获取导入模板
    pub fn sample_template(&self) -> ApiResult<SampleTemplateResponse> {
        Ok(SampleTemplateResponse {
            file_name: SAMPLE_TEMPLATE_FILE_NAME.to_string(),
            mime_type: "text/csv".to_string(),
            content: sample_template_csv()?,
        })
    }

    /// 按配置应用提示文案语言
    pub async fn apply_configured_locale(&self) -> ApiResult<String> {
        let locale = self
            .config
            .get_locale()
            .await
            .map_err(|e| ApiError::InternalError(format!("语言配置读取失败: {}", e)))?;
        crate::i18n::set_locale(&locale);
        Ok(locale)
    }
}
