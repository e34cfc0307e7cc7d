// ==========================================
// VisaFor/Heru - 线索导入器实现
// ==========================================
// 职责: 串联导入流程，从文件到 Sink
// 流程: 分派 → 读取 → 解码 → 标准化 → 逐条写入 → 汇总
// 状态: Idle → Reading → Decoding → Normalizing → Done | Failed
// ==========================================

use crate::config::LeadImportConfigReader;
use crate::domain::TeamMember;
use crate::i18n::t_with_args;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::FileFormat;
use crate::importer::lead_importer_trait::{LeadImporter, LeadNormalizer};
use crate::importer::lead_normalizer::{ImportContext, LeadNormalizerImpl};
use crate::repository::LeadSink;
use chrono::Utc;
use serde::Serialize;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

// ==========================================
// ImportState - 导入状态机
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportState {
    Idle,
    Reading,
    Decoding,
    Normalizing,
    Done { imported: usize },
    Failed { reason: String },
}

impl ImportState {
    /// 是否有导入正在进行
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            ImportState::Reading | ImportState::Decoding | ImportState::Normalizing
        )
    }
}

// ==========================================
// ImportSummary - 导入汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub file_name: Option<String>,
    /// 解码得到的数据行数
    pub total_rows: usize,
    /// 成功写入 Sink 的线索数
    pub imported: usize,
    /// 因必填字段缺失被跳过的行数
    pub skipped: usize,
    pub elapsed_ms: u64,
    /// 整体失败原因（部分写入不回滚，imported 记录失败前已写入的数量）
    pub error: Option<ImportError>,
}

impl ImportSummary {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// 面向操作员的单条提示
    pub fn notification(&self) -> String {
        match &self.error {
            None => t_with_args("import.imported", &[("count", &self.imported.to_string())]),
            Some(err) => err.notification(),
        }
    }
}

/// 运行中统计
#[derive(Debug, Default)]
struct ImportStats {
    total_rows: usize,
    imported: usize,
    skipped: usize,
}

// ==========================================
// LeadImporterImpl - 线索导入器实现
// ==========================================
pub struct LeadImporterImpl<S, C>
where
    S: LeadSink,
    C: LeadImportConfigReader,
{
    // 线索写入
    sink: S,

    // 配置读取器
    config: C,

    // 标准化器
    normalizer: Box<dyn LeadNormalizer>,

    // 状态机（不跨 await 持有锁）
    state: Mutex<ImportState>,
}

impl<S, C> LeadImporterImpl<S, C>
where
    S: LeadSink,
    C: LeadImportConfigReader,
{
    /// 创建新的 LeadImporter 实例
    ///
    /// # 参数
    /// - sink: 线索写入目标
    /// - config: 配置读取器
    pub fn new(sink: S, config: C) -> Self {
        Self::with_normalizer(sink, config, Box::new(LeadNormalizerImpl))
    }

    pub fn with_normalizer(sink: S, config: C, normalizer: Box<dyn LeadNormalizer>) -> Self {
        Self {
            sink,
            config,
            normalizer,
            state: Mutex::new(ImportState::Idle),
        }
    }

    /// 当前状态
    pub fn state(&self) -> ImportState {
        self.lock_state().clone()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ImportState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_state(&self, next: ImportState) {
        let mut state = self.lock_state();
        debug!(from = ?*state, to = ?next, "导入状态切换");
        *state = next;
    }

    /// 进入 Reading；已有导入在进行时拒绝
    fn begin(&self) -> ImportResult<()> {
        let mut state = self.lock_state();
        if state.is_in_flight() {
            return Err(ImportError::ImportInProgress);
        }
        *state = ImportState::Reading;
        Ok(())
    }

    /// 执行导入管道
    async fn run_pipeline(&self, path: &Path, stats: &mut ImportStats) -> ImportResult<()> {
        // === 步骤 1: 格式分派（不支持的格式不读取内容） ===
        let format = FileFormat::from_path(path)?;
        debug!(format = %format, "格式分派完成");

        // === 步骤 2: 读取完整内容 ===
        let content = tokio::fs::read(path).await?;
        debug!(bytes = content.len(), "文件读取完成");

        // === 步骤 3: 解码 ===
        self.set_state(ImportState::Decoding);
        let rows = format.decoder().decode(&content)?;
        stats.total_rows = rows.len();
        if rows.is_empty() {
            return Err(ImportError::EmptyFile);
        }
        info!(total_rows = stats.total_rows, "文件解码完成");

        // === 步骤 4: 标准化 + 逐条写入 ===
        self.set_state(ImportState::Normalizing);
        let ctx = ImportContext::new(self.resolve_owner().await, Utc::now());

        for (idx, row) in rows.iter().enumerate() {
            match self.normalizer.normalize(row, &ctx) {
                Some(lead) => {
                    self.sink.append_lead(lead).await?;
                    stats.imported += 1;
                }
                None => {
                    debug!(row_number = idx + 1, "必填字段缺失，跳过该行");
                    stats.skipped += 1;
                }
            }
        }

        Ok(())
    }

    /// 读取默认负责人；配置不可用时使用占位身份
    async fn resolve_owner(&self) -> TeamMember {
        let owner = self.config.get_default_owner().await;
        match owner {
            Ok(owner) => owner,
            Err(e) => {
                warn!(error = %e, "默认负责人读取失败，使用占位身份");
                TeamMember::placeholder(crate::config::import_config_trait::DEFAULT_FALLBACK_OWNER_NAME)
            }
        }
    }
}

#[async_trait::async_trait]
impl<S, C> LeadImporter for LeadImporterImpl<S, C>
where
    S: LeadSink,
    C: LeadImportConfigReader,
{
    #[instrument(skip(self, file_path), fields(file))]
    async fn import_file(&self, file_path: Option<&Path>) -> ImportSummary {
        let start_time = Instant::now();

        let file_name = file_path.map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| p.display().to_string())
        });

        let mut stats = ImportStats::default();
        let result = match file_path {
            None => {
                warn!("未选择文件");
                Err(ImportError::NoFileSelected)
            }
            Some(path) => {
                tracing::Span::current().record("file", path.display().to_string().as_str());
                match self.begin() {
                    Err(e) => {
                        warn!("已有导入任务正在进行，拒绝新的导入");
                        Err(e)
                    }
                    Ok(()) => {
                        info!(file = %path.display(), "开始导入线索");
                        let result = self.run_pipeline(path, &mut stats).await;
                        match &result {
                            Ok(()) => self.set_state(ImportState::Done {
                                imported: stats.imported,
                            }),
                            Err(e) => self.set_state(ImportState::Failed {
                                reason: e.notification(),
                            }),
                        }
                        result
                    }
                }
            }
        };

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        match &result {
            Ok(()) => info!(
                total = stats.total_rows,
                imported = stats.imported,
                skipped = stats.skipped,
                elapsed_ms = elapsed_ms,
                "线索导入完成"
            ),
            Err(e) => error!(
                error = %e,
                imported = stats.imported,
                elapsed_ms = elapsed_ms,
                "线索导入失败"
            ),
        }

        ImportSummary {
            file_name,
            total_rows: stats.total_rows,
            imported: stats.imported,
            skipped: stats.skipped,
            elapsed_ms,
            error: result.err(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::domain::Lead;
    use crate::repository::{InMemoryLeadStore, RepositoryError, RepositoryResult};
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::Builder;

    struct StaticConfig(Vec<TeamMember>);

    #[async_trait]
    impl LeadImportConfigReader for StaticConfig {
        async fn get_default_owners(&self) -> Result<Vec<TeamMember>, ConfigError> {
            Ok(self.0.clone())
        }
        async fn get_fallback_owner_name(&self) -> Result<String, ConfigError> {
            Ok("Unassigned".to_string())
        }
        async fn get_locale(&self) -> Result<String, ConfigError> {
            Ok("en".to_string())
        }
    }

    /// 写入第 N 条时失败的 Sink
    struct FailingSink {
        inner: InMemoryLeadStore,
        fail_at: usize,
    }

    #[async_trait]
    impl LeadSink for FailingSink {
        async fn append_lead(&self, lead: Lead) -> RepositoryResult<()> {
            if self.inner.len() + 1 == self.fail_at {
                return Err(RepositoryError::InternalError("disk full".to_string()));
            }
            self.inner.append_lead(lead).await
        }
    }

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn importer() -> LeadImporterImpl<Arc<InMemoryLeadStore>, StaticConfig> {
        LeadImporterImpl::new(Arc::new(InMemoryLeadStore::new()), StaticConfig(Vec::new()))
    }

    #[tokio::test]
    async fn test_import_counts_and_state() {
        let importer = importer();
        assert_eq!(importer.state(), ImportState::Idle);

        let file = csv_file("name,company,email\nA,B,a@x.com\n,B,b@x.com\nC,D,c@x.com\n");
        let summary = importer.import_file(Some(file.path())).await;

        assert!(summary.is_success());
        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(importer.state(), ImportState::Done { imported: 2 });
        assert_eq!(importer.sink().len(), 2);
        assert_eq!(importer.sink().snapshot()[0].owner.name, "Unassigned");
    }

    #[tokio::test]
    async fn test_no_file_keeps_idle() {
        let importer = importer();
        let summary = importer.import_file(None).await;
        assert_eq!(summary.error, Some(ImportError::NoFileSelected));
        assert_eq!(importer.state(), ImportState::Idle);
    }

    #[tokio::test]
    async fn test_header_only_is_empty_file() {
        let importer = importer();
        let file = csv_file("name,company,email\n");
        let summary = importer.import_file(Some(file.path())).await;
        assert_eq!(summary.error, Some(ImportError::EmptyFile));
        assert!(matches!(importer.state(), ImportState::Failed { .. }));
        assert_eq!(summary.imported, 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_decode_failure() {
        let importer = importer();
        let summary = importer
            .import_file(Some(Path::new("/nonexistent/dir/leads.csv")))
            .await;
        assert!(matches!(summary.error, Some(ImportError::DecodeFailure(_))));
    }

    #[tokio::test]
    async fn test_in_flight_import_rejected() {
        let importer = importer();
        importer.set_state(ImportState::Decoding);

        let file = csv_file("name,company,email\nA,B,a@x.com\n");
        let summary = importer.import_file(Some(file.path())).await;

        assert_eq!(summary.error, Some(ImportError::ImportInProgress));
        assert_eq!(importer.state(), ImportState::Decoding);
        assert!(importer.sink().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_keeps_partial_import() {
        let sink = FailingSink {
            inner: InMemoryLeadStore::new(),
            fail_at: 3,
        };
        let importer = LeadImporterImpl::new(sink, StaticConfig(Vec::new()));

        let file = csv_file("name,company,email\nA,B,a@x.com\nC,D,c@x.com\nE,F,e@x.com\nG,H,g@x.com\n");
        let summary = importer.import_file(Some(file.path())).await;

        assert!(matches!(summary.error, Some(ImportError::SinkFailure(_))));
        assert_eq!(summary.imported, 2);
        assert_eq!(importer.sink().inner.len(), 2);
        assert!(matches!(importer.state(), ImportState::Failed { .. }));
    }

    #[tokio::test]
    async fn test_terminal_state_accepts_new_import() {
        let importer = importer();
        let file = csv_file("name,company,email\nA,B,a@x.com\n");

        importer.import_file(Some(file.path())).await;
        let summary = importer.import_file(Some(file.path())).await;

        assert!(summary.is_success());
        // 无去重：同一文件导入两次得到两条线索
        assert_eq!(importer.sink().len(), 2);
    }
}
