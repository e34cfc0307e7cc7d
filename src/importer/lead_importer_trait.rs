// ==========================================
// VisaFor/Heru - 线索导入 Trait
// ==========================================
// 职责: 定义线索导入接口（不包含实现）
// 管道: 格式分派 → 解码 → 标准化 → 写入 Sink
// ==========================================

use crate::domain::Lead;
use crate::importer::error::ImportResult;
use crate::importer::lead_importer_impl::ImportSummary;
use crate::importer::lead_normalizer::ImportContext;
use crate::importer::raw_row::RawRow;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// LeadImporter Trait
// ==========================================
// 用途: 线索导入主接口
// 实现者: LeadImporterImpl
#[async_trait]
pub trait LeadImporter: Send + Sync {
    /// 导入操作员选择的文件
    ///
    /// # 参数
    /// - file_path: 已选择的文件；None 表示未选择
    ///
    /// # 返回
    /// - ImportSummary: 汇总结果（成功数量或单一失败原因），不向调用方抛出错误
    ///
    /// # 导入流程
    /// 1. 按扩展名分派解码器（不支持的格式不读取文件内容）
    /// 2. 完整读取文件内容
    /// 3. 解码为 RawRow 列表
    /// 4. 逐行标准化，合格线索逐条写入 Sink
    async fn import_file(&self, file_path: Option<&Path>) -> ImportSummary;
}

// ==========================================
// RowDecoder Trait
// ==========================================
// 用途: 将完整文件内容解码为 RawRow 列表
// 实现者: CsvDecoder, XlsxDecoder
pub trait RowDecoder: Send + Sync {
    /// 解码文件内容
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 数据行（不含表头，可能为空）
    /// - Err: 解析失败
    fn decode(&self, content: &[u8]) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// LeadNormalizer Trait
// ==========================================
// 用途: RawRow → Lead（必填校验 + 默认值）
// 实现者: LeadNormalizerImpl
pub trait LeadNormalizer: Send + Sync {
    /// 标准化单行
    ///
    /// # 返回
    /// - Some(Lead): 校验通过
    /// - None: 必填字段缺失，静默跳过
    fn normalize(&self, row: &RawRow, ctx: &ImportContext) -> Option<Lead>;
}
