// ==========================================
// VisaFor/Heru - 导入模板
// ==========================================
// 职责: 生成可下载的示例 CSV（四列 + 两行示例数据）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::raw_row::LeadColumn;
use std::path::Path;

/// 模板默认文件名
pub const SAMPLE_TEMPLATE_FILE_NAME: &str = "leads_import_template.csv";

/// 示例数据（列顺序同 LeadColumn::TEMPLATE_ORDER）
const SAMPLE_ROWS: [[&str; 4]; 2] = [
    ["John Doe", "Acme Immigration Law", "john.doe@example.com", "555-0100"],
    ["Jane Smith", "Global Visa Partners", "jane.smith@example.com", "555-0101"],
];

fn write_template<W: std::io::Write>(writer: &mut csv::Writer<W>) -> Result<(), csv::Error> {
    writer.write_record(LeadColumn::TEMPLATE_ORDER.iter().map(|c| c.key()))?;
    for row in SAMPLE_ROWS.iter() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// 生成模板文本
pub fn sample_template_csv() -> ImportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_template(&mut writer).map_err(|e| ImportError::TemplateFailure(e.to_string()))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::TemplateFailure(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::TemplateFailure(e.to_string()))
}

/// 将模板写出到指定路径
pub fn write_sample_template<P: AsRef<Path>>(path: P) -> ImportResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())
        .map_err(|e| ImportError::TemplateFailure(e.to_string()))?;
    write_template(&mut writer).map_err(|e| ImportError::TemplateFailure(e.to_string()))?;
    tracing::info!(path = %path.as_ref().display(), "导入模板已写出");
    Ok(())
}
