// ==========================================
// VisaFor/Heru - 文件格式分派
// ==========================================
// 职责: 按扩展名（不区分大小写）选择解码器
// 支持: CSV (.csv) / Excel (.xlsx)
// ==========================================

use crate::importer::csv_decoder::CsvDecoder;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::lead_importer_trait::RowDecoder;
use crate::importer::xlsx_decoder::XlsxDecoder;
use std::fmt;
use std::path::Path;

/// 文件选择器接受的 MIME 类型
///
/// application/vnd.ms-excel 仅为兼容选择器，实际按扩展名分派
pub const ACCEPTED_MIME_TYPES: [&str; 3] = [
    "text/csv",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

// ==========================================
// FileFormat - 导入文件格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// 根据文件路径判定格式
    ///
    /// # 返回
    /// - Err(UnsupportedFormat): 扩展名缺失或不受支持
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }

    /// 该格式对应的解码器
    pub fn decoder(&self) -> Box<dyn RowDecoder> {
        match self {
            FileFormat::Csv => Box::new(CsvDecoder),
            FileFormat::Xlsx => Box::new(XlsxDecoder),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Csv => write!(f, "csv"),
            FileFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}
