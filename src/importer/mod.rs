// ==========================================
// VisaFor/Heru - 导入层
// ==========================================
// 职责: 外部线索文件导入，生成 Lead 并写入 Sink
// 支持: CSV, Excel (.xlsx)
// ==========================================

// 模块声明
pub mod csv_decoder;
pub mod error;
pub mod file_parser;
pub mod lead_importer_impl;
pub mod lead_importer_trait;
pub mod lead_normalizer;
pub mod raw_row;
pub mod template;
pub mod xlsx_decoder;

// 重导出核心类型
pub use csv_decoder::CsvDecoder;
pub use error::{ImportError, ImportResult};
pub use file_parser::{FileFormat, ACCEPTED_MIME_TYPES};
pub use lead_importer_impl::{ImportState, ImportSummary, LeadImporterImpl};
pub use lead_normalizer::{ImportContext, LeadNormalizerImpl};
pub use raw_row::{LeadColumn, RawRow};
pub use template::{sample_template_csv, write_sample_template, SAMPLE_TEMPLATE_FILE_NAME};
pub use xlsx_decoder::XlsxDecoder;

// 重导出 Trait 接口
pub use lead_importer_trait::{LeadImporter, LeadNormalizer, RowDecoder};
