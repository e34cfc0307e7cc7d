// ==========================================
// VisaFor/Heru - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 行级校验不通过不属于错误（静默跳过，仅影响计数）
// ==========================================

use crate::i18n::{t, t_with_args};
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    // ===== 操作员可纠正错误 =====
    #[error("未选择文件")]
    NoFileSelected,

    #[error("文件格式不支持: {0}（仅支持 .csv/.xlsx）")]
    UnsupportedFormat(String),

    #[error("已有导入任务正在进行")]
    ImportInProgress,

    // ===== 解码阶段错误 =====
    #[error("文件不包含数据行")]
    EmptyFile,

    #[error("文件解析失败: {0}")]
    DecodeFailure(String),

    // ===== 写入阶段错误 =====
    #[error("线索写入失败: {0}")]
    SinkFailure(String),

    // ===== 模板生成错误 =====
    #[error("导入模板生成失败: {0}")]
    TemplateFailure(String),
}

impl ImportError {
    /// 面向操作员的本地化提示文案
    ///
    /// DecodeFailure 无底层信息时回退为通用提示
    pub fn notification(&self) -> String {
        match self {
            ImportError::NoFileSelected => t("import.no_file_selected"),
            ImportError::UnsupportedFormat(ext) => {
                let ext = if ext.is_empty() { "?" } else { ext.as_str() };
                t_with_args("import.unsupported_format", &[("ext", ext)])
            }
            ImportError::ImportInProgress => t("import.in_progress"),
            ImportError::EmptyFile => t("import.empty_file"),
            ImportError::DecodeFailure(message) if message.trim().is_empty() => {
                t("import.decode_failure_generic")
            }
            ImportError::DecodeFailure(message) => {
                t_with_args("import.decode_failure", &[("message", message.as_str())])
            }
            ImportError::SinkFailure(message) => {
                t_with_args("import.sink_failure", &[("message", message.as_str())])
            }
            ImportError::TemplateFailure(message) => {
                t_with_args("import.template_failure", &[("message", message.as_str())])
            }
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::DecodeFailure(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::DecodeFailure(err.to_string())
    }
}

// 实现 From<RepositoryError>（Sink 写入失败）
impl From<crate::repository::RepositoryError> for ImportError {
    fn from(err: crate::repository::RepositoryError) -> Self {
        ImportError::SinkFailure(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
