// ==========================================
// VisaFor/Heru - API 层
// ==========================================
// 职责: 提供业务 API 接口,供前端调用
// ==========================================

pub mod error;
pub mod lead_import_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use lead_import_api::{ImportLeadsResponse, LeadImportApi, SampleTemplateResponse};
