// ==========================================
// VisaFor/Heru - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::LeadImportApi;
use crate::config::ConfigManager;
use crate::db::open_sqlite_connection;
use crate::repository::LeadRepository;

/// 应用状态
///
/// 仓储与配置共享同一个数据库连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 配置管理器
    pub config: Arc<ConfigManager>,

    /// 线索仓储
    pub lead_repo: Arc<LeadRepository>,

    /// 线索导入API
    pub lead_import_api: Arc<LeadImportApi>,
}

impl AppState {
    /// 创建新的AppState实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let config = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法初始化ConfigManager: {}", e))?,
        );

        let lead_repo = Arc::new(
            LeadRepository::from_connection(conn)
                .map_err(|e| format!("无法初始化LeadRepository: {}", e))?,
        );

        let lead_import_api = Arc::new(LeadImportApi::new(lead_repo.clone(), config.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            config,
            lead_repo,
            lead_import_api,
        })
    }
}

// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 VISAFOR_LEADS_DB_PATH（非空时）
/// - 开发环境: 用户数据目录/visafor-leads-dev/visafor_leads.db
/// - 生产环境: 用户数据目录/visafor-leads/visafor_leads.db
/// - 无法获取用户数据目录时: ./visafor_leads.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("VISAFOR_LEADS_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./visafor_leads.db");

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        let dir = data_dir.join("visafor-leads-dev");

        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("visafor-leads");

        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("visafor_leads.db");
        }
    }

    path.to_string_lossy().to_string()
}
