// ==========================================
// VisaFor/Heru - 线索导入主入口
// ==========================================
// 用法:
//   visafor-leads [FILE]              导入线索文件（.csv / .xlsx）
//   visafor-leads --template [PATH]   写出导入模板
// ==========================================

use anyhow::{Context, Result};
use visafor_leads::app::{get_default_db_path, AppState};
use visafor_leads::importer::{write_sample_template, SAMPLE_TEMPLATE_FILE_NAME};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    visafor_leads::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", visafor_leads::APP_NAME);
    tracing::info!("系统版本: {}", visafor_leads::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--template") {
        let path = args
            .get(1)
            .cloned()
            .unwrap_or_else(|| SAMPLE_TEMPLATE_FILE_NAME.to_string());
        write_sample_template(&path).with_context(|| format!("写出模板失败: {}", path))?;
        println!("{}", path);
        return Ok(());
    }

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let app_state = AppState::new(db_path).map_err(anyhow::Error::msg)?;
    if let Err(e) = app_state.lead_import_api.apply_configured_locale().await {
        tracing::warn!(error = %e, "语言配置应用失败，使用默认语言");
    }

    let response = app_state
        .lead_import_api
        .import_leads(args.first().map(String::as_str))
        .await;

    println!("{}", response.message);

    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}
