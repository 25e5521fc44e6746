/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则按 `verbose` 选择 debug / info。重复调用无副作用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 文档问答客户端启动");
    info!("🌐 服务地址: {}", config.api_base_url);
    info!("⏱️ 请求超时: {} 秒", config.request_timeout_secs);
    info!("{}", "=".repeat(60));
}

/// 记录上传批次开始
///
/// # 参数
/// - `total`: 本批文件数量
pub fn log_batch_start(total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("📦 开始上传，共 {} 个文件（逐个顺序上传）", total);
    info!("{}", "─".repeat(60));
}

/// 记录上传批次结束
///
/// # 参数
/// - `uploaded`: 已确认上传成功的数量
/// - `total`: 本批文件数量
pub fn log_batch_complete(uploaded: usize, total: usize) {
    info!("{}", "─".repeat(60));
    info!("✓ 上传结束: 成功 {}/{}", uploaded, total);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
