use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 文档 / 问答服务地址
    pub api_base_url: String,
    /// 单个请求的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 删除前是否需要确认
    pub confirm_deletes: bool,
    /// 交叉核对时建议的最大文档数（超过只告警，不拒绝）
    pub cross_check_soft_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            verbose_logging: false,
            confirm_deletes: true,
            cross_check_soft_limit: 5,
        }
    }
}

impl Config {
    /// 读取 `DOCQA_CONFIG` 指向的 TOML 文件（如果有），再叠加环境变量
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("DOCQA_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// 只从环境变量构建（未设置的项使用默认值）
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，缺失的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("无法读取配置文件 {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content)?;
        if config.api_base_url.trim().is_empty() {
            return Err(AppError::Config("api_base_url 不能为空".to_string()));
        }
        Ok(config)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            api_base_url: std::env::var("DOCQA_API_BASE_URL").unwrap_or(self.api_base_url),
            request_timeout_secs: env_parse("DOCQA_REQUEST_TIMEOUT_SECS").unwrap_or(self.request_timeout_secs),
            verbose_logging: env_parse("DOCQA_VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
            confirm_deletes: env_parse("DOCQA_CONFIRM_DELETES").unwrap_or(self.confirm_deletes),
            cross_check_soft_limit: env_parse("DOCQA_CROSS_CHECK_SOFT_LIMIT").unwrap_or(self.cross_check_soft_limit),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
