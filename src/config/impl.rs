use chrono::{DateTime, Utc};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use std::sync::OnceLock;

use super::{AppConfig, MAX_OUTPUT_PRECISION};
use crate::errors::{GradebookError, Result};
use crate::services::grades::{DEFAULT_LATE_PENALTY_RATIO, GradingPolicy};
use crate::utils::parse_timestamp;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 内置默认值
    fn defaults() -> std::result::Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.system_name", "Gradebook")?
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("grading.late_penalty_ratio", DEFAULT_LATE_PENALTY_RATIO)?
            .set_default("output.pretty", true)
    }

    /// 加载配置
    pub fn load() -> std::result::Result<Self, ConfigError> {
        let builder = Self::defaults()?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖，如 GRADEBOOK_GRADING__LATE_PENALTY_RATIO
            .add_source(
                Environment::with_prefix("GRADEBOOK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?;

        builder.build()?.try_deserialize()
    }

    /// 从 TOML 文本加载（叠加在默认值之上）
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> std::result::Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 构建评分策略，扣分比例无效时返回错误
    pub fn grading_policy(&self) -> Result<GradingPolicy> {
        GradingPolicy::new(self.grading.late_penalty_ratio)
    }

    /// 输出小数位数，超过上限时返回错误
    pub fn output_precision(&self) -> Result<Option<u32>> {
        match self.output.precision {
            Some(p) if p > MAX_OUTPUT_PRECISION => Err(GradebookError::validation(format!(
                "输出小数位数不能超过 {MAX_OUTPUT_PRECISION}: {p}"
            ))),
            precision => Ok(precision),
        }
    }

    /// 配置中的固定评估时间
    pub fn evaluation_time(&self) -> Result<Option<DateTime<Utc>>> {
        self.grading
            .evaluation_time
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(parse_timestamp)
            .transpose()
    }
}
