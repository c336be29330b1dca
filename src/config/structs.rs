use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub grading: GradingConfig,
    pub output: OutputConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 评分配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    pub late_penalty_ratio: f64, // 迟交扣分比例
    #[serde(default)] // 固定评估时间（RFC 3339），为空时使用当前时间
    pub evaluation_time: Option<String>,
}

/// 输出小数位数上限（f64 有效数字约 15 位）
pub const MAX_OUTPUT_PRECISION: u32 = 15;

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
    #[serde(default)] // 输出时保留的小数位数，不设置则原样输出
    pub precision: Option<u32>,
}
