use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::errors::{GradebookError, Result};

/// 解析时间戳
///
/// 支持以下格式：
/// - RFC 3339（如 `2025-01-01T23:59:59Z`、`2025-01-01T23:59:59+08:00`）
/// - 无时区的 `YYYY-MM-DDTHH:MM:SS`，按 UTC 处理
/// - 仅日期 `YYYY-MM-DD`，按 UTC 零点处理
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }

    if let Some(naive) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }

    Err(GradebookError::date_parse(format!("无法解析时间: {value}")))
}
