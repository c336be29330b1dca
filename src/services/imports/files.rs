//! 从文件加载输入

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::ImportedInputs;
use super::json::{parse_assignment_group, parse_bundle, parse_course, parse_submissions};
use crate::errors::{GradebookError, Result};
use crate::services::grades::GradingDiagnostics;

pub fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        GradebookError::file_operation(format!("读取文件 {} 失败: {e}", path.display()))
    })?;
    let value = serde_json::from_str(&content).map_err(|e| {
        GradebookError::serialization(format!("解析 {} 失败: {e}", path.display()))
    })?;
    debug!("Loaded {} ({} bytes)", path.display(), content.len());
    Ok(value)
}

/// 从单个文档加载全部输入
pub fn load_bundle(path: &Path, diagnostics: &dyn GradingDiagnostics) -> Result<ImportedInputs> {
    parse_bundle(&read_json(path)?, diagnostics)
}

/// 从三个独立文件加载输入
pub fn load_inputs(
    course_path: &Path,
    group_path: &Path,
    submissions_path: &Path,
    diagnostics: &dyn GradingDiagnostics,
) -> Result<ImportedInputs> {
    Ok(ImportedInputs {
        course: parse_course(&read_json(course_path)?)?,
        group: parse_assignment_group(&read_json(group_path)?, diagnostics)?,
        submissions: parse_submissions(&read_json(submissions_path)?, diagnostics)?,
    })
}
