//! 单次汇总运行：加载输入、计算、序列化结果

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::errors::Result;
use crate::models::LearnerResult;
use crate::services::GradeService;
use crate::services::imports::{self, ImportedInputs};

/// 输入来源
#[derive(Debug, Clone)]
pub enum InputSource {
    /// 包含 course、assignment_group、learner_submissions 的单个文档
    Bundle(PathBuf),
    Separate {
        course: PathBuf,
        group: PathBuf,
        submissions: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct RunRequest {
    pub source: InputSource,
    // 评估时间，由调用方一次性确定
    pub now: DateTime<Utc>,
    pub pretty: bool,
    pub precision: Option<u32>,
}

/// 执行一次汇总，返回 JSON 文本
pub fn run(request: &RunRequest, service: &GradeService) -> Result<String> {
    let inputs = load(&request.source, service)?;

    let results = service.aggregate(
        &inputs.course,
        &inputs.group,
        &inputs.submissions,
        request.now,
    )?;

    info!(
        course_id = inputs.course.id,
        learners = results.len(),
        evaluated_at = %request.now,
        "Aggregated learner grades"
    );

    render(&results, request.pretty, request.precision)
}

fn load(source: &InputSource, service: &GradeService) -> Result<ImportedInputs> {
    match source {
        InputSource::Bundle(path) => imports::load_bundle(path, service.diagnostics()),
        InputSource::Separate {
            course,
            group,
            submissions,
        } => imports::load_inputs(course, group, submissions, service.diagnostics()),
    }
}

fn render(results: &[LearnerResult], pretty: bool, precision: Option<u32>) -> Result<String> {
    let results: Vec<LearnerResult> = match precision {
        Some(p) => results.iter().map(|r| r.rounded(p)).collect(),
        None => results.to_vec(),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };
    Ok(json)
}
