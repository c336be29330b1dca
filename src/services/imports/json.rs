//! 将原始 JSON 文档解码为领域模型
//!
//! 课程、作业组和提交列表的结构错误是致命的（ShapeError）；
//! 单个作业的数据错误只会跳过该作业并告警。
//! 分值超出 [`MAX_SCORE_MAGNITUDE`] 的作业或提交记录同样跳过并告警，
//! 保证累计总分不会溢出为无穷大。

use serde_json::{Map, Value};

use super::ImportedInputs;
use crate::errors::{GradebookError, Result};
use crate::models::{Assignment, AssignmentGroup, Course, SubmissionRecord};
use crate::services::grades::{GradingDiagnostics, GradingWarning};
use crate::utils::parse_timestamp;

type FieldResult<T> = std::result::Result<T, String>;

/// 满分与得分允许的最大绝对值
pub const MAX_SCORE_MAGNITUDE: f64 = 1e12;

pub fn parse_course(value: &Value) -> Result<Course> {
    let obj = value
        .as_object()
        .ok_or_else(|| GradebookError::shape("课程必须是 JSON 对象"))?;
    let id = id_field(obj, "id").map_err(|reason| GradebookError::shape(format!("课程{reason}")))?;

    Ok(Course {
        id,
        name: string_field(obj, "name"),
    })
}

pub fn parse_assignment_group(
    value: &Value,
    diagnostics: &dyn GradingDiagnostics,
) -> Result<AssignmentGroup> {
    let obj = value
        .as_object()
        .ok_or_else(|| GradebookError::shape("作业组必须是 JSON 对象"))?;
    let id = id_field(obj, "id").map_err(|reason| GradebookError::shape(format!("作业组{reason}")))?;
    let course_id = id_field(obj, "course_id")
        .map_err(|reason| GradebookError::shape(format!("作业组{reason}")))?;
    let raw_assignments = obj
        .get("assignments")
        .and_then(Value::as_array)
        .ok_or_else(|| GradebookError::shape("作业组的 `assignments` 必须是数组"))?;

    let mut assignments = Vec::with_capacity(raw_assignments.len());
    for (index, raw) in raw_assignments.iter().enumerate() {
        match parse_assignment(raw) {
            Ok(assignment) => assignments.push(assignment),
            Err(reason) => diagnostics.warn(GradingWarning::MalformedAssignment { index, reason }),
        }
    }

    Ok(AssignmentGroup {
        id,
        name: string_field(obj, "name"),
        course_id,
        group_weight: obj
            .get("group_weight")
            .and_then(Value::as_f64)
            .unwrap_or_default(),
        assignments,
    })
}

pub fn parse_submissions(
    value: &Value,
    diagnostics: &dyn GradingDiagnostics,
) -> Result<Vec<SubmissionRecord>> {
    let raw_submissions = value
        .as_array()
        .ok_or_else(|| GradebookError::shape("提交记录必须是数组"))?;

    let mut submissions = Vec::with_capacity(raw_submissions.len());
    for (index, raw) in raw_submissions.iter().enumerate() {
        let record = parse_submission(raw).map_err(|reason| {
            GradebookError::shape(format!("第 {index} 条提交记录无效: {reason}"))
        })?;

        let score = record.submission.score;
        if score.abs() > MAX_SCORE_MAGNITUDE {
            diagnostics.warn(GradingWarning::UnrealisticScore {
                index,
                learner_id: record.learner_id,
                assignment_id: record.assignment_id,
                score,
            });
            continue;
        }
        submissions.push(record);
    }
    Ok(submissions)
}

/// 解析包含 `course`、`assignment_group`、`learner_submissions` 的单个文档
pub fn parse_bundle(value: &Value, diagnostics: &dyn GradingDiagnostics) -> Result<ImportedInputs> {
    let obj = value
        .as_object()
        .ok_or_else(|| GradebookError::shape("输入文档必须是 JSON 对象"))?;
    let section = |key: &str| {
        obj.get(key)
            .ok_or_else(|| GradebookError::shape(format!("输入文档缺少 `{key}`")))
    };

    Ok(ImportedInputs {
        course: parse_course(section("course")?)?,
        group: parse_assignment_group(section("assignment_group")?, diagnostics)?,
        submissions: parse_submissions(section("learner_submissions")?, diagnostics)?,
    })
}

fn parse_assignment(value: &Value) -> FieldResult<Assignment> {
    let obj = value.as_object().ok_or("作业必须是 JSON 对象")?;
    let due_at = obj
        .get("due_at")
        .and_then(Value::as_str)
        .ok_or("缺少字段 `due_at`")?;
    let points_possible = number_field(obj, "points_possible")?;
    if points_possible > MAX_SCORE_MAGNITUDE {
        return Err(format!("满分超出允许范围: {points_possible}"));
    }

    Ok(Assignment {
        id: id_field(obj, "id")?,
        name: string_field(obj, "name"),
        due_at: parse_timestamp(due_at).map_err(|e| e.message().to_string())?,
        points_possible,
    })
}

fn parse_submission(value: &Value) -> FieldResult<SubmissionRecord> {
    let obj = value.as_object().ok_or("提交记录必须是 JSON 对象")?;
    let submission = obj
        .get("submission")
        .and_then(Value::as_object)
        .ok_or("缺少对象字段 `submission`")?;
    let submitted_at = submission
        .get("submitted_at")
        .and_then(Value::as_str)
        .ok_or("缺少字段 `submitted_at`")?;

    Ok(SubmissionRecord::new(
        id_field(obj, "learner_id")?,
        id_field(obj, "assignment_id")?,
        parse_timestamp(submitted_at).map_err(|e| e.message().to_string())?,
        number_field(submission, "score")?,
    ))
}

fn id_field(obj: &Map<String, Value>, key: &str) -> FieldResult<i64> {
    let value = obj.get(key).ok_or_else(|| format!("缺少字段 `{key}`"))?;
    value
        .as_i64()
        .or_else(|| {
            // 允许 201.0 这类整数值浮点
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or_else(|| format!("字段 `{key}` 不是整数: {value}"))
}

fn number_field(obj: &Map<String, Value>, key: &str) -> FieldResult<f64> {
    let value = obj.get(key).ok_or_else(|| format!("缺少字段 `{key}`"))?;
    value
        .as_f64()
        .ok_or_else(|| format!("字段 `{key}` 不是数字: {value}"))
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
