//! 非致命告警通道
//!
//! 跳过的作业等可恢复问题通过调用方提供的通道上报，不混入返回结果。

use std::cell::RefCell;
use std::fmt;

use tracing::warn;

use crate::errors::GradebookError;

/// 可恢复的数据问题
#[derive(Debug, Clone, PartialEq)]
pub enum GradingWarning {
    /// 满分为 0、负数或非有限数，该作业对所有学生跳过
    InvalidPoints {
        assignment_id: i64,
        points_possible: f64,
    },
    /// 作业数据格式错误，导入时跳过
    MalformedAssignment { index: usize, reason: String },
    /// 得分绝对值过大，导入时跳过该提交记录
    UnrealisticScore {
        index: usize,
        learner_id: i64,
        assignment_id: i64,
        score: f64,
    },
}

impl GradingWarning {
    /// 转换为对应的错误值，便于统一格式化输出
    pub fn to_error(&self) -> GradebookError {
        GradebookError::assignment_data(self.to_string())
    }
}

impl fmt::Display for GradingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradingWarning::InvalidPoints {
                assignment_id,
                points_possible,
            } => write!(
                f,
                "Skipping assignment {assignment_id} due to invalid points_possible ({points_possible})"
            ),
            GradingWarning::MalformedAssignment { index, reason } => {
                write!(f, "Skipping malformed assignment at index {index}: {reason}")
            }
            GradingWarning::UnrealisticScore {
                index,
                learner_id,
                assignment_id,
                score,
            } => write!(
                f,
                "Skipping submission at index {index} (learner {learner_id}, assignment {assignment_id}): score {score} out of range"
            ),
        }
    }
}

pub trait GradingDiagnostics {
    fn warn(&self, warning: GradingWarning);
}

/// 通过 tracing 输出告警
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl GradingDiagnostics for TracingDiagnostics {
    fn warn(&self, warning: GradingWarning) {
        match &warning {
            GradingWarning::InvalidPoints {
                assignment_id,
                points_possible,
            } => warn!(
                assignment_id = *assignment_id,
                points_possible = *points_possible,
                code = warning.to_error().code(),
                "{}",
                warning
            ),
            GradingWarning::MalformedAssignment { index, .. } => warn!(
                index = *index,
                code = warning.to_error().code(),
                "{}",
                warning
            ),
            GradingWarning::UnrealisticScore {
                index,
                learner_id,
                assignment_id,
                ..
            } => warn!(
                index = *index,
                learner_id = *learner_id,
                assignment_id = *assignment_id,
                code = warning.to_error().code(),
                "{}",
                warning
            ),
        }
    }
}

/// 收集告警，供调用方在运行结束后检查
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    warnings: RefCell<Vec<GradingWarning>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<GradingWarning> {
        self.warnings.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }
}

impl GradingDiagnostics for CollectingDiagnostics {
    fn warn(&self, warning: GradingWarning) {
        self.warnings.borrow_mut().push(warning);
    }
}
