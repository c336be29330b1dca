use chrono::{DateTime, Utc};
use serde::Serialize;

/// 学生的一条提交记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRecord {
    pub learner_id: i64,
    pub assignment_id: i64,
    pub submission: Submission,
}

/// 提交内容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    // 提交时间
    pub submitted_at: DateTime<Utc>,
    // 原始得分
    pub score: f64,
}

impl SubmissionRecord {
    pub fn new(
        learner_id: i64,
        assignment_id: i64,
        submitted_at: DateTime<Utc>,
        score: f64,
    ) -> Self {
        Self {
            learner_id,
            assignment_id,
            submission: Submission {
                submitted_at,
                score,
            },
        }
    }

    /// 是否晚于截止时间提交（严格晚于）
    pub fn is_late(&self, due_at: DateTime<Utc>) -> bool {
        self.submission.submitted_at > due_at
    }
}
