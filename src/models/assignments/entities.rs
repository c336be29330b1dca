use chrono::{DateTime, Utc};
use serde::Serialize;

/// 作业组，归属于某个课程
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentGroup {
    // 唯一 ID
    pub id: i64,
    // 作业组名称
    pub name: String,
    // 所属课程 ID
    pub course_id: i64,
    // 作业组权重（仅作描述，不参与单组内的平均分计算）
    pub group_weight: f64,
    // 组内作业，按给定顺序处理
    pub assignments: Vec<Assignment>,
}

/// 单个作业
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 作业名称
    pub name: String,
    // 截止时间
    pub due_at: DateTime<Utc>,
    // 满分
    pub points_possible: f64,
}

impl Assignment {
    /// 截止时间是否晚于评估时间
    pub fn is_due_after(&self, now: DateTime<Utc>) -> bool {
        self.due_at > now
    }

    /// 满分是否为有效正数
    pub fn has_valid_points(&self) -> bool {
        self.points_possible.is_finite() && self.points_possible > 0.0
    }
}
