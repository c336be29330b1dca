use crate::errors::{GradebookError, Result};

/// 默认迟交扣分比例（满分的 10%）
pub const DEFAULT_LATE_PENALTY_RATIO: f64 = 0.1;

/// 评分策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradingPolicy {
    /// 迟交时按满分比例固定扣分，与迟交时长无关
    pub late_penalty_ratio: f64,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            late_penalty_ratio: DEFAULT_LATE_PENALTY_RATIO,
        }
    }
}

impl GradingPolicy {
    pub fn new(late_penalty_ratio: f64) -> Result<Self> {
        if !late_penalty_ratio.is_finite() || !(0.0..=1.0).contains(&late_penalty_ratio) {
            return Err(GradebookError::validation(format!(
                "迟交扣分比例必须在 0 到 1 之间: {late_penalty_ratio}"
            )));
        }
        Ok(Self { late_penalty_ratio })
    }

    /// 计算调整后的得分，结果不小于 0
    pub fn adjusted_score(&self, score: f64, points_possible: f64, is_late: bool) -> f64 {
        let penalty = if is_late {
            points_possible * self.late_penalty_ratio
        } else {
            0.0
        };
        (score - penalty).max(0.0)
    }
}
