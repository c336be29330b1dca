use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// 单个作业的百分制得分
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignmentScore {
    pub assignment_id: i64,
    pub percentage: f64,
}

/// 学生成绩汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearnerResult {
    // 学生 ID
    pub id: i64,
    // 加权平均分（百分制）
    pub avg: f64,
    // 各作业得分，按作业组内顺序排列
    #[serde(serialize_with = "serialize_scores")]
    pub scores: Vec<AssignmentScore>,
}

impl LearnerResult {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            avg: 0.0,
            scores: Vec::new(),
        }
    }

    /// 查询某个作业的得分
    pub fn score_for(&self, assignment_id: i64) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.assignment_id == assignment_id)
            .map(|s| s.percentage)
    }

    /// 按指定小数位数四舍五入（仅用于展示）
    ///
    /// 位数过大导致缩放溢出时保留原值。
    pub fn rounded(&self, precision: u32) -> Self {
        let factor = i32::try_from(precision).map_or(f64::INFINITY, |p| 10f64.powi(p));
        let round = |v: f64| {
            let scaled = (v * factor).round() / factor;
            if scaled.is_finite() { scaled } else { v }
        };
        Self {
            id: self.id,
            avg: round(self.avg),
            scores: self
                .scores
                .iter()
                .map(|s| AssignmentScore {
                    assignment_id: s.assignment_id,
                    percentage: round(s.percentage),
                })
                .collect(),
        }
    }
}

/// 序列化为以作业 ID 为键的有序 JSON 对象
fn serialize_scores<S>(scores: &[AssignmentScore], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(scores.len()))?;
    for score in scores {
        map.serialize_entry(&score.assignment_id.to_string(), &score.percentage)?;
    }
    map.end()
}
