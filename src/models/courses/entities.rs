use serde::Serialize;

/// 课程
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    // 唯一 ID
    pub id: i64,
    // 课程名称
    pub name: String,
}

impl Course {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
