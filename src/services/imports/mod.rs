pub mod files;
pub mod json;

use crate::models::{AssignmentGroup, Course, SubmissionRecord};

pub use files::{load_bundle, load_inputs, read_json};
pub use json::{parse_assignment_group, parse_bundle, parse_course, parse_submissions};

/// 一次汇总所需的全部输入
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedInputs {
    pub course: Course,
    pub group: AssignmentGroup,
    pub submissions: Vec<SubmissionRecord>,
}
