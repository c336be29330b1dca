pub mod assignments;
pub mod courses;
pub mod learners;
pub mod submissions;

pub use assignments::entities::{Assignment, AssignmentGroup};
pub use courses::entities::Course;
pub use learners::responses::{AssignmentScore, LearnerResult};
pub use submissions::entities::{Submission, SubmissionRecord};
