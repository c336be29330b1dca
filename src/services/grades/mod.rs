pub mod aggregate;
pub mod diagnostics;
pub mod policy;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::{AssignmentGroup, Course, LearnerResult, SubmissionRecord};

pub use diagnostics::{
    CollectingDiagnostics, GradingDiagnostics, GradingWarning, TracingDiagnostics,
};
pub use policy::{DEFAULT_LATE_PENALTY_RATIO, GradingPolicy};

pub struct GradeService {
    policy: GradingPolicy,
    diagnostics: Arc<dyn GradingDiagnostics>,
}

impl Default for GradeService {
    fn default() -> Self {
        Self::new(GradingPolicy::default())
    }
}

impl GradeService {
    /// 使用 tracing 告警通道创建
    pub fn new(policy: GradingPolicy) -> Self {
        Self {
            policy,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    pub fn with_diagnostics(
        policy: GradingPolicy,
        diagnostics: Arc<dyn GradingDiagnostics>,
    ) -> Self {
        Self {
            policy,
            diagnostics,
        }
    }

    pub fn diagnostics(&self) -> &dyn GradingDiagnostics {
        self.diagnostics.as_ref()
    }

    pub fn aggregate(
        &self,
        course: &Course,
        group: &AssignmentGroup,
        submissions: &[SubmissionRecord],
        now: DateTime<Utc>,
    ) -> Result<Vec<LearnerResult>> {
        aggregate::aggregate(
            course,
            group,
            submissions,
            now,
            &self.policy,
            self.diagnostics.as_ref(),
        )
    }
}
