//! 学生加权平均分汇总

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::diagnostics::{GradingDiagnostics, GradingWarning};
use super::policy::GradingPolicy;
use crate::errors::{GradebookError, Result};
use crate::models::{
    Assignment, AssignmentGroup, AssignmentScore, Course, LearnerResult, SubmissionRecord,
};

type SubmissionIndex<'a> = HashMap<(i64, i64), &'a SubmissionRecord>;

/// 汇总每个学生的作业得分与加权平均分
///
/// - 作业组必须属于给定课程，否则直接失败，不返回任何部分结果
/// - 截止时间晚于 `now` 的作业完全不计入
/// - 满分无效的作业对所有学生跳过，并通过 `diagnostics` 告警一次
/// - 缺交按 0 分计入，迟交按策略固定扣分，调整后的得分不小于 0
///
/// 结果按学生在提交列表中首次出现的顺序排列。
pub fn aggregate(
    course: &Course,
    group: &AssignmentGroup,
    submissions: &[SubmissionRecord],
    now: DateTime<Utc>,
    policy: &GradingPolicy,
    diagnostics: &dyn GradingDiagnostics,
) -> Result<Vec<LearnerResult>> {
    if group.course_id != course.id {
        return Err(GradebookError::referential(format!(
            "作业组 {} 属于课程 {}，与给定课程 {} 不匹配",
            group.id, group.course_id, course.id
        )));
    }

    let eligible = eligible_assignments(group, now, diagnostics);
    let index = index_submissions(submissions);
    let learners = learner_order(submissions);

    debug!(
        course_id = course.id,
        group_id = group.id,
        eligible = eligible.len(),
        total = group.assignments.len(),
        learners = learners.len(),
        "Aggregating learner grades"
    );

    Ok(learners
        .into_iter()
        .map(|learner_id| grade_learner(learner_id, &eligible, &index, policy))
        .collect())
}

/// 筛选已截止且满分有效的作业，保持组内顺序
fn eligible_assignments<'a>(
    group: &'a AssignmentGroup,
    now: DateTime<Utc>,
    diagnostics: &dyn GradingDiagnostics,
) -> Vec<&'a Assignment> {
    group
        .assignments
        .iter()
        .filter(|assignment| {
            if assignment.is_due_after(now) {
                debug!(
                    assignment_id = assignment.id,
                    due_at = %assignment.due_at,
                    "Assignment not yet due, excluded"
                );
                return false;
            }
            if !assignment.has_valid_points() {
                diagnostics.warn(GradingWarning::InvalidPoints {
                    assignment_id: assignment.id,
                    points_possible: assignment.points_possible,
                });
                return false;
            }
            true
        })
        .collect()
}

/// 按 (学生, 作业) 建立索引，重复记录保留第一条
fn index_submissions(submissions: &[SubmissionRecord]) -> SubmissionIndex<'_> {
    let mut index = HashMap::with_capacity(submissions.len());
    for record in submissions {
        index
            .entry((record.learner_id, record.assignment_id))
            .or_insert(record);
    }
    index
}

/// 按首次出现顺序去重的学生 ID
fn learner_order(submissions: &[SubmissionRecord]) -> Vec<i64> {
    let mut seen = HashSet::new();
    submissions
        .iter()
        .map(|record| record.learner_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

fn grade_learner(
    learner_id: i64,
    eligible: &[&Assignment],
    index: &SubmissionIndex<'_>,
    policy: &GradingPolicy,
) -> LearnerResult {
    let mut result = LearnerResult::new(learner_id);
    let mut total_weighted_score = 0.0;
    let mut total_points_possible = 0.0;

    for assignment in eligible {
        let adjusted = match index.get(&(learner_id, assignment.id)) {
            Some(record) => policy.adjusted_score(
                record.submission.score,
                assignment.points_possible,
                record.is_late(assignment.due_at),
            ),
            // 缺交：计 0 分，但满分仍计入分母
            None => 0.0,
        };

        result.scores.push(AssignmentScore {
            assignment_id: assignment.id,
            percentage: adjusted / assignment.points_possible * 100.0,
        });
        total_weighted_score += adjusted;
        total_points_possible += assignment.points_possible;
    }

    result.avg = if total_points_possible > 0.0 {
        total_weighted_score / total_points_possible * 100.0
    } else {
        0.0
    };
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::grades::diagnostics::CollectingDiagnostics;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn now() -> DateTime<Utc> {
        at(2025, 6, 1, 0)
    }

    fn assignment(id: i64, due_at: DateTime<Utc>, points_possible: f64) -> Assignment {
        Assignment {
            id,
            name: format!("Assignment {id}"),
            due_at,
            points_possible,
        }
    }

    fn course() -> Course {
        Course::new(1, "JavaScript Basics")
    }

    fn group(assignments: Vec<Assignment>) -> AssignmentGroup {
        AssignmentGroup {
            id: 101,
            name: "Group 1".to_string(),
            course_id: 1,
            group_weight: 50.0,
            assignments,
        }
    }

    fn run(
        group: &AssignmentGroup,
        submissions: &[SubmissionRecord],
    ) -> (Vec<LearnerResult>, CollectingDiagnostics) {
        let diagnostics = CollectingDiagnostics::new();
        let results = aggregate(
            &course(),
            group,
            submissions,
            now(),
            &GradingPolicy::default(),
            &diagnostics,
        )
        .unwrap();
        (results, diagnostics)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_on_time_and_late_submissions() {
        let group = group(vec![
            assignment(201, at(2025, 1, 1, 23), 100.0),
            assignment(202, at(2025, 2, 1, 23), 200.0),
        ]);
        let submissions = vec![
            SubmissionRecord::new(1, 201, at(2025, 1, 1, 12), 90.0),
            SubmissionRecord::new(1, 202, at(2025, 2, 2, 12), 180.0),
        ];

        let (results, diagnostics) = run(&group, &submissions);

        assert_eq!(results.len(), 1);
        let learner = &results[0];
        assert_eq!(learner.id, 1);
        assert_close(learner.score_for(201).unwrap(), 90.0);
        assert_close(learner.score_for(202).unwrap(), 80.0);
        assert_close(learner.avg, 250.0 / 300.0 * 100.0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_course_mismatch_fails() {
        let mut group = group(vec![assignment(201, at(2025, 1, 1, 23), 100.0)]);
        group.course_id = 2;
        let submissions = vec![SubmissionRecord::new(1, 201, at(2025, 1, 1, 12), 90.0)];

        let err = aggregate(
            &course(),
            &group,
            &submissions,
            now(),
            &GradingPolicy::default(),
            &CollectingDiagnostics::new(),
        )
        .unwrap_err();

        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_missing_submission_counts_as_zero() {
        let group = group(vec![
            assignment(201, at(2025, 1, 1, 23), 100.0),
            assignment(202, at(2025, 2, 1, 23), 100.0),
        ]);
        let submissions = vec![SubmissionRecord::new(1, 201, at(2025, 1, 1, 12), 80.0)];

        let (results, _) = run(&group, &submissions);

        assert_eq!(results[0].score_for(202), Some(0.0));
        assert_close(results[0].avg, 40.0);
    }

    #[test]
    fn test_late_penalty_never_negative() {
        let group = group(vec![assignment(201, at(2025, 1, 1, 23), 100.0)]);
        let submissions = vec![SubmissionRecord::new(1, 201, at(2025, 1, 3, 0), 4.0)];

        let (results, _) = run(&group, &submissions);

        assert_eq!(results[0].score_for(201), Some(0.0));
        assert_eq!(results[0].avg, 0.0);
    }

    #[test]
    fn test_submission_at_deadline_is_not_late() {
        let due = at(2025, 1, 1, 23);
        let group = group(vec![assignment(201, due, 100.0)]);
        let submissions = vec![SubmissionRecord::new(1, 201, due, 70.0)];

        let (results, _) = run(&group, &submissions);

        assert_close(results[0].score_for(201).unwrap(), 70.0);
    }

    #[test]
    fn test_zero_points_skipped_with_single_warning() {
        let group = group(vec![
            assignment(201, at(2025, 1, 1, 23), 100.0),
            assignment(202, at(2025, 2, 1, 23), 0.0),
        ]);
        let submissions = vec![
            SubmissionRecord::new(1, 201, at(2025, 1, 1, 12), 90.0),
            SubmissionRecord::new(2, 201, at(2025, 1, 1, 12), 60.0),
            SubmissionRecord::new(2, 202, at(2025, 1, 1, 12), 10.0),
        ];

        let (results, diagnostics) = run(&group, &submissions);

        for learner in &results {
            assert_eq!(learner.score_for(202), None);
            assert_eq!(learner.scores.len(), 1);
        }
        assert_close(results[0].avg, 90.0);
        assert_close(results[1].avg, 60.0);
        assert_eq!(
            diagnostics.warnings(),
            vec![GradingWarning::InvalidPoints {
                assignment_id: 202,
                points_possible: 0.0,
            }]
        );
    }

    #[test]
    fn test_future_assignment_excluded() {
        let group = group(vec![
            assignment(201, at(2025, 1, 1, 23), 100.0),
            assignment(203, at(2026, 1, 1, 0), 500.0),
        ]);
        let submissions = vec![
            SubmissionRecord::new(1, 201, at(2025, 1, 1, 12), 50.0),
            SubmissionRecord::new(1, 203, at(2025, 5, 1, 0), 500.0),
        ];

        let (results, diagnostics) = run(&group, &submissions);

        assert_eq!(results[0].score_for(203), None);
        assert_close(results[0].avg, 50.0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_future_assignment_with_zero_points_is_silent() {
        let group = group(vec![assignment(203, at(2026, 1, 1, 0), 0.0)]);
        let submissions = vec![SubmissionRecord::new(1, 203, at(2025, 5, 1, 0), 5.0)];

        let (_, diagnostics) = run(&group, &submissions);

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_no_eligible_assignments_average_is_zero() {
        let group = group(vec![assignment(203, at(2026, 1, 1, 0), 100.0)]);
        let submissions = vec![SubmissionRecord::new(9, 203, at(2025, 5, 1, 0), 80.0)];

        let (results, _) = run(&group, &submissions);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].avg, 0.0);
        assert!(results[0].scores.is_empty());
    }

    #[test]
    fn test_learner_order_is_first_appearance() {
        let group = group(vec![
            assignment(201, at(2025, 1, 1, 23), 100.0),
            assignment(202, at(2025, 2, 1, 23), 100.0),
        ]);
        let submissions = vec![
            SubmissionRecord::new(3, 201, at(2025, 1, 1, 12), 10.0),
            SubmissionRecord::new(1, 201, at(2025, 1, 1, 12), 20.0),
            SubmissionRecord::new(3, 202, at(2025, 1, 1, 12), 30.0),
            SubmissionRecord::new(2, 202, at(2025, 1, 1, 12), 40.0),
        ];

        let (results, _) = run(&group, &submissions);

        let ids: Vec<i64> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        let order: Vec<i64> = results[0].scores.iter().map(|s| s.assignment_id).collect();
        assert_eq!(order, vec![201, 202]);
    }

    #[test]
    fn test_duplicate_submission_uses_first() {
        let group = group(vec![assignment(201, at(2025, 1, 1, 23), 100.0)]);
        let submissions = vec![
            SubmissionRecord::new(1, 201, at(2025, 1, 1, 12), 55.0),
            SubmissionRecord::new(1, 201, at(2025, 1, 1, 13), 95.0),
        ];

        let (results, _) = run(&group, &submissions);

        assert_eq!(results.len(), 1);
        assert_close(results[0].score_for(201).unwrap(), 55.0);
    }

    #[test]
    fn test_percentage_not_clamped_above_hundred() {
        let group = group(vec![assignment(201, at(2025, 1, 1, 23), 50.0)]);
        let submissions = vec![SubmissionRecord::new(1, 201, at(2025, 1, 1, 12), 60.0)];

        let (results, _) = run(&group, &submissions);

        assert_close(results[0].score_for(201).unwrap(), 120.0);
        assert_close(results[0].avg, 120.0);
    }

    #[test]
    fn test_empty_submissions_yield_no_results() {
        let group = group(vec![assignment(201, at(2025, 1, 1, 23), 100.0)]);

        let (results, _) = run(&group, &[]);

        assert!(results.is_empty());
    }

    #[test]
    fn test_custom_penalty_ratio() {
        let group = group(vec![assignment(201, at(2025, 1, 1, 23), 100.0)]);
        let submissions = vec![SubmissionRecord::new(1, 201, at(2025, 1, 2, 0), 90.0)];

        let results = aggregate(
            &course(),
            &group,
            &submissions,
            now(),
            &GradingPolicy::new(0.25).unwrap(),
            &CollectingDiagnostics::new(),
        )
        .unwrap();

        assert_close(results[0].avg, 65.0);
    }
}
