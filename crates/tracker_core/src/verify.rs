use std::collections::HashSet;

use crate::types::{ProblemCoordinate, Submission};

/// Verdict the platform reports for an accepted submission.
pub const ACCEPTED_VERDICT: &str = "OK";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttemptSummary {
    pub attempts: usize,
    pub accepted: usize,
}

impl AttemptSummary {
    pub fn solved(&self) -> bool {
        self.accepted > 0
    }
}

/// True when at least one submission for `coordinate` was accepted.
///
/// Rejected attempts on the same problem do not stop the scan; order of the
/// history does not matter.
pub fn is_solved(coordinate: &ProblemCoordinate, submissions: &[Submission]) -> bool {
    submissions
        .iter()
        .any(|s| s.coordinate == *coordinate && s.verdict == ACCEPTED_VERDICT)
}

/// Every coordinate with at least one accepted submission.
pub fn solved_coordinates(submissions: &[Submission]) -> HashSet<ProblemCoordinate> {
    submissions
        .iter()
        .filter(|s| s.verdict == ACCEPTED_VERDICT)
        .map(|s| s.coordinate.clone())
        .collect()
}

pub fn attempt_summary(coordinate: &ProblemCoordinate, submissions: &[Submission]) -> AttemptSummary {
    submissions
        .iter()
        .filter(|s| s.coordinate == *coordinate)
        .fold(AttemptSummary::default(), |mut summary, s| {
            summary.attempts += 1;
            if s.verdict == ACCEPTED_VERDICT {
                summary.accepted += 1;
            }
            summary
        })
}
