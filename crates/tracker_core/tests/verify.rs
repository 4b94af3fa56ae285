use tracker_core::{
    attempt_summary, is_solved, solved_coordinates, ProblemCoordinate, Submission,
};

fn submission(contest: &str, index: &str, verdict: &str) -> Submission {
    Submission::new(ProblemCoordinate::new(contest, index), verdict)
}

#[test]
fn accepted_after_wrong_answer_counts_as_solved() {
    let target = ProblemCoordinate::new("1000", "B");
    let history = vec![
        submission("1000", "B", "WRONG_ANSWER"),
        submission("1000", "B", "OK"),
    ];
    assert!(is_solved(&target, &history));
    assert!(!is_solved(&target, &history[..1]));
    assert!(!is_solved(&target, &[]));
}

#[test]
fn index_matches_case_insensitively_but_contest_exactly() {
    let history = vec![submission("1000", "b", "OK")];
    assert!(is_solved(&ProblemCoordinate::new("1000", "B"), &history));
    assert!(!is_solved(&ProblemCoordinate::new("100", "B"), &history));
    assert!(!is_solved(&ProblemCoordinate::new("10000", "B"), &history));
}

#[test]
fn verdict_must_be_exactly_accepted() {
    let target = ProblemCoordinate::new("5", "A");
    for verdict in ["ok", "OK ", "ACCEPTED", "", "TESTING"] {
        assert!(!is_solved(&target, &[submission("5", "A", verdict)]), "{verdict:?}");
    }
}

#[test]
fn solved_set_collects_each_accepted_problem_once() {
    let history = vec![
        submission("7", "A", "OK"),
        submission("7", "a", "OK"),
        submission("7", "B", "TIME_LIMIT_EXCEEDED"),
        submission("8", "C", "OK"),
    ];
    let solved = solved_coordinates(&history);
    assert_eq!(solved.len(), 2);
    assert!(solved.contains(&ProblemCoordinate::new("7", "A")));
    assert!(solved.contains(&ProblemCoordinate::new("8", "C")));
    assert!(!solved.contains(&ProblemCoordinate::new("7", "B")));
}

#[test]
fn attempt_summary_counts_every_try() {
    let history = vec![
        submission("9", "D", "WRONG_ANSWER"),
        submission("9", "D", "COMPILATION_ERROR"),
        submission("9", "E", "OK"),
        submission("9", "D", "OK"),
    ];
    let summary = attempt_summary(&ProblemCoordinate::new("9", "D"), &history);
    assert_eq!(summary.attempts, 3);
    assert_eq!(summary.accepted, 1);
    assert!(summary.solved());

    let untouched = attempt_summary(&ProblemCoordinate::new("9", "F"), &history);
    assert_eq!(untouched.attempts, 0);
    assert!(!untouched.solved());
}
