use std::sync::LazyLock;

use regex::Regex;

use crate::types::ProblemCoordinate;

/// Problem URL shapes, tried in order. The first match wins.
static PROBLEM_URL_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"/contest/(\d+)/problem/([A-Za-z]+\d*)(?:[/?#]|$)").unwrap(),
        Regex::new(r"/problemset/problem/(\d+)/([A-Za-z]+\d*)(?:[/?#]|$)").unwrap(),
        Regex::new(r"/gym/(\d+)/problem/([A-Za-z]+\d*)(?:[/?#]|$)").unwrap(),
    ]
});

static CONTEST_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?:contest|gym)/(\d+)(?:[/?#]|$)").unwrap());

static CONTEST_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

static PROBLEM_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([A-Za-z]+\d*)$").unwrap());

/// Resolve a problem URL to its coordinate.
///
/// The index is normalized to upper case, so `.../problem/b2` and
/// `.../problem/B2` both yield index `B2`.
pub fn resolve(url: &str) -> Option<ProblemCoordinate> {
    let url = url.trim();
    PROBLEM_URL_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .map(|caps| ProblemCoordinate::new(&caps[1], caps[2].to_ascii_uppercase()))
}

/// Resolve a bare contest ID or a contest/gym URL to the contest ID.
pub fn resolve_contest(input: &str) -> Option<String> {
    let input = input.trim();
    if CONTEST_ID_RE.is_match(input) {
        return Some(input.to_string());
    }
    CONTEST_URL_RE
        .captures(input)
        .map(|caps| caps[1].to_string())
}

/// Split a compact problem code such as `1000B2` into its coordinate.
pub fn parse_problem_code(code: &str) -> Option<ProblemCoordinate> {
    PROBLEM_CODE_RE
        .captures(code.trim())
        .map(|caps| ProblemCoordinate::new(&caps[1], caps[2].to_ascii_uppercase()))
}

/// Inclusive run of single-letter indices, e.g. `A..=D`.
pub fn index_range(from: &str, to: &str) -> Option<Vec<String>> {
    let start = single_letter(from)?;
    let end = single_letter(to)?;
    if start > end {
        return None;
    }
    Some((start..=end).map(|c| c.to_string()).collect())
}

fn single_letter(index: &str) -> Option<char> {
    let mut chars = index.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}
