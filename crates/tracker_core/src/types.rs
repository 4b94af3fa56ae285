use std::fmt;
use std::hash::{Hash, Hasher};

/// Canonical `(contest, index)` address of a problem on the platform.
///
/// Contest IDs compare exactly, indices compare ASCII case-insensitively.
#[derive(Debug, Clone, Eq)]
pub struct ProblemCoordinate {
    contest_id: String,
    index: String,
}

impl ProblemCoordinate {
    pub fn new(contest_id: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            contest_id: contest_id.into(),
            index: index.into(),
        }
    }

    pub fn contest_id(&self) -> &str {
        &self.contest_id
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// True when `contest_id`/`index` address this coordinate.
    pub fn matches(&self, contest_id: &str, index: &str) -> bool {
        self.contest_id == contest_id && self.index.eq_ignore_ascii_case(index)
    }
}

impl PartialEq for ProblemCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.contest_id, &other.index)
    }
}

impl Hash for ProblemCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.contest_id.hash(state);
        for byte in self.index.bytes() {
            state.write_u8(byte.to_ascii_uppercase());
        }
    }
}

impl fmt::Display for ProblemCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.contest_id, self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemMetadata {
    pub name: String,
    /// Difficulty rating, 0 when the platform has not rated the problem.
    pub rating: u32,
    pub coordinate: ProblemCoordinate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub coordinate: ProblemCoordinate,
    /// Platform verdict; empty while the submission is still waiting to be judged.
    pub verdict: String,
}

impl Submission {
    pub fn new(coordinate: ProblemCoordinate, verdict: impl Into<String>) -> Self {
        Self {
            coordinate,
            verdict: verdict.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContestProblem {
    pub coordinate: ProblemCoordinate,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

/// Structured problem statement.
///
/// `None` means the section was not present in the markup; `Some("")` means
/// the section was present but had no content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProblemContent {
    pub name: Option<String>,
    pub time_limit: Option<String>,
    pub memory_limit: Option<String>,
    pub statement: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub notes: Option<String>,
    pub tests: Vec<TestCase>,
    /// Absolute image URLs in document order, first occurrence only.
    pub images: Vec<String>,
}
