//! Tracker core: pure problem resolution, verification and statement extraction.
mod decode;
mod dom;
mod extract;
mod normalize;
mod resolve;
mod types;
mod verify;

pub use decode::{decode_page, DecodedPage};
pub use dom::{
    find_all, find_first, has_class, is_tag, text_content, text_content_excluding, DomNode,
    HtmlNode, OwnedNode,
};
pub use extract::{extract, extract_from_tree, formatted_text};
pub use normalize::{convert_latex, latex_rules, normalize, LatexRule, LatexStage};
pub use resolve::{index_range, parse_problem_code, resolve, resolve_contest};
pub use types::{
    ContestProblem, ProblemContent, ProblemCoordinate, ProblemMetadata, Submission, TestCase,
};
pub use verify::{
    attempt_summary, is_solved, solved_coordinates, AttemptSummary, ACCEPTED_VERDICT,
};
