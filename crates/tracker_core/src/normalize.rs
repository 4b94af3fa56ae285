//! Plain-text cleanup for extracted statement fields.
//!
//! LaTeX is rewritten first, then whitespace is collapsed. Formula rewriting
//! both adds and removes spaces, so the collapse has to see its output.

use std::sync::LazyLock;

use regex::Regex;

/// When a rule runs during [`convert_latex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatexStage {
    /// Math delimiters, applied once.
    Delimiter,
    /// Commands and brace groups, repeated until the text stops changing.
    Command,
    /// Leftover bare commands, deleted once at the end.
    Cleanup,
}

/// One LaTeX rewrite: every match of `pattern` is replaced by `replacement`
/// (which may reference capture groups as `${n}`).
#[derive(Debug)]
pub struct LatexRule {
    pub stage: LatexStage,
    pub pattern: Regex,
    pub replacement: &'static str,
}

use LatexStage::{Cleanup, Command, Delimiter};

/// Symbol commands capture the character after the name so that `\sum_` and
/// `\le10` match while `\leqslant` does not; the capture is put back.
const LATEX_TABLE: &[(LatexStage, &str, &str)] = &[
    // Platform markup doubles every delimiter into `$$$`.
    (Delimiter, r"\$\$\$\$\$\$", "$$$$"),
    (Delimiter, r"\$\$\$", "$$"),
    (Delimiter, r"(?s)\$\$(.+?)\$\$", "[${1}]"),
    (Delimiter, r"(?s)\$([^$]+?)\$", "${1}"),
    (Command, r"_\{([^{}]*)\}", "_${1}"),
    (Command, r"\^\{([^{}]*)\}", "^${1}"),
    (Command, r"\\leq([^A-Za-z]|$)", "<=${1}"),
    (Command, r"\\le([^A-Za-z]|$)", "<=${1}"),
    (Command, r"\\geq([^A-Za-z]|$)", ">=${1}"),
    (Command, r"\\ge([^A-Za-z]|$)", ">=${1}"),
    (Command, r"\\neq([^A-Za-z]|$)", "!=${1}"),
    (Command, r"\\ne([^A-Za-z]|$)", "!=${1}"),
    (Command, r"\\times([^A-Za-z]|$)", "×${1}"),
    (Command, r"\\cdot([^A-Za-z]|$)", "·${1}"),
    (Command, r"\\ldots([^A-Za-z]|$)", "...${1}"),
    (Command, r"\\dots([^A-Za-z]|$)", "...${1}"),
    (Command, r"\\sum([^A-Za-z]|$)", "Σ${1}"),
    (Command, r"\\prod([^A-Za-z]|$)", "Π${1}"),
    (Command, r"\\sqrt\{([^{}]*)\}", "√(${1})"),
    (Command, r"\\frac\{([^{}]*)\}\{([^{}]*)\}", "(${1}/${2})"),
    // A command directly followed by another group (`\frac{a}{...}`) is left
    // for a later pass, once the group is flat.
    (Command, r"\\[A-Za-z]+\{([^{}]*)\}([^{]|$)", "${1}${2}"),
    (Cleanup, r"\\[A-Za-z]+", ""),
];

/// Upper bound on command passes; each pass flattens one level of nesting.
const MAX_COMMAND_PASSES: usize = 32;

static LATEX_RULES: LazyLock<Vec<LatexRule>> = LazyLock::new(|| {
    LATEX_TABLE
        .iter()
        .map(|&(stage, pattern, replacement)| LatexRule {
            stage,
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        })
        .collect()
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s\u{00A0}]+").unwrap());

/// The ordered LaTeX rewrite table used by [`normalize`].
pub fn latex_rules() -> &'static [LatexRule] {
    &LATEX_RULES
}

/// Apply only the LaTeX rewrites, leaving whitespace untouched.
///
/// Delimiters are rewritten once, command rules repeat until nested groups
/// are flat, then any remaining bare command is dropped.
pub fn convert_latex(text: &str) -> String {
    let text = apply_stage(text.to_string(), LatexStage::Delimiter);

    let mut text = text;
    for _ in 0..MAX_COMMAND_PASSES {
        let next = apply_stage(text.clone(), LatexStage::Command);
        if next == text {
            break;
        }
        text = next;
    }

    apply_stage(text, LatexStage::Cleanup)
}

fn apply_stage(text: String, stage: LatexStage) -> String {
    latex_rules()
        .iter()
        .filter(|rule| rule.stage == stage)
        .fold(text, |acc, rule| {
            rule.pattern
                .replace_all(&acc, rule.replacement)
                .into_owned()
        })
}

/// Convert LaTeX to plain text, collapse whitespace, drop stray `$`, trim.
pub fn normalize(text: &str) -> String {
    let converted = convert_latex(text);
    let collapsed = WHITESPACE_RE.replace_all(&converted, " ");
    collapsed.replace('$', "").trim().to_string()
}
