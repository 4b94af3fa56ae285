//! Problem statement extraction.
//!
//! Every section is looked up independently. A missing section leaves its
//! field as `None`; nothing here fails.

use scraper::Html;
use tracker_logging::{tracker_trace, tracker_warn};
use url::Url;

use crate::dom::{
    find_all, find_first, has_class, is_block_tag, is_tag, text_content, text_content_excluding,
    DomNode, HtmlNode,
};
use crate::normalize::normalize;
use crate::types::{ProblemContent, TestCase};

const TIME_LIMIT_LABEL: &str = "time limit per test";
const MEMORY_LIMIT_LABEL: &str = "memory limit per test";
const LIST_BULLET: &str = "• ";
const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif"];

/// Subsections removed from the statement container before its remaining
/// blocks are treated as the statement body.
const STRUCTURAL_SECTIONS: &[&str] = &[
    "header",
    "input-specification",
    "output-specification",
    "sample-tests",
    "note",
];

/// Parse `html` and extract the statement. Relative image URLs resolve
/// against `base_url`.
pub fn extract(html: &str, base_url: &str) -> ProblemContent {
    let document = Html::parse_document(html);
    extract_from_tree(HtmlNode::document(&document), base_url)
}

/// Extract a statement from any tree implementing [`DomNode`].
pub fn extract_from_tree<N: DomNode>(root: N, base_url: &str) -> ProblemContent {
    let base = Url::parse(base_url).ok();
    let container = find_first(&root, &|n| has_class(n, "problem-statement"));
    if container.is_none() {
        tracker_trace!("no problem-statement container; searching whole document");
    }
    let scope = container.clone().unwrap_or(root);

    ProblemContent {
        name: extract_name(&scope),
        time_limit: extract_limit(&scope, "time-limit", TIME_LIMIT_LABEL),
        memory_limit: extract_limit(&scope, "memory-limit", MEMORY_LIMIT_LABEL),
        statement: container.as_ref().map(extract_statement),
        input_format: extract_specification(&scope, "input-specification"),
        output_format: extract_specification(&scope, "output-specification"),
        notes: extract_notes(&scope),
        tests: extract_tests(&scope),
        images: extract_images(&scope, base.as_ref()),
    }
}

fn extract_name<N: DomNode>(scope: &N) -> Option<String> {
    let header = find_first(scope, &|n| has_class(n, "header"));
    let title = header
        .and_then(|h| find_first(&h, &|n| has_class(n, "title")))
        .or_else(|| find_first(scope, &|n| has_class(n, "title")));
    if title.is_none() {
        tracker_trace!("statement has no title");
    }
    title.map(|t| normalize(&text_content(&t)))
}

fn extract_limit<N: DomNode>(scope: &N, class: &str, label: &str) -> Option<String> {
    let node = find_first(scope, &|n| has_class(n, class))?;
    let text = normalize(&text_content_excluding(&node, &|n| {
        has_class(n, "property-title")
    }));
    Some(strip_label(&text, label))
}

fn strip_label(text: &str, label: &str) -> String {
    match text.get(..label.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(label) => text[label.len()..].trim().to_string(),
        _ => text.to_string(),
    }
}

fn extract_statement<N: DomNode>(container: &N) -> String {
    let paragraphs: Vec<String> = container
        .children()
        .iter()
        .filter(|child| is_tag(*child, "p"))
        .map(|p| normalize(&text_content(p)))
        .filter(|text| !text.is_empty())
        .collect();
    if !paragraphs.is_empty() {
        return paragraphs.join("\n\n");
    }
    formatted_text(container, &is_structural_section::<N>)
}

fn is_structural_section<N: DomNode>(node: &N) -> bool {
    STRUCTURAL_SECTIONS
        .iter()
        .any(|class| has_class(node, class))
}

fn extract_specification<N: DomNode>(scope: &N, class: &str) -> Option<String> {
    let node = find_first(scope, &|n| has_class(n, class))?;
    Some(normalize(&text_content_excluding(&node, &|n| {
        has_class(n, "section-title")
    })))
}

fn extract_notes<N: DomNode>(scope: &N) -> Option<String> {
    let node = find_first(scope, &|n| has_class(n, "note"))?;
    Some(formatted_text(&node, &|n| has_class(n, "section-title")))
}

/// Render the direct children of `node` as paragraphs, list items and
/// inline runs. Children for which `skip` holds are left out.
///
/// Adjacent text and inline elements form one run, so `a <b>x</b>, c`
/// stays `a x, c`.
pub fn formatted_text<N: DomNode>(node: &N, skip: &dyn Fn(&N) -> bool) -> String {
    let children: Vec<N> = node
        .children()
        .into_iter()
        .filter(|child| !skip(child))
        .collect();
    if !children.iter().any(|child| breaks_lines(child)) {
        return normalize(&text_content_excluding(node, skip));
    }

    let mut out = String::new();
    let mut run = String::new();
    for child in &children {
        let tag = child.tag_name().map(str::to_ascii_lowercase);
        match tag.as_deref() {
            Some("p") => {
                flush_run(&mut out, &mut run);
                push_block(&mut out, &normalize(&text_content(child)));
            }
            Some("div") => {
                flush_run(&mut out, &mut run);
                let text = if has_block_children(child) {
                    formatted_text(child, &|_| false)
                } else {
                    normalize(&text_content(child))
                };
                push_block(&mut out, &text);
            }
            Some("br") => {
                flush_run(&mut out, &mut run);
                out.truncate(out.trim_end_matches(' ').len());
                out.push('\n');
            }
            Some("ul" | "ol") => {
                flush_run(&mut out, &mut run);
                for item in child.children().iter().filter(|c| is_tag(*c, "li")) {
                    out.push_str(LIST_BULLET);
                    out.push_str(&normalize(&text_content(item)));
                    out.push('\n');
                }
                out.push('\n');
            }
            _ => run.push_str(&text_content(child)),
        }
    }
    flush_run(&mut out, &mut run);
    out.trim().to_string()
}

fn breaks_lines<N: DomNode>(node: &N) -> bool {
    node.tag_name().is_some_and(|tag| {
        let tag = tag.to_ascii_lowercase();
        tag == "br" || is_block_tag(&tag)
    })
}

fn flush_run(out: &mut String, run: &mut String) {
    let text = normalize(run);
    if !text.is_empty() {
        out.push_str(&text);
        out.push(' ');
    }
    run.clear();
}

fn push_block(out: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    out.push_str(text);
    out.push_str("\n\n");
}

fn has_block_children<N: DomNode>(node: &N) -> bool {
    node.children().iter().any(|child| {
        child
            .tag_name()
            .is_some_and(|tag| is_block_tag(&tag.to_ascii_lowercase()))
    })
}

fn extract_tests<N: DomNode>(scope: &N) -> Vec<TestCase> {
    let Some(samples) = find_first(scope, &|n| has_class(n, "sample-tests")) else {
        tracker_trace!("statement has no sample tests");
        return Vec::new();
    };
    let inputs = find_all(&samples, &|n| has_class(n, "input"));
    let outputs = find_all(&samples, &|n| has_class(n, "output"));
    if inputs.len() != outputs.len() {
        tracker_warn!(
            "sample block count mismatch: {} inputs, {} outputs; keeping {}",
            inputs.len(),
            outputs.len(),
            inputs.len().min(outputs.len())
        );
    }

    inputs
        .iter()
        .zip(outputs.iter())
        .map(|(input, output)| TestCase {
            input: sample_text(input),
            output: sample_text(output),
        })
        .collect()
}

/// Verbatim content of the `<pre>` inside a sample block.
fn sample_text<N: DomNode>(block: &N) -> String {
    let Some(pre) = find_first(block, &|n| is_tag(n, "pre")) else {
        return String::new();
    };
    let mut raw = String::new();
    collect_verbatim(&pre, &mut raw);
    raw.trim_end().to_string()
}

fn collect_verbatim<N: DomNode>(node: &N, out: &mut String) {
    for child in node.children() {
        if let Some(text) = child.own_text() {
            out.push_str(text);
            continue;
        }
        let tag = child.tag_name().map(str::to_ascii_lowercase);
        match tag.as_deref() {
            Some("br") => out.push('\n'),
            // Newer markup wraps each sample line in its own div.
            Some("div" | "p") => {
                collect_verbatim(&child, out);
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => collect_verbatim(&child, out),
        }
    }
}

fn extract_images<N: DomNode>(scope: &N, base: Option<&Url>) -> Vec<String> {
    let mut images: Vec<String> = Vec::new();
    for img in find_all(scope, &|n| is_tag(n, "img")) {
        let Some(url) = img.attr("src").and_then(|src| resolve_url(src, base)) else {
            continue;
        };
        if !has_image_extension(&url) {
            continue;
        }
        let url = String::from(url);
        if !images.contains(&url) {
            images.push(url);
        }
    }
    images
}

fn resolve_url(reference: &str, base: Option<&Url>) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base.and_then(|base| base.join(trimmed).ok())
}

fn has_image_extension(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
