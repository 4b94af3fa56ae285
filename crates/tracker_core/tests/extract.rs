use pretty_assertions::assert_eq;
use tracker_core::{decode_page, extract, extract_from_tree, OwnedNode, ProblemContent, TestCase};

const BASE: &str = "https://codeforces.com/contest/1/problem/A";

fn init_logging() {
    tracker_logging::initialize_for_tests();
}

const FULL_STATEMENT: &str = r#"
<html><head><title>Problem - A - Codeforces</title></head>
<body>
<img src="/logo.png">
<div class="problem-statement">
  <div class="header">
    <div class="title">A. Sum of Two</div>
    <div class="time-limit"><div class="property-title">time limit per test</div>2 seconds</div>
    <div class="memory-limit"><div class="property-title">memory limit per test</div>256 megabytes</div>
    <div class="input-file"><div class="property-title">input</div>standard input</div>
  </div>
  <div>
    <p>You are given $$$n$$$   integers.</p>
    <p>Print their sum, where $$$1 \le n \le 10^{5}$$$.</p>
    <center><img src="/predownloaded/ab/cd/figure.png" class="tex-graphics"></center>
  </div>
  <div class="input-specification"><div class="section-title">Input</div><p>The first line contains $$$n$$$.<br>The second line contains the numbers.</p></div>
  <div class="output-specification"><div class="section-title">Output</div><p>Print one integer.</p></div>
  <div class="sample-tests">
    <div class="section-title">Examples</div>
    <div class="sample-test">
      <div class="input"><div class="title">Input</div><pre>3
1 2 3
</pre></div>
      <div class="output"><div class="title">Output</div><pre>6</pre></div>
    </div>
  </div>
  <div class="note"><div class="section-title">Note</div><p>In the first test $$$1+2+3=6$$$.</p><ul><li>first</li><li>second</li></ul></div>
</div>
</body></html>
"#;

#[test]
fn full_statement_is_extracted_section_by_section() {
    init_logging();
    let content = extract(FULL_STATEMENT, BASE);

    assert_eq!(
        content,
        ProblemContent {
            name: Some("A. Sum of Two".to_string()),
            time_limit: Some("2 seconds".to_string()),
            memory_limit: Some("256 megabytes".to_string()),
            statement: Some(
                "You are given n integers.\n\nPrint their sum, where 1 <= n <= 10^5.".to_string()
            ),
            input_format: Some(
                "The first line contains n. The second line contains the numbers.".to_string()
            ),
            output_format: Some("Print one integer.".to_string()),
            notes: Some("In the first test 1+2+3=6.\n\n• first\n• second".to_string()),
            tests: vec![TestCase {
                input: "3\n1 2 3".to_string(),
                output: "6".to_string(),
            }],
            images: vec!["https://codeforces.com/predownloaded/ab/cd/figure.png".to_string()],
        }
    );
}

#[test]
fn direct_paragraphs_are_preferred_for_the_statement() {
    let html = r#"<div class="problem-statement">
        <div class="header"><div class="title">B. Pairs</div></div>
        <p>One.</p>
        <p></p>
        <p>Two $$$x$$$.</p>
        <div class="note"><div class="section-title">Note</div>ignored here</div>
    </div>"#;
    let content = extract(html, BASE);
    assert_eq!(content.statement.as_deref(), Some("One.\n\nTwo x."));
    assert_eq!(content.notes.as_deref(), Some("ignored here"));
}

#[test]
fn sample_whitespace_is_kept_verbatim_except_at_the_end() {
    let html = "<div class=\"sample-tests\">\
        <div class=\"input\"><pre>1  2\n   3 \n\n</pre></div>\
        <div class=\"output\"><pre>3<br>1 2 3<br></pre></div>\
        </div>";
    let content = extract(html, BASE);
    assert_eq!(
        content.tests,
        vec![TestCase {
            input: "1  2\n   3".to_string(),
            output: "3\n1 2 3".to_string(),
        }]
    );
}

#[test]
fn per_line_sample_markup_becomes_lines() {
    let html = r#"<div class="sample-tests"><div class="input"><pre><div class="test-example-line test-example-line-even">2</div><div class="test-example-line test-example-line-odd">5 7</div></pre></div><div class="output"><pre>12
</pre></div></div>"#;
    let content = extract(html, BASE);
    assert_eq!(content.tests[0].input, "2\n5 7");
    assert_eq!(content.tests[0].output, "12");
}

#[test]
fn unpaired_sample_blocks_are_truncated_to_the_shorter_side() {
    init_logging();
    let html = r#"<div class="sample-tests">
        <div class="input"><pre>1</pre></div>
        <div class="output"><pre>one</pre></div>
        <div class="input"><pre>2</pre></div>
    </div>"#;
    let content = extract(html, BASE);
    assert_eq!(
        content.tests,
        vec![TestCase {
            input: "1".to_string(),
            output: "one".to_string(),
        }]
    );
}

#[test]
fn missing_sections_stay_absent_and_empty_sections_stay_empty() {
    let html = r#"<div class="problem-statement"><div class="header"><div class="title">C. Empty</div></div><div class="output-specification"><div class="section-title">Output</div></div></div>"#;
    let content = extract(html, BASE);
    assert_eq!(content.name.as_deref(), Some("C. Empty"));
    assert_eq!(content.statement.as_deref(), Some(""));
    assert_eq!(content.output_format.as_deref(), Some(""));
    assert_eq!(content.input_format, None);
    assert_eq!(content.time_limit, None);
    assert_eq!(content.notes, None);
    assert!(content.tests.is_empty());
    assert!(content.images.is_empty());
}

#[test]
fn inline_markup_does_not_add_spaces() {
    let html = r#"<div class="problem-statement">
        <div class="note"><div class="section-title">Note</div>In the first test <span class="tex-span">x</span>, the answer is <b>3</b>.</div>
        <div class="legend">Read <i>both</i> lines.<p>Then answer.</p></div>
    </div>"#;
    let content = extract(html, BASE);
    assert_eq!(
        content.notes.as_deref(),
        Some("In the first test x, the answer is 3.")
    );
    assert_eq!(content.statement.as_deref(), Some("Read both lines. Then answer."));
}

#[test]
fn garbage_input_yields_an_empty_record() {
    let content = extract("<<<not really html", BASE);
    assert_eq!(content, ProblemContent::default());
}

#[test]
fn images_are_filtered_by_extension_and_deduplicated() {
    let html = r##"<div class="problem-statement">
        <img src="a.PNG"><img src="https://cdn.example.com/b.jpeg?x=1">
        <img src="a.PNG"><img src="c.svg"><img src="#frag"><img>
        <img src="d.gif">
    </div>"##;
    let content = extract(html, "https://codeforces.com/problemset/problem/1/A");
    assert_eq!(
        content.images,
        vec![
            "https://codeforces.com/problemset/problem/1/a.PNG".to_string(),
            "https://cdn.example.com/b.jpeg?x=1".to_string(),
            "https://codeforces.com/problemset/problem/1/d.gif".to_string(),
        ]
    );
}

#[test]
fn hand_built_trees_drive_the_extractor() {
    let root = OwnedNode::element("div")
        .with_class("problem-statement")
        .with_child(
            OwnedNode::element("div")
                .with_class("header")
                .with_child(OwnedNode::element("div").with_class("title").with_text("D. Mock")),
        )
        .with_child(
            OwnedNode::element("div")
                .with_child(OwnedNode::element("p").with_text("Body $$$k$$$"))
                .with_child(OwnedNode::element("br"))
                .with_child(
                    OwnedNode::element("ul")
                        .with_child(OwnedNode::element("li").with_text("x"))
                        .with_child(OwnedNode::element("li").with_text("y")),
                ),
        )
        .with_child(
            OwnedNode::element("div").with_class("sample-tests").with_child(
                OwnedNode::element("div")
                    .with_class("sample-test")
                    .with_child(
                        OwnedNode::element("div")
                            .with_class("input")
                            .with_child(OwnedNode::element("pre").with_text("3\n1 2 3\n")),
                    )
                    .with_child(
                        OwnedNode::element("div")
                            .with_class("output")
                            .with_child(OwnedNode::element("pre").with_text("6")),
                    ),
            ),
        );

    let content = extract_from_tree(&root, "");
    assert_eq!(content.name.as_deref(), Some("D. Mock"));
    assert_eq!(content.statement.as_deref(), Some("Body k\n\n\n• x\n• y"));
    assert_eq!(
        content.tests,
        vec![TestCase {
            input: "3\n1 2 3".to_string(),
            output: "6".to_string(),
        }]
    );
}

#[test]
fn decoded_bytes_feed_the_extractor() {
    let bytes = b"<div class=\"problem-statement\"><div class=\"header\"><div class=\"title\">E. Caf\xe9</div></div></div>";
    let page = decode_page(bytes, Some("text/html; charset=windows-1252"));
    assert!(!page.had_errors);
    let content = extract(&page.html, BASE);
    assert_eq!(content.name.as_deref(), Some("E. Café"));
}
