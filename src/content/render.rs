//! Content renderer for the restricted markdown used in post bodies
//!
//! Rendering is best-effort text substitution, not a validating parser. The
//! raw text is split into lines and passed through a fixed sequence of named
//! [`Stage`]s. Each stage only claims lines that earlier stages left as plain
//! text, so structural output (headings, code fences, lists) is never
//! rewritten by a later pass. Malformed input such as an unterminated fence
//! still renders, just not as a fence.
//!
//! The output is trusted markup meant to be inserted into a page as-is. Post
//! bodies come from the developer-maintained seed, so [`Trust::Trusted`]
//! performs no sanitization; [`Trust::Untrusted`] escapes the raw text before
//! any stage runs.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const H1_CLASS: &str = "text-3xl font-bold my-6";
const H2_CLASS: &str = "text-2xl font-bold my-5";
const H3_CLASS: &str = "text-xl font-bold my-4";
const PRE_CLASS: &str = "bg-gray-100 dark:bg-gray-800 p-4 rounded-lg my-6 overflow-x-auto";
const CODE_CLASS: &str = "bg-gray-100 dark:bg-gray-800 p-1 rounded text-pink-500 dark:text-pink-300";
const LIST_CLASS: &str = "my-4";
const PARAGRAPH_CLASS: &str = "my-4";

const FENCE: &str = "```";

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"^(#{1,3}) (.*)$").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`([^`]+)`").unwrap();
    static ref UNORDERED_ITEM: Regex = Regex::new(r"^- (.*)$").unwrap();
    static ref ORDERED_ITEM: Regex = Regex::new(r"^\d+\. (.*)$").unwrap();
}

/// Whether raw post content may be inserted into a page unescaped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trust {
    /// Developer-authored content; emitted without sanitization
    #[default]
    Trusted,
    /// Anything else; HTML special characters are escaped before rendering
    Untrusted,
}

/// What a line has been turned into so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Not yet claimed by any stage
    Text,
    Heading,
    Code,
    ListItem,
    List,
    Paragraph,
}

/// One unit of text flowing through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Text as written in the post, after trust escaping
    pub source: String,
    pub kind: LineKind,
    /// Current markup for this line
    pub markup: String,
}

impl Line {
    fn text(source: &str) -> Self {
        Self {
            source: source.to_string(),
            kind: LineKind::Text,
            markup: source.to_string(),
        }
    }

    fn is_text(&self) -> bool {
        self.kind == LineKind::Text
    }
}

/// Split raw content into pipeline lines, accepting `\n` or `\r\n` endings
pub fn split_lines(raw: &str) -> Vec<Line> {
    raw.split('\n')
        .map(|line| Line::text(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

/// Join pipeline lines back into markup
pub fn join_lines(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| line.markup.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// A named transformation over pipeline lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Headings,
    CodeFences,
    InlineCode,
    ListItems,
    ListWrap,
    Paragraphs,
}

impl Stage {
    /// The default pipeline order
    pub const PIPELINE: [Stage; 6] = [
        Stage::Headings,
        Stage::CodeFences,
        Stage::InlineCode,
        Stage::ListItems,
        Stage::ListWrap,
        Stage::Paragraphs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Headings => "headings",
            Stage::CodeFences => "code-fences",
            Stage::InlineCode => "inline-code",
            Stage::ListItems => "list-items",
            Stage::ListWrap => "list-wrap",
            Stage::Paragraphs => "paragraphs",
        }
    }

    /// Run this stage over `lines`
    pub fn apply(self, lines: Vec<Line>, trust: Trust) -> Vec<Line> {
        match self {
            Stage::Headings => headings(lines),
            Stage::CodeFences => code_fences(lines),
            Stage::InlineCode => inline_code(lines),
            Stage::ListItems => list_items(lines),
            Stage::ListWrap => list_wrap(lines),
            Stage::Paragraphs => paragraphs(lines, trust),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn headings(lines: Vec<Line>) -> Vec<Line> {
    lines
        .into_iter()
        .map(|mut line| {
            if !line.is_text() {
                return line;
            }
            let heading = HEADING.captures(&line.markup).map(|caps| {
                let (tag, class) = match caps[1].len() {
                    1 => ("h1", H1_CLASS),
                    2 => ("h2", H2_CLASS),
                    _ => ("h3", H3_CLASS),
                };
                format!(r#"<{tag} class="{class}">{}</{tag}>"#, &caps[2])
            });
            if let Some(markup) = heading {
                line.markup = markup;
                line.kind = LineKind::Heading;
            }
            line
        })
        .collect()
}

fn is_fence(line: &Line) -> bool {
    line.source.starts_with(FENCE)
}

fn code_fences(lines: Vec<Line>) -> Vec<Line> {
    let mut out = Vec::with_capacity(lines.len());
    let mut iter = lines.into_iter();

    while let Some(line) = iter.next() {
        if line.kind == LineKind::Code || !is_fence(&line) {
            out.push(line);
            continue;
        }

        // Collect up to the closing fence; the language hint is dropped
        let mut body = Vec::new();
        let mut closing = None;
        for next in iter.by_ref() {
            if is_fence(&next) {
                closing = Some(next);
                break;
            }
            body.push(next);
        }

        match closing {
            Some(closing) => {
                let interior: String = body
                    .iter()
                    .map(|l| format!("{}\n", l.source))
                    .collect();
                let mut source = line.source;
                for l in &body {
                    source.push('\n');
                    source.push_str(&l.source);
                }
                source.push('\n');
                source.push_str(&closing.source);

                out.push(Line {
                    source,
                    kind: LineKind::Code,
                    markup: format!(r#"<pre class="{PRE_CLASS}"><code>{interior}</code></pre>"#),
                });
            }
            None => {
                // Unterminated fence: leave everything as it was
                out.push(line);
                out.extend(body);
            }
        }
    }

    out
}

fn inline_code(lines: Vec<Line>) -> Vec<Line> {
    let replacement = format!(r#"<code class="{CODE_CLASS}">$1</code>"#);
    lines
        .into_iter()
        .map(|mut line| {
            if line.kind != LineKind::Code && INLINE_CODE.is_match(&line.markup) {
                line.markup = INLINE_CODE
                    .replace_all(&line.markup, replacement.as_str())
                    .into_owned();
            }
            line
        })
        .collect()
}

fn list_items(lines: Vec<Line>) -> Vec<Line> {
    lines
        .into_iter()
        .map(|mut line| {
            if !line.is_text() {
                return line;
            }
            let item = if let Some(caps) = UNORDERED_ITEM.captures(&line.markup) {
                Some(format!(r#"<li class="ml-6 list-disc">{}</li>"#, &caps[1]))
            } else {
                ORDERED_ITEM
                    .captures(&line.markup)
                    .map(|caps| format!(r#"<li class="ml-6 list-decimal">{}</li>"#, &caps[1]))
            };
            if let Some(item) = item {
                line.markup = item;
                line.kind = LineKind::ListItem;
            }
            line
        })
        .collect()
}

fn list_wrap(lines: Vec<Line>) -> Vec<Line> {
    let mut out: Vec<Line> = Vec::with_capacity(lines.len());
    let mut run: Vec<Line> = Vec::new();

    let flush = |run: &mut Vec<Line>, out: &mut Vec<Line>| {
        if run.is_empty() {
            return;
        }
        let source = run
            .iter()
            .map(|l| l.source.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let items = join_lines(run);
        out.push(Line {
            source,
            kind: LineKind::List,
            markup: format!(r#"<ul class="{LIST_CLASS}">{items}</ul>"#),
        });
        run.clear();
    };

    for line in lines {
        if line.kind == LineKind::ListItem {
            run.push(line);
        } else {
            flush(&mut run, &mut out);
            out.push(line);
        }
    }
    flush(&mut run, &mut out);

    out
}

fn paragraphs(lines: Vec<Line>, trust: Trust) -> Vec<Line> {
    lines
        .into_iter()
        .map(|mut line| {
            if !line.is_text() || line.markup.trim().is_empty() || is_fence(&line) {
                return line;
            }
            // Trusted content may carry raw markup lines of its own
            if trust == Trust::Trusted && line.source.starts_with('<') {
                return line;
            }
            line.markup = format!(r#"<p class="{PARAGRAPH_CLASS}">{}</p>"#, line.markup);
            line.kind = LineKind::Paragraph;
            line
        })
        .collect()
}

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Rendered markup for one post body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fragment(String);

impl Fragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders post bodies through the staged pipeline
#[derive(Debug, Clone)]
pub struct ContentRenderer {
    stages: Vec<Stage>,
    trust: Trust,
}

impl ContentRenderer {
    /// Create a renderer with the default pipeline for trusted content
    pub fn new() -> Self {
        Self::with_trust(Trust::Trusted)
    }

    /// Create a renderer with the default pipeline and the given trust level
    pub fn with_trust(trust: Trust) -> Self {
        Self {
            stages: Stage::PIPELINE.to_vec(),
            trust,
        }
    }

    pub fn trust(&self) -> Trust {
        self.trust
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Render raw post content to a markup fragment
    pub fn render(&self, raw: &str) -> Fragment {
        let raw = match self.trust {
            Trust::Trusted => raw.to_string(),
            Trust::Untrusted => escape_html(raw),
        };

        let mut lines = split_lines(&raw);
        for stage in &self.stages {
            lines = stage.apply(lines, self.trust);
            tracing::trace!("Stage {} produced {} lines", stage, lines.len());
        }

        Fragment(join_lines(&lines))
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(raw: &str) -> String {
        ContentRenderer::new().render(raw).into_string()
    }

    fn run_stage(stage: Stage, raw: &str) -> Vec<Line> {
        stage.apply(split_lines(raw), Trust::Trusted)
    }

    #[test]
    fn test_heading_and_paragraph() {
        let html = render("# Title\n\nSome text");
        assert_eq!(
            html,
            "<h1 class=\"text-3xl font-bold my-6\">Title</h1>\n\n<p class=\"my-4\">Some text</p>"
        );
        assert_eq!(html.matches("<h1").count(), 1);
        assert_eq!(html.matches("<p ").count(), 1);
    }

    #[test]
    fn test_code_fence_is_verbatim() {
        let html = render("```\ncode here\n```");
        assert_eq!(
            html,
            format!("<pre class=\"{}\"><code>code here\n</code></pre>", PRE_CLASS)
        );
        assert!(!html.contains("<p"));
    }

    #[test]
    fn test_code_fence_interior_untouched() {
        let html = render("```bash\n# not a heading\n- not a list\nuse `tick` here\n```");
        assert!(html.contains("<code># not a heading\n- not a list\nuse `tick` here\n</code>"));
        assert!(!html.contains("<h1"));
        assert!(!html.contains("<li"));
        assert!(!html.contains("<p"));
        assert!(!html.contains("bash"));
    }

    #[test]
    fn test_unterminated_fence_is_best_effort() {
        assert_eq!(render("```"), "```");
        assert_eq!(
            render("```rust\nstill text"),
            "```rust\n<p class=\"my-4\">still text</p>"
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let html = render("## Title\r\n- a\r\n- b\r\nText\r\n");
        assert!(!html.contains('\r'));
        assert_eq!(
            html,
            format!(
                "<h2 class=\"{}\">Title</h2>\n<ul class=\"my-4\"><li class=\"ml-6 list-disc\">a</li>\n<li class=\"ml-6 list-disc\">b</li></ul>\n<p class=\"my-4\">Text</p>\n",
                H2_CLASS
            )
        );
    }

    #[test]
    fn test_heading_levels() {
        let lines = run_stage(Stage::Headings, "# A\n## B\n### C\n#### D\n#nospace");
        let kinds: Vec<_> = lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Heading,
                LineKind::Heading,
                LineKind::Heading,
                LineKind::Text,
                LineKind::Text
            ]
        );
        assert_eq!(lines[1].markup, format!("<h2 class=\"{}\">B</h2>", H2_CLASS));
        assert_eq!(lines[2].markup, format!("<h3 class=\"{}\">C</h3>", H3_CLASS));
    }

    #[test]
    fn test_inline_code_stage() {
        let lines = run_stage(Stage::InlineCode, "use `w-full` and `md:w-1/2`");
        assert_eq!(
            lines[0].markup,
            format!(
                "use <code class=\"{c}\">w-full</code> and <code class=\"{c}\">md:w-1/2</code>",
                c = CODE_CLASS
            )
        );
        assert_eq!(lines[0].kind, LineKind::Text);
    }

    #[test]
    fn test_lists_wrapped_per_run() {
        let html = render("- one\n- two\n\n1. first\n2. second");
        assert_eq!(html.matches("<ul class=\"my-4\">").count(), 2);
        assert!(html.contains(
            "<ul class=\"my-4\"><li class=\"ml-6 list-disc\">one</li>\n<li class=\"ml-6 list-disc\">two</li></ul>"
        ));
        assert!(html.contains("<li class=\"ml-6 list-decimal\">first</li>"));
        assert!(!html.contains("<p"));
    }

    #[test]
    fn test_list_item_with_inline_code() {
        let html = render("- The `next/image` component");
        assert!(html.contains(&format!(
            "<li class=\"ml-6 list-disc\">The <code class=\"{}\">next/image</code> component</li>",
            CODE_CLASS
        )));
    }

    #[test]
    fn test_numbered_heading_is_not_list() {
        let html = render("### 1. Know Your Users");
        assert_eq!(
            html,
            format!("<h3 class=\"{}\">1. Know Your Users</h3>", H3_CLASS)
        );
    }

    #[test]
    fn test_blank_lines_untouched() {
        let html = render("\nText\n   \n");
        assert_eq!(html, "\n<p class=\"my-4\">Text</p>\n   \n");
    }

    #[test]
    fn test_trusted_markup_passes_through() {
        let html = render("<div class=\"note\">hi</div>");
        assert_eq!(html, "<div class=\"note\">hi</div>");
    }

    #[test]
    fn test_untrusted_content_is_escaped() {
        let renderer = ContentRenderer::with_trust(Trust::Untrusted);
        let html = renderer.render("<script>alert(1)</script>").into_string();
        assert_eq!(
            html,
            "<p class=\"my-4\">&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_untrusted_code_fence_is_escaped() {
        let renderer = ContentRenderer::with_trust(Trust::Untrusted);
        let html = renderer.render("```html\n<div></div>\n```").into_string();
        assert!(html.contains("<code>&lt;div&gt;&lt;/div&gt;\n</code>"));
    }

    #[test]
    fn test_pipeline_order() {
        let renderer = ContentRenderer::default();
        let names: Vec<_> = renderer.stages().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "headings",
                "code-fences",
                "inline-code",
                "list-items",
                "list-wrap",
                "paragraphs"
            ]
        );
    }
}
