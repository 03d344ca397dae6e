//! Deterministic renderer for the markdown subset the prompts request.
//!
//! The grammar is deliberately small — headings, `**bold**`, unordered
//! lists, paragraphs — because the prompts only ever ask for those
//! constructs. The transform is an explicit two-stage pipeline:
//!
//! 1. **Inline pass** — HTML-escape the raw text, then a single global
//!    `**bold**` substitution (not recursive, not nested-safe).
//! 2. **Block pass** — a line-oriented scan with explicit list-open state:
//!    consecutive list lines group into one list block, any non-list or
//!    empty line closes it.
//!
//! Both passes are pure functions of their input, so rendering is
//! deterministic: the same markdown yields byte-identical markup on every
//! run. [`to_plain_text`] applies the same block structure but strips all
//! markup, producing the text used for copy-to-clipboard and `.txt` export.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// One block-level fragment of rendered output, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `level` is the raw count of leading `#` characters.
    Heading { level: usize, text: String },
    /// One grouped run of consecutive list items.
    List(Vec<String>),
    Paragraph(String),
}

impl Block {
    /// Visual heading level: one deeper than the marker, capped at `<h6>`.
    fn heading_tag_level(level: usize) -> usize {
        (level + 1).min(6)
    }
}

/// Escape the characters HTML assigns meaning to.
///
/// Model output is untrusted; escaping before any markup is introduced is
/// what makes the rendered fragments safe to display directly.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inline pass: one global bold substitution.
fn apply_bold(input: &str) -> String {
    RE_BOLD.replace_all(input, "<strong>$1</strong>").to_string()
}

/// Inline pass for plain text: drop the markers, keep the span text.
fn strip_bold(input: &str) -> String {
    RE_BOLD.replace_all(input, "$1").to_string()
}

/// Block pass: split on newlines and group into block fragments.
///
/// Evaluated top-to-bottom with a single piece of carried state: whether a
/// list block is currently open. Empty lines produce no block but still
/// close an open list.
pub fn parse_blocks(input: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut open_list: Option<Vec<String>> = None;

    for line in input.split('\n') {
        let trimmed = line.trim();

        if let Some(rest) = list_item_text(trimmed) {
            open_list.get_or_insert_with(Vec::new).push(rest.to_string());
            continue;
        }

        // Any non-list line closes an open list before being processed.
        if let Some(items) = open_list.take() {
            blocks.push(Block::List(items));
        }

        if let Some((level, text)) = heading_parts(trimmed) {
            blocks.push(Block::Heading {
                level,
                text: text.trim().to_string(),
            });
        } else if !trimmed.is_empty() {
            blocks.push(Block::Paragraph(trimmed.to_string()));
        }
    }

    if let Some(items) = open_list {
        blocks.push(Block::List(items));
    }

    blocks
}

/// A line is a list item when it starts with `* ` or `- `.
fn list_item_text(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
}

/// A line is a heading when one or more `#` are followed by a space.
fn heading_parts(trimmed: &str) -> Option<(usize, &str)> {
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 {
        return None;
    }
    trimmed[level..].strip_prefix(' ').map(|rest| (level, rest))
}

/// Render markdown to a flat sequence of sanitised markup fragments.
pub fn render_html(markdown: &str) -> String {
    let inline = apply_bold(&escape_html(markdown));
    let mut html = String::with_capacity(inline.len() + 64);

    for block in parse_blocks(&inline) {
        match block {
            Block::Heading { level, text } => {
                let h = Block::heading_tag_level(level);
                html.push_str(&format!("<h{h}>{text}</h{h}>"));
            }
            Block::List(items) => {
                html.push_str("<ul>");
                for item in items {
                    html.push_str(&format!("<li>{item}</li>"));
                }
                html.push_str("</ul>");
            }
            Block::Paragraph(text) => {
                html.push_str(&format!("<p>{text}</p>"));
            }
        }
    }

    html
}

/// Render markdown to plain text with all markup stripped.
///
/// Headings, list items, and paragraphs each become one output line, in
/// input order. Used for copy-to-clipboard and `.txt` export.
pub fn to_plain_text(markdown: &str) -> String {
    let inline = strip_bold(markdown);
    let mut lines: Vec<String> = Vec::new();

    for block in parse_blocks(&inline) {
        match block {
            Block::Heading { text, .. } => lines.push(text),
            Block::List(items) => lines.extend(items),
            Block::Paragraph(text) => lines.push(text),
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_spans_become_strong() {
        assert_eq!(
            render_html("This is **important** stuff."),
            "<p>This is <strong>important</strong> stuff.</p>"
        );
    }

    #[test]
    fn bold_is_not_nested_safe_by_design() {
        // Lazy matching pairs the first opener with the first closer.
        assert_eq!(
            render_html("**a **b** c**"),
            "<p><strong>a </strong>b<strong> c</strong></p>"
        );
    }

    #[test]
    fn heading_levels_shift_down_and_clamp() {
        assert_eq!(render_html("# Title"), "<h2>Title</h2>");
        assert_eq!(render_html("## Section"), "<h3>Section</h3>");
        assert_eq!(render_html("##### Deep"), "<h6>Deep</h6>");
        assert_eq!(render_html("######## Deeper"), "<h6>Deeper</h6>");
    }

    #[test]
    fn hashes_without_space_are_a_paragraph() {
        assert_eq!(render_html("#hashtag"), "<p>#hashtag</p>");
    }

    #[test]
    fn consecutive_list_lines_group_into_one_block() {
        let html = render_html("* one\n- two\n* three");
        assert_eq!(html, "<ul><li>one</li><li>two</li><li>three</li></ul>");
    }

    #[test]
    fn non_list_line_closes_the_open_list() {
        let html = render_html("* one\nplain\n* two");
        assert_eq!(
            html,
            "<ul><li>one</li></ul><p>plain</p><ul><li>two</li></ul>"
        );
    }

    #[test]
    fn empty_line_closes_list_and_emits_nothing() {
        let html = render_html("* one\n\n* two");
        assert_eq!(html, "<ul><li>one</li></ul><ul><li>two</li></ul>");
    }

    #[test]
    fn list_at_end_of_input_is_closed() {
        let html = render_html("intro\n* a\n* b");
        assert!(html.ends_with("<li>b</li></ul>"));
        assert_eq!(html.matches("<ul>").count(), html.matches("</ul>").count());
    }

    #[test]
    fn hostile_input_is_escaped() {
        let html = render_html("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let md = "# Plan\n\n**Week 1**\n* read\n* practice\n\nWrap up.";
        let first = render_html(md);
        let second = render_html(md);
        assert_eq!(first, second);
    }

    #[test]
    fn mixed_document_structure() {
        let md = "## Week 1\nGet started.\n* install tools\n* read chapter 1\n\n## Week 2";
        assert_eq!(
            render_html(md),
            "<h3>Week 1</h3><p>Get started.</p>\
             <ul><li>install tools</li><li>read chapter 1</li></ul>\
             <h3>Week 2</h3>"
        );
    }

    #[test]
    fn plain_text_strips_all_markup() {
        let md = "# Summary\n**Key** point.\n* first\n* second";
        assert_eq!(to_plain_text(md), "Summary\nKey point.\nfirst\nsecond");
    }

    #[test]
    fn plain_text_of_empty_input_is_empty() {
        assert_eq!(to_plain_text(""), "");
        assert_eq!(to_plain_text("\n\n\n"), "");
    }
}
