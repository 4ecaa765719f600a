use std::collections::HashMap;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::utils::{escape_attr, escape_html};

/// A heading collected on the first rendering pass
struct Heading {
    level: u32,
    id: String,
    text: String,
}

/// Service for rendering markdown documents to HTML
pub struct MarkdownService {
    options: Options,
}

impl MarkdownService {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);
        Self { options }
    }

    /// Render a document to HTML.
    ///
    /// Headings get slug ids (duplicates suffixed with a counter), soft line
    /// breaks inside a paragraph render as hard breaks, and a paragraph
    /// consisting solely of `[TOC]` is replaced with a generated table of
    /// contents.
    pub fn render(&self, raw: &str) -> String {
        let headings = self.collect_headings(raw);
        let mut out = String::new();
        let mut idx = 0usize;

        // One writer pass over the whole event stream; heading tags are
        // rewritten to raw HTML so they carry ids
        let events = Parser::new_ext(raw, self.options).map(|ev| match ev {
            Event::Start(Tag::Heading { level, .. }) => {
                let id = headings.get(idx).map(|h| h.id.as_str()).unwrap_or("");
                let tag = format!("<h{} id=\"{}\">", heading_level_to_u32(level), escape_attr(id));
                idx += 1;
                Event::Html(tag.into())
            }
            Event::End(TagEnd::Heading(level)) => {
                Event::Html(format!("</h{}>", heading_level_to_u32(level)).into())
            }
            // Single newlines inside a paragraph become line breaks
            Event::SoftBreak => Event::HardBreak,
            other => other,
        });
        html::push_html(&mut out, events);

        if out.contains("<p>[TOC]</p>") {
            let toc = build_toc_html(&headings);
            out = out.replace("<p>[TOC]</p>", &toc);
        }
        out
    }

    /// First pass: collect heading levels, ids, and text
    fn collect_headings(&self, raw: &str) -> Vec<Heading> {
        let mut headings = Vec::new();
        let mut in_heading: Option<u32> = None;
        let mut buf = String::new();
        let mut id_counts: HashMap<String, usize> = HashMap::new();

        for ev in Parser::new_ext(raw, self.options) {
            match ev {
                Event::Start(Tag::Heading { level, .. }) => {
                    in_heading = Some(heading_level_to_u32(level));
                    buf.clear();
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(level) = in_heading.take() {
                        let mut id = slugify(&buf);
                        if id.is_empty() {
                            id = format!("h{}", level);
                        }
                        let count = id_counts.entry(id.clone()).or_insert(0);
                        if *count > 0 {
                            id = format!("{}-{}", id, *count);
                        }
                        *count += 1;
                        headings.push(Heading { level, id, text: buf.clone() });
                    }
                    buf.clear();
                }
                Event::Text(t) | Event::Code(t) => {
                    if in_heading.is_some() {
                        buf.push_str(&t);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if in_heading.is_some() {
                        buf.push(' ');
                    }
                }
                _ => {}
            }
        }
        headings
    }
}

impl Default for MarkdownService {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the nested list emitted in place of a `[TOC]` directive
fn build_toc_html(headings: &[Heading]) -> String {
    if headings.is_empty() {
        return String::new();
    }
    let mut html = String::new();
    html.push_str("<nav class=\"toc\"><div class=\"toc-title\">Contents</div>");
    let mut current = 0u32;
    for heading in headings {
        if heading.level < 1 || heading.level > 6 {
            continue;
        }
        while current < heading.level {
            html.push_str("<ul>");
            current += 1;
        }
        while current > heading.level {
            html.push_str("</ul>");
            current -= 1;
        }
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a></li>",
            escape_attr(&heading.id),
            escape_html(&heading.text)
        ));
    }
    while current > 0 {
        html.push_str("</ul>");
        current -= 1;
    }
    html.push_str("</nav>");
    html
}

fn heading_level_to_u32(level: HeadingLevel) -> u32 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Create a URL-friendly slug from heading text
fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_dash = false;
    for ch in text.chars() {
        let c = ch.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_dash = false;
        } else if c.is_ascii_whitespace() || c == '-' || c == '_' {
            if !last_dash && !out.is_empty() {
                out.push('-');
                last_dash = true;
            }
        }
    }
    if out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_heading_with_slug_id() {
        let html = MarkdownService::new().render("# Hi\n");
        assert_eq!(html.trim_end(), "<h1 id=\"hi\">Hi</h1>");
    }

    #[test]
    fn duplicate_headings_get_distinct_ids() {
        let html = MarkdownService::new().render("# Setup\n\n# Setup\n");
        assert!(html.contains("id=\"setup\""));
        assert!(html.contains("id=\"setup-1\""));
    }

    #[test]
    fn soft_breaks_render_as_line_breaks() {
        let html = MarkdownService::new().render("line one\nline two\n");
        assert!(html.contains("<br"));
    }

    #[test]
    fn toc_directive_is_replaced_with_contents() {
        let html = MarkdownService::new().render("[TOC]\n\n# First\n\n## Second\n");
        assert!(!html.contains("[TOC]"));
        assert!(html.contains("<nav class=\"toc\">"));
        assert!(html.contains("<a href=\"#first\">First</a>"));
        assert!(html.contains("<a href=\"#second\">Second</a>"));
    }

    #[test]
    fn toc_directive_without_headings_renders_empty() {
        let html = MarkdownService::new().render("[TOC]\n\njust text\n");
        assert!(!html.contains("[TOC]"));
        assert!(!html.contains("<nav"));
    }

    #[test]
    fn renders_tables() {
        let html = MarkdownService::new().render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>a</th>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn renders_fenced_code_blocks() {
        let html = MarkdownService::new().render("```rust\nfn main() {}\n```\n");
        assert!(html.contains("<pre><code"));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Hello,  World!"), "hello-world");
        assert_eq!(slugify("A_B-C"), "a-b-c");
        assert_eq!(slugify("!!!"), "");
    }
}
