//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::error::RenderError;

/// Marker separating a post's excerpt from the rest of its body
pub const EXCERPT_MARKER: &str = "<!-- more -->";

/// Turns a markdown body into HTML.
///
/// Implementations must be deterministic: the same input always yields
/// byte-identical output.
pub trait MarkdownRender {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(&HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            highlight: config.enable,
            line_numbers: config.line_number,
        }
    }

    fn render_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, parser_options());

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) if self.highlight => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            // Info strings may carry attributes after the language
                            let lang = lang.split_whitespace().next().unwrap_or_default();
                            (!lang.is_empty()).then(|| lang.to_string())
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) if in_code_block => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                _ if in_code_block => {}
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                lang, highlighted
            ),
            None => {
                tracing::debug!("Falling back to plain code block for '{}'", lang);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    lang,
                    html_escape(code)
                )
            }
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");
        let code_lines = lines.join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            lang, gutter, code_lines
        )
    }

    /// Split the excerpt off a body at the first `<!-- more -->` marker.
    ///
    /// Only a marker parsed as raw HTML counts, so one quoted inside code
    /// is left alone. Returns the excerpt (if the marker exists) and the
    /// body with the marker removed.
    pub fn split_excerpt(content: &str) -> (Option<String>, String) {
        match find_excerpt_marker(content) {
            Some(pos) => {
                let excerpt = content[..pos].trim().to_string();
                let rest = &content[pos + EXCERPT_MARKER.len()..];
                let full = format!("{}\n\n{}", excerpt, rest.trim());
                (Some(excerpt), full)
            }
            None => (None, content.to_string()),
        }
    }
}

// Front-matter is stripped before rendering, so YAML metadata blocks stay off
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Byte offset of the first excerpt marker that markdown sees as HTML
fn find_excerpt_marker(content: &str) -> Option<usize> {
    Parser::new_ext(content, parser_options())
        .into_offset_iter()
        .find_map(|(event, range)| match event {
            Event::Html(html) | Event::InlineHtml(html) if html.trim() == EXCERPT_MARKER => {
                content[range.clone()]
                    .find(EXCERPT_MARKER)
                    .map(|offset| range.start + offset)
            }
            _ => None,
        })
}

impl MarkdownRender for MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        Ok(self.render_html(markdown))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> MarkdownRenderer {
        MarkdownRenderer::with_options(&HighlightConfig {
            enable: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::new();
        let body = "Intro *text*.\n\n```rust\nfn main() {}\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |\n";
        let first = renderer.render(body).unwrap();
        let second = renderer.render(body).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, MarkdownRenderer::new().render(body).unwrap());
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("highlight rust"));
        assert!(html.contains("line-number"));
    }

    #[test]
    fn test_code_block_without_highlighting() {
        let html = plain().render("```rust\nlet x = 1 < 2;\n```").unwrap();
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains("1 &lt; 2"));
        assert!(!html.contains("highlight"));
    }

    #[test]
    fn test_text_after_code_block_is_kept() {
        let html = MarkdownRenderer::new()
            .render("```\ncode\n```\n\nAfter the block.")
            .unwrap();
        assert!(html.contains("<p>After the block.</p>"));
    }

    #[test]
    fn test_split_excerpt() {
        let content = "This is excerpt.\n<!-- more -->\nThis is more content.";
        let (excerpt, full) = MarkdownRenderer::split_excerpt(content);
        assert_eq!(excerpt, Some("This is excerpt.".to_string()));
        assert_eq!(full, "This is excerpt.\n\nThis is more content.");
    }

    #[test]
    fn test_split_excerpt_inline_marker() {
        let (excerpt, full) = MarkdownRenderer::split_excerpt("Lead in <!-- more --> and on.");
        assert_eq!(excerpt, Some("Lead in".to_string()));
        assert_eq!(full, "Lead in\n\nand on.");
    }

    #[test]
    fn test_marker_inside_fenced_code_is_not_split() {
        let content = "Use it like:\n\n```html\nIntro\n<!-- more -->\nRest\n```\n\nDone.";
        let (excerpt, full) = MarkdownRenderer::split_excerpt(content);
        assert_eq!(excerpt, None);
        assert_eq!(full, content);

        let html = plain().render(&full).unwrap();
        assert!(html.contains("Intro\n&lt;!-- more --&gt;\nRest\n</code>"));
    }

    #[test]
    fn test_marker_after_fenced_code_splits() {
        let content = "```\n<!-- more -->\n```\n\nTeaser.\n\n<!-- more -->\n\nBody.";
        let (excerpt, full) = MarkdownRenderer::split_excerpt(content);
        assert_eq!(
            excerpt.as_deref(),
            Some("```\n<!-- more -->\n```\n\nTeaser.")
        );
        assert!(full.ends_with("Teaser.\n\nBody."));
    }

    #[test]
    fn test_split_excerpt_without_marker() {
        let (excerpt, full) = MarkdownRenderer::split_excerpt("No marker here.");
        assert_eq!(excerpt, None);
        assert_eq!(full, "No marker here.");
    }
}
