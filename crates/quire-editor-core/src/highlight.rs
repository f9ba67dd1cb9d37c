//! Fenced code block extraction and syntax highlighting for the preview.
//!
//! Content is partitioned into plain text and code segments in one pass over
//! the ```` ```lang\n...\n``` ```` delimiter pattern. Code tagged with one of
//! the supported grammars is highlighted with syntect into classed spans;
//! anything else is shown as escaped plain code.

use std::sync::LazyLock;

use pulldown_cmark_escape::{escape_html, escape_html_body_text};
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
use regex::Regex;
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
use regex_lite::Regex;
use smol_str::SmolStr;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::error::HighlightError;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```([A-Za-z0-9_]+)?\n((?s:.*?))\n```").expect("fence pattern compiles")
});

/// A piece of document content, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text outside any fence.
    Text(String),
    /// A fenced block; `lang` is the tag after the opening fence, if any.
    Code { lang: Option<SmolStr>, body: String },
}

/// Grammars the preview highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    Css,
}

impl Language {
    /// Match a fence tag, case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "javascript" | "js" => Some(Language::JavaScript),
            "css" => Some(Language::Css),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Css => "css",
        }
    }

    /// Token syntect resolves the grammar by.
    fn syntax_token(self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::Css => "css",
        }
    }
}

/// Split content into alternating text and fenced code segments.
///
/// Empty text between adjacent fences (or at either end) is omitted, so
/// every segment carries something. Unterminated fences stay in the text.
pub fn split_fenced(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in FENCE.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut segments, &content[last..whole.start()]);
        segments.push(Segment::Code {
            lang: caps.get(1).map(|m| SmolStr::new(m.as_str())),
            body: caps.get(2).map_or("", |m| m.as_str()).to_string(),
        });
        last = whole.end();
    }
    push_text(&mut segments, &content[last..]);

    segments
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::Text(text.to_string()));
    }
}

/// Highlight `code` with the grammar for `language`.
///
/// Output is a sequence of `<span class="...">` elements; styling comes from
/// the page's stylesheet.
pub fn highlight(code: &str, language: Language) -> Result<String, HighlightError> {
    let syntax = SYNTAX_SET
        .find_syntax_by_token(language.syntax_token())
        .ok_or(HighlightError::MissingGrammar(language.name()))?;

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

/// Render segments as preview HTML.
pub fn render_segments(segments: &[Segment]) -> String {
    let mut out = String::new();

    for segment in segments {
        match segment {
            Segment::Text(text) => {
                out.push_str("<p>");
                push_escaped_text(&mut out, text);
                out.push_str("</p>\n");
            }
            Segment::Code { lang, body } => {
                out.push_str("<pre class=\"");
                if let Some(lang) = lang {
                    out.push_str("language-");
                    push_escaped_attr(&mut out, lang);
                    out.push(' ');
                }
                out.push_str("preformatted\"><code>");
                match lang.as_deref().and_then(Language::from_tag) {
                    Some(language) => match highlight(body, language) {
                        Ok(html) => out.push_str(&html),
                        Err(e) => {
                            tracing::warn!(language = language.name(), "highlight failed: {e}");
                            push_escaped_text(&mut out, body);
                        }
                    },
                    None => push_escaped_text(&mut out, body),
                }
                out.push_str("</code></pre>\n");
            }
        }
    }

    out
}

// Writing into a `String` cannot fail.
fn push_escaped_text(out: &mut String, text: &str) {
    escape_html_body_text(&mut *out, text).ok();
}

fn push_escaped_attr(out: &mut String, value: &str) {
    escape_html(&mut *out, value).ok();
}

/// Split and render in one go.
pub fn render_preview(content: &str) -> String {
    render_segments(&split_fenced(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_text_code_text() {
        let segments = split_fenced("before ```python\nCODE\n``` after");
        assert_eq!(
            segments,
            vec![
                Segment::Text("before ".into()),
                Segment::Code {
                    lang: Some("python".into()),
                    body: "CODE".into(),
                },
                Segment::Text(" after".into()),
            ]
        );
    }

    #[test]
    fn test_split_no_fences() {
        assert_eq!(
            split_fenced("<p>plain</p>"),
            vec![Segment::Text("<p>plain</p>".into())]
        );
        assert!(split_fenced("").is_empty());
    }

    #[test]
    fn test_split_untagged_and_multiline() {
        let segments = split_fenced("```\nline one\nline two\n```");
        assert_eq!(
            segments,
            vec![Segment::Code {
                lang: None,
                body: "line one\nline two".into(),
            }]
        );
    }

    #[test]
    fn test_split_adjacent_blocks() {
        let segments = split_fenced("```js\na\n``````css\nb\n```");
        assert_eq!(segments.len(), 2);
        assert!(matches!(&segments[0], Segment::Code { lang: Some(l), .. } if l == "js"));
        assert!(matches!(&segments[1], Segment::Code { lang: Some(l), .. } if l == "css"));
    }

    #[test]
    fn test_split_unterminated_fence_is_text() {
        let content = "text ```js\nnever closed";
        assert_eq!(split_fenced(content), vec![Segment::Text(content.into())]);
    }

    #[test]
    fn test_split_is_lazy() {
        let segments = split_fenced("```js\na\n```mid```js\nb\n```");
        assert_eq!(
            segments,
            vec![
                Segment::Code {
                    lang: Some("js".into()),
                    body: "a".into(),
                },
                Segment::Text("mid".into()),
                Segment::Code {
                    lang: Some("js".into()),
                    body: "b".into(),
                },
            ]
        );
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::from_tag("javascript"), Some(Language::JavaScript));
        assert_eq!(Language::from_tag("JS"), Some(Language::JavaScript));
        assert_eq!(Language::from_tag("css"), Some(Language::Css));
        assert_eq!(Language::from_tag("python"), None);
    }

    #[test]
    fn test_highlight_javascript_produces_spans() {
        let html = highlight("const x = 1;\n", Language::JavaScript).unwrap();
        assert!(html.contains("<span class=\""), "got: {html}");
        assert!(html.contains("const"));
    }

    #[test]
    fn test_highlight_css_produces_spans() {
        let html = highlight("body { color: red; }\n", Language::Css).unwrap();
        assert!(html.contains("<span class=\""), "got: {html}");
        assert!(html.contains("color"));
    }

    #[test]
    fn test_render_unknown_language_is_escaped_plain() {
        let html = render_preview("```python\nif a < b:\n```");
        assert_eq!(
            html,
            "<pre class=\"language-python preformatted\"><code>if a &lt; b:</code></pre>\n"
        );
    }

    #[test]
    fn test_render_untagged_block() {
        let html = render_preview("```\nx\n```");
        assert_eq!(html, "<pre class=\"preformatted\"><code>x</code></pre>\n");
    }

    #[test]
    fn test_render_text_is_escaped() {
        let html = render_preview("a <b> & c");
        assert_eq!(html, "<p>a &lt;b&gt; &amp; c</p>\n");
    }

    #[test]
    fn test_render_highlighted_block() {
        let html = render_preview("see ```css\na { color: red; }\n```");
        assert!(html.starts_with("<p>see </p>\n<pre class=\"language-css preformatted\"><code>"));
        assert!(html.contains("<span class=\""));
        assert!(html.ends_with("</code></pre>\n"));
    }

    #[test]
    fn test_render_escapes_lang_attribute_and_body() {
        let segments = vec![
            Segment::Code {
                lang: Some("x\"><b".into()),
                body: "<b>&</b>".into(),
            },
            Segment::Text("a < b".into()),
        ];
        let html = render_segments(&segments);
        assert_eq!(
            html,
            "<pre class=\"language-x&quot;&gt;&lt;b preformatted\"><code>&lt;b&gt;&amp;&lt;/b&gt;</code></pre>\n<p>a &lt; b</p>\n"
        );
    }
}
