//! Markup to plain text reduction for the PDF export.
//!
//! Inline formatting (bold, italic, links, ...) is dropped. Block-level
//! closing tags and `<br>` become line breaks so paragraphs and list items
//! land on their own lines. A handful of common entities are decoded.

/// Tags whose closing tag ends a line.
const BLOCK_TAGS: &[&str] = &[
    "p",
    "div",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "pre",
    "blockquote",
    "tr",
];

/// Reduce HTML-like markup to the text a reader would see.
///
/// Text without any markup is returned unchanged apart from trailing line
/// breaks. Malformed tags (a `<` without a closing `>`) are kept as text.
pub fn markup_to_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    // True while the most recent output was a `<br>` line break. The editor
    // emits `<p><br></p>` for an empty line, which should be one break.
    let mut after_br = false;
    let mut rest = markup;

    while let Some(pos) = rest.find(['<', '&']) {
        let (text, tail) = rest.split_at(pos);
        if !text.is_empty() {
            out.push_str(text);
            after_br = false;
        }

        if tail.starts_with('<') {
            let Some(end) = tail.find('>') else {
                out.push_str(tail);
                rest = "";
                break;
            };
            let (closing, name) = tag_name(&tail[1..end]);
            if name == "br" {
                out.push('\n');
                after_br = true;
            } else if closing && BLOCK_TAGS.contains(&name.as_str()) {
                if !after_br {
                    out.push('\n');
                }
                after_br = false;
            }
            rest = &tail[end + 1..];
        } else {
            let (decoded, consumed) = decode_entity(tail);
            out.push(decoded);
            after_br = false;
            rest = &tail[consumed..];
        }
    }
    out.push_str(rest);

    let trimmed_len = out.trim_end_matches(['\n', '\r']).len();
    out.truncate(trimmed_len);
    out
}

/// Split tag contents into (is closing tag, lowercase name).
fn tag_name(inner: &str) -> (bool, String) {
    let inner = inner.trim();
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let name = inner
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    (closing, name)
}

/// Decode the entity at the start of `s` (which begins with `&`).
///
/// Returns the character and the number of bytes consumed. Unknown or
/// unterminated entities decode to a literal `&`.
fn decode_entity(s: &str) -> (char, usize) {
    const MAX_ENTITY_LEN: usize = 10;

    let Some(semi) = s[1..].find(';').map(|i| i + 1) else {
        return ('&', 1);
    };
    if semi > MAX_ENTITY_LEN {
        return ('&', 1);
    }

    let body = &s[1..semi];
    let decoded = match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => body.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse::<u32>().ok(),
            };
            code.and_then(char::from_u32)
        }),
    };

    match decoded {
        Some(c) => (c, semi + 1),
        None => ('&', 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(markup_to_text("just words\nand lines"), "just words\nand lines");
    }

    #[test]
    fn test_inline_formatting_dropped() {
        assert_eq!(
            markup_to_text("<p>Some <strong>bold</strong> and <em>italic</em></p>"),
            "Some bold and italic"
        );
    }

    #[test]
    fn test_paragraphs_become_lines() {
        assert_eq!(markup_to_text("<h1>Title</h1><p>one</p><p>two</p>"), "Title\none\ntwo");
    }

    #[test]
    fn test_empty_paragraph_is_single_blank_line() {
        assert_eq!(markup_to_text("<p>a</p><p><br></p><p>b</p>"), "a\n\nb");
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            markup_to_text("<ol><li>first</li><li>second</li></ol>"),
            "first\nsecond"
        );
    }

    #[test]
    fn test_entities() {
        assert_eq!(
            markup_to_text("a &amp; b &lt;c&gt; &quot;d&quot; &#39;e&#39; &#x41;&nbsp;z"),
            "a & b <c> \"d\" 'e' A z"
        );
    }

    #[test]
    fn test_unknown_entity_kept() {
        assert_eq!(markup_to_text("fish &chips; & more"), "fish &chips; & more");
    }

    #[test]
    fn test_unterminated_tag_kept() {
        assert_eq!(markup_to_text("1 < 2 and so"), "1 < 2 and so");
    }

    #[test]
    fn test_attributes_and_self_closing() {
        assert_eq!(
            markup_to_text("<p class=\"x\">a<br/>b<img src=\"i.png\"/></p>"),
            "a\nb"
        );
    }
}
