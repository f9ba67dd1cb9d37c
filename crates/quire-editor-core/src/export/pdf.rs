//! Single-page PDF export.
//!
//! The document is reduced to plain text and drawn line by line in the
//! built-in Courier font starting at a fixed origin. There is no wrapping and
//! no second page: whatever does not fit on the page is left out.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use serde::{Deserialize, Serialize};

use super::plain::markup_to_text;
use crate::error::ExportError;

/// Points per millimetre.
const MM: f32 = 72.0 / 25.4;

/// Horizontal advance of every Courier glyph, in text space units per em.
const COURIER_ADVANCE: f32 = 0.6;

const TAB_WIDTH: usize = 4;

/// Smallest font size and line advance a layout may use, in points.
const MIN_METRIC: f32 = 0.1;

/// Page geometry and text metrics for the PDF export. All lengths in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfLayout {
    pub page_width: f32,
    pub page_height: f32,
    /// Distance of the first glyph from the left page edge.
    pub origin_x: f32,
    /// Distance of the first baseline from the top page edge.
    pub origin_y: f32,
    pub font_size: f32,
    /// Line advance as a multiple of the font size.
    pub line_height_factor: f32,
}

impl Default for PdfLayout {
    /// A4 portrait, 16pt text, first baseline 10mm in from the top-left corner.
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            origin_x: 10.0 * MM,
            origin_y: 10.0 * MM,
            font_size: 16.0,
            line_height_factor: 1.15,
        }
    }
}

impl PdfLayout {
    /// Distance between consecutive baselines.
    pub fn leading(&self) -> f32 {
        self.font_size * self.line_height_factor
    }

    /// Characters that fit between the origin and the right page edge.
    pub fn max_columns(&self) -> usize {
        let available = self.page_width - self.origin_x;
        if available <= 0.0 {
            return 0;
        }
        (available / (COURIER_ADVANCE * self.font_size)).floor() as usize
    }

    /// Lines whose baseline lands on the page.
    pub fn max_lines(&self) -> usize {
        let available = self.page_height - self.origin_y;
        if available < 0.0 {
            return 0;
        }
        ((available / self.leading()).floor() as usize).saturating_add(1)
    }

    fn validate(&self) -> Result<(), ExportError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.font_size) {
            return Err(ExportError::Pdf(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if !positive(self.line_height_factor) {
            return Err(ExportError::Pdf(format!(
                "line height factor must be positive, got {}",
                self.line_height_factor
            )));
        }
        if self.font_size < MIN_METRIC || self.leading() < MIN_METRIC {
            return Err(ExportError::Pdf(format!(
                "font size and leading must be at least {MIN_METRIC}pt, got {} and {}",
                self.font_size,
                self.leading()
            )));
        }
        if !positive(self.page_width) || !positive(self.page_height) {
            return Err(ExportError::Pdf(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        if !self.origin_x.is_finite() || !self.origin_y.is_finite() {
            return Err(ExportError::Pdf("origin must be finite".into()));
        }
        Ok(())
    }
}

/// Cut plain text down to the lines and columns that fit on one page.
pub fn layout_lines(text: &str, layout: &PdfLayout) -> Vec<String> {
    let columns = layout.max_columns();
    text.split('\n')
        .take(layout.max_lines())
        .map(|line| {
            line.trim_end_matches('\r')
                .replace('\t', &" ".repeat(TAB_WIDTH))
                .chars()
                .take(columns)
                .collect()
        })
        .collect()
}

/// Render `content` onto a single PDF page.
///
/// Content that overflows the page is silently dropped; only an unusable
/// layout is an error.
pub fn to_pdf(content: &str, layout: &PdfLayout) -> Result<Vec<u8>, ExportError> {
    layout.validate()?;

    let text = markup_to_text(content);
    let lines = layout_lines(&text, layout);

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let font_id = Ref::new(4);
    let content_id = Ref::new(5);
    let font_name = Name(b"F1");

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, layout.page_width, layout.page_height));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().fonts().pair(font_name, font_id);
    page.finish();

    pdf.type1_font(font_id)
        .base_font(Name(b"Courier"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let mut stream = Content::new();
    let top = layout.page_height - layout.origin_y;
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let baseline = top - i as f32 * layout.leading();
        stream.begin_text();
        stream.set_font(font_name, layout.font_size);
        stream.next_line(layout.origin_x, baseline);
        stream.show(Str(&encode_win_ansi(line)));
        stream.end_text();
    }
    pdf.stream(content_id, &stream.finish());

    tracing::trace!(lines = lines.len(), "pdf page rendered");
    Ok(pdf.finish())
}

/// Encode for the WinAnsi standard font encoding.
///
/// ASCII and the Latin-1 supplement map to their own code points. The
/// typographic characters WinAnsi keeps in 0x80..=0x9F (curly quotes, dashes,
/// euro, ellipsis, ...) map through its table; anything else has no glyph in
/// the base fonts and becomes `?`.
fn encode_win_ansi(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => win_ansi_high(c).unwrap_or(b'?'),
        })
        .collect()
}

/// WinAnsi code for characters placed in the 0x80..=0x9F block.
fn win_ansi_high(c: char) -> Option<u8> {
    let code = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn test_default_layout_capacity() {
        let layout = PdfLayout::default();
        assert_eq!(layout.max_columns(), 59);
        assert_eq!(layout.max_lines(), 45);
    }

    #[test]
    fn test_pdf_header_and_text() {
        let bytes = to_pdf("<p>hello world</p>", &PdfLayout::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"/Courier"));
        assert!(contains(&bytes, b"(hello world) Tj"));
    }

    #[test]
    fn test_pdf_drops_markup() {
        let bytes = to_pdf("<p><strong>bold</strong></p>", &PdfLayout::default()).unwrap();
        assert!(contains(&bytes, b"(bold) Tj"));
        assert!(!contains(&bytes, b"strong"));
    }

    #[test]
    fn test_pdf_is_deterministic() {
        let layout = PdfLayout::default();
        let content = "<p>same input</p><p>every time</p>";
        assert_eq!(to_pdf(content, &layout).unwrap(), to_pdf(content, &layout).unwrap());
    }

    #[test]
    fn test_overflow_lines_truncated() {
        let layout = PdfLayout::default();
        let content: String = (0..200).map(|i| format!("line{i}\n")).collect();

        let bytes = to_pdf(&content, &layout).unwrap();

        assert_eq!(count(&bytes, b" Tj"), layout.max_lines());
        assert!(contains(&bytes, b"(line44) Tj"));
        assert!(!contains(&bytes, b"(line45) Tj"));
    }

    #[test]
    fn test_overflow_columns_truncated() {
        let layout = PdfLayout::default();
        let long = "x".repeat(500);
        let bytes = to_pdf(&long, &layout).unwrap();

        let kept = format!("({}) Tj", "x".repeat(layout.max_columns()));
        assert!(contains(&bytes, kept.as_bytes()));
        let too_many = format!("({}", "x".repeat(layout.max_columns() + 1));
        assert!(!contains(&bytes, too_many.as_bytes()));
    }

    #[test]
    fn test_layout_lines_keeps_blank_lines() {
        let lines = layout_lines("a\n\nb\r\n\tc", &PdfLayout::default());
        assert_eq!(lines, vec!["a", "", "b", "    c"]);
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("café"), b"caf\xE9");
        assert_eq!(encode_win_ansi("日本"), b"??");
    }

    #[test]
    fn test_win_ansi_typographic_punctuation() {
        assert_eq!(encode_win_ansi("“a” – b — c…"), b"\x93a\x94 \x96 b \x97 c\x85");
        assert_eq!(encode_win_ansi("€5 ‘x’ •"), b"\x805 \x91x\x92 \x95");
    }

    #[test]
    fn test_tiny_leading_rejected_not_panicking() {
        let config = crate::config::EditorConfig::from_json(
            r#"{"pdf": {"line_height_factor": 1e-30}}"#,
        )
        .unwrap();
        assert!(matches!(
            to_pdf("hello", &config.pdf),
            Err(ExportError::Pdf(_))
        ));

        let tiny_font = PdfLayout {
            font_size: 1e-20,
            ..PdfLayout::default()
        };
        assert!(to_pdf("hello", &tiny_font).is_err());
    }

    #[test]
    fn test_max_lines_saturates() {
        let layout = PdfLayout {
            line_height_factor: 1e-30,
            ..PdfLayout::default()
        };
        assert_eq!(layout.max_lines(), usize::MAX);
    }

    #[test]
    fn test_invalid_layout() {
        let layout = PdfLayout {
            line_height_factor: -1.0,
            ..PdfLayout::default()
        };
        assert!(to_pdf("x", &layout).is_err());
    }

    #[test]
    fn test_origin_off_page_renders_empty_page() {
        let layout = PdfLayout {
            origin_y: 2000.0,
            ..PdfLayout::default()
        };
        let bytes = to_pdf("anything", &layout).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(count(&bytes, b" Tj"), 0);
    }
}
