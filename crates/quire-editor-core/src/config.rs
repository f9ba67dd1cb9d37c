use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::export::PdfLayout;
use crate::toolbar::ToolbarConfig;

/// Storage key the snapshot lives under.
pub const DEFAULT_STORAGE_KEY: &str = "editorContent";
pub const DEFAULT_WORD_FILENAME: &str = "document.doc";
pub const DEFAULT_PDF_FILENAME: &str = "document.pdf";
pub const DEFAULT_SAVED_MESSAGE: &str = "Content saved!";

/// Editor configuration.
///
/// Every field has a default, so a partial JSON object only overrides what
/// it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// The single key the document snapshot is stored under.
    pub storage_key: SmolStr,
    /// Download name for the word processor export.
    pub word_filename: SmolStr,
    /// Download name for the PDF export.
    pub pdf_filename: SmolStr,
    /// Confirmation shown after a successful save.
    pub saved_message: SmolStr,
    pub pdf: PdfLayout,
    pub toolbar: ToolbarConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: SmolStr::new_static(DEFAULT_STORAGE_KEY),
            word_filename: SmolStr::new_static(DEFAULT_WORD_FILENAME),
            pdf_filename: SmolStr::new_static(DEFAULT_PDF_FILENAME),
            saved_message: SmolStr::new_static(DEFAULT_SAVED_MESSAGE),
            pdf: PdfLayout::default(),
            toolbar: ToolbarConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolbar::ToolbarGroup;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.storage_key, "editorContent");
        assert_eq!(config.word_filename, "document.doc");
        assert_eq!(config.pdf_filename, "document.pdf");
        assert_eq!(config.toolbar.groups.len(), 7);
    }

    #[test]
    fn test_partial_override() {
        let config =
            EditorConfig::from_json(r#"{"storage_key": "notes", "pdf": {"font_size": 12.0}}"#)
                .unwrap();
        assert_eq!(config.storage_key, "notes");
        assert_eq!(config.pdf_filename, "document.pdf");
        assert_eq!(config.pdf.font_size, 12.0);
        assert_eq!(config.pdf.page_width, PdfLayout::default().page_width);
    }

    #[test]
    fn test_toolbar_override() {
        let config = EditorConfig::from_json(r#"{"toolbar": ["code-block"]}"#).unwrap();
        assert_eq!(config.toolbar.groups, vec![ToolbarGroup::CodeBlock]);
    }

    #[test]
    fn test_invalid_json() {
        assert!(EditorConfig::from_json("{storage_key}").is_err());
    }
}
