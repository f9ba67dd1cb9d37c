//! Export encoders: document content to downloadable files.
//!
//! Both encoders are pure functions of the content string. The same input
//! always produces byte-identical output; nothing here reads clocks, random
//! state, or the environment.

mod pdf;
mod plain;
mod word;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::config::EditorConfig;
use crate::error::ExportError;

pub use pdf::{PdfLayout, layout_lines, to_pdf};
pub use plain::markup_to_text;
pub use word::{WORD_MEDIA_TYPE, to_word_like};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// The two supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Legacy word processor file (`.doc`) carrying the raw markup.
    Word,
    /// Single-page plain-text PDF.
    Pdf,
}

impl ExportFormat {
    pub fn media_type(self) -> &'static str {
        match self {
            ExportFormat::Word => WORD_MEDIA_TYPE,
            ExportFormat::Pdf => PDF_MEDIA_TYPE,
        }
    }
}

/// A generated file, ready to hand to the platform download.
///
/// Artifacts are never persisted by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub filename: SmolStr,
    pub bytes: Bytes,
}

impl ExportArtifact {
    pub fn media_type(&self) -> &'static str {
        self.format.media_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode `content` in the requested format with the configured filename.
pub fn export(
    format: ExportFormat,
    content: &str,
    config: &EditorConfig,
) -> Result<ExportArtifact, ExportError> {
    let (filename, bytes) = match format {
        ExportFormat::Word => (config.word_filename.clone(), to_word_like(content)),
        ExportFormat::Pdf => (config.pdf_filename.clone(), to_pdf(content, &config.pdf)?),
    };

    tracing::debug!(
        ?format,
        %filename,
        bytes = bytes.len(),
        content_len = content.len(),
        "export artifact built"
    );

    Ok(ExportArtifact {
        format,
        filename,
        bytes: Bytes::from(bytes),
    })
}
