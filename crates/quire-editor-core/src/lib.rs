//! quire-editor-core: editor session logic without framework dependencies.
//!
//! This crate provides:
//! - `ContentStore` trait for snapshot persistence, with an in-memory store
//! - Export encoders for `.doc` and single-page PDF files
//! - `EditorSession<S>` - the controller owning the document content
//! - Fenced code block splitting and syntax highlighting for the preview
//! - Block format registry and toolbar configuration for the widget

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod highlight;
pub mod platform;
pub mod session;
pub mod store;
pub mod toolbar;

pub use config::EditorConfig;
pub use error::{ExportError, FormatError, HighlightError, QuireError, StoreError};
pub use export::{ExportArtifact, ExportFormat, PdfLayout};
pub use format::{BlockFormat, BlockNode, FormatRegistry};
pub use highlight::{Language, Segment, render_preview, split_fenced};
pub use platform::{PlatformError, SessionPlatform};
pub use session::EditorSession;
pub use smol_str::SmolStr;
pub use store::{ContentStore, MemoryStore};
pub use toolbar::{ToolbarConfig, ToolbarGroup};
