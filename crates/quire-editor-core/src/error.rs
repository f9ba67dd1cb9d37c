//! Error types for quire editor operations.

use miette::Diagnostic;
use smol_str::SmolStr;

/// Main error type for editor session operations.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum QuireError {
    /// Persisting the snapshot failed
    #[error(transparent)]
    #[diagnostic_source]
    Store(#[from] StoreError),

    /// Building an export artifact failed
    #[error(transparent)]
    #[diagnostic_source]
    Export(#[from] ExportError),

    /// Block format registration failed
    #[error(transparent)]
    #[diagnostic_source]
    Format(#[from] FormatError),

    /// Browser/platform call failed (download, alert)
    #[error(transparent)]
    Platform(#[from] crate::platform::PlatformError),

    /// Configuration could not be parsed
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

/// Failures at the durable storage layer.
///
/// Loading never produces one of these; read failures are reported as an
/// absent snapshot instead.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// No storage backend is reachable (e.g. `localStorage` disabled).
    #[error("storage unavailable: {0}")]
    #[diagnostic(code(quire::store::unavailable))]
    Unavailable(String),

    /// The write would exceed the backend's quota.
    #[error("storage quota exceeded writing {bytes} bytes to {key:?}")]
    #[diagnostic(
        code(quire::store::quota),
        help("the document is too large for local storage; export it instead")
    )]
    QuotaExceeded { key: SmolStr, bytes: usize },

    /// Any other write failure reported by the backend.
    #[error("storage write failed: {0}")]
    #[diagnostic(code(quire::store::write))]
    Write(String),
}

/// Export encoder failures.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExportError {
    #[error("pdf rendering failed: {0}")]
    #[diagnostic(code(quire::export::pdf))]
    Pdf(String),
}

/// Block format registry failures.
#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("block format {0:?} is already registered")]
    #[diagnostic(code(quire::format::duplicate))]
    Duplicate(SmolStr),
}

/// Syntax highlighting failures. Callers degrade to plain code.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum HighlightError {
    #[error("no grammar loaded for {0}")]
    #[diagnostic(code(quire::highlight::grammar))]
    MissingGrammar(&'static str),

    #[error("highlighting failed: {0}")]
    #[diagnostic(code(quire::highlight::parse))]
    Parse(#[from] syntect::Error),
}
