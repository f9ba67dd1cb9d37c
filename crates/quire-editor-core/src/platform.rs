//! Platform abstraction traits for session side effects.
//!
//! These traits define the interface between the session logic and the
//! platform that hosts it (browser DOM, native shell, test double). The
//! session decides *what* to show or hand out; the platform decides *how*.

use crate::export::ExportArtifact;

/// Error type for platform operations.
#[derive(Debug, Clone)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Platform-specific user feedback and file delivery.
///
/// The browser implementation uses `window.alert` and a Blob download;
/// tests record the calls instead.
pub trait SessionPlatform {
    /// Show a blocking confirmation to the user.
    fn acknowledge(&self, message: &str);

    /// Hand an export artifact to the platform's save-file flow.
    ///
    /// Once this returns `Ok` the download is out of the session's hands;
    /// there is no cancellation.
    fn download(&self, artifact: &ExportArtifact) -> Result<(), PlatformError>;
}
