//! Editor session: the owner of the current document content.
//!
//! The session sits between the rich-text widget, the content store and the
//! export encoders. The widget reports the full content on every edit; the
//! session keeps it, and only touches storage or the encoders on an
//! explicit user action.

use crate::config::EditorConfig;
use crate::error::{ExportError, QuireError, StoreError};
use crate::export::{self, ExportArtifact, ExportFormat};
use crate::highlight;
use crate::platform::{PlatformError, SessionPlatform};
use crate::store::ContentStore;

/// Lifecycle of the session's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionState {
    /// Created, hydration not attempted yet.
    Empty,
    /// Content matches the last load or save.
    Loaded,
    /// Content changed since the last load or save.
    Dirty,
}

/// One page view's editing session.
pub struct EditorSession<S: ContentStore> {
    store: S,
    config: EditorConfig,
    content: String,
    state: SessionState,
}

impl<S: ContentStore> EditorSession<S> {
    pub fn new(store: S, config: EditorConfig) -> Self {
        Self {
            store,
            config,
            content: String::new(),
            state: SessionState::Empty,
        }
    }

    /// Hydrate from the stored snapshot, once.
    ///
    /// With no snapshot the content stays empty. Later calls do nothing, and
    /// so does a call after the widget has already reported an edit.
    pub fn mount(&mut self) {
        if self.state != SessionState::Empty {
            return;
        }

        match self.store.load(&self.config.storage_key) {
            Some(saved) if !saved.is_empty() => {
                tracing::debug!(
                    key = %self.config.storage_key,
                    bytes = saved.len(),
                    "hydrated from snapshot"
                );
                self.content = saved;
            }
            _ => {
                tracing::debug!(key = %self.config.storage_key, "no snapshot, starting empty");
            }
        }
        self.state = SessionState::Loaded;
    }

    /// Replace the content with the widget's latest value.
    ///
    /// A changed value before hydration marks the session dirty, so the
    /// user's content wins over the snapshot.
    pub fn on_edit(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value != self.content {
            self.content = value;
            self.state = SessionState::Dirty;
        }
    }

    /// Write the content to the store, replacing the previous snapshot.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let key = &self.config.storage_key;
        match self.store.save(key, &self.content) {
            Ok(()) => {
                tracing::debug!(key = %key, bytes = self.content.len(), "snapshot saved");
                self.state = SessionState::Loaded;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(key = %key, "snapshot save failed: {e}");
                Err(e)
            }
        }
    }

    /// Save, then show the blocking confirmation.
    ///
    /// On failure no confirmation is shown and the error is returned for the
    /// caller to surface.
    pub fn save_and_acknowledge(
        &mut self,
        platform: &impl SessionPlatform,
    ) -> Result<(), StoreError> {
        self.save()?;
        platform.acknowledge(&self.config.saved_message);
        Ok(())
    }

    /// Build an export artifact from the current content.
    pub fn export(&self, format: ExportFormat) -> Result<ExportArtifact, ExportError> {
        export::export(format, &self.content, &self.config)
    }

    /// Export and hand the artifact to the platform download.
    pub fn download(
        &self,
        format: ExportFormat,
        platform: &impl SessionPlatform,
    ) -> Result<(), QuireError> {
        let artifact = self.export(format)?;
        platform.download(&artifact).map_err(|e: PlatformError| {
            tracing::warn!(filename = %artifact.filename, "download failed: {e}");
            QuireError::from(e)
        })
    }

    /// Preview HTML with fenced code blocks highlighted.
    pub fn preview_html(&self) -> String {
        highlight::render_preview(&self.content)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> SessionState {
        self.state
    }
}
