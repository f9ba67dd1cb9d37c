//! Browser implementation of session side effects.
//!
//! Confirmations go through `window.alert`; downloads build a `Blob`, point
//! a temporary anchor at its object URL and click it.

use js_sys::{Array, Uint8Array};
use quire_editor_core::{ExportArtifact, PlatformError, SessionPlatform};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// How long an object URL stays alive after the download click.
///
/// Some browsers start reading the blob after the click handler returns, so
/// the URL cannot be revoked synchronously.
const REVOKE_DELAY_MS: u32 = 40_000;

fn js_err(e: JsValue) -> PlatformError {
    PlatformError(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// Browser-backed [`SessionPlatform`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPlatform;

impl BrowserPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl SessionPlatform for BrowserPlatform {
    fn acknowledge(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            tracing::warn!("no window for alert: {message}");
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            tracing::warn!("alert failed: {:?}", e);
        }
    }

    fn download(&self, artifact: &ExportArtifact) -> Result<(), PlatformError> {
        let blob = artifact_blob(artifact)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let result = click_download_link(&url, &artifact.filename);

        gloo_timers::callback::Timeout::new(REVOKE_DELAY_MS, move || {
            if let Err(e) = Url::revoke_object_url(&url) {
                tracing::debug!("revoke object url failed: {:?}", e);
            }
        })
        .forget();

        if result.is_ok() {
            tracing::debug!(
                filename = %artifact.filename,
                bytes = artifact.len(),
                "download started"
            );
        }
        result
    }
}

/// Wrap artifact bytes in a `Blob` tagged with the artifact's media type.
pub fn artifact_blob(artifact: &ExportArtifact) -> Result<Blob, PlatformError> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(&artifact.bytes[..]));

    let opts = BlobPropertyBag::new();
    opts.set_type(artifact.media_type());
    Blob::new_with_u8_array_sequence_and_options(&parts, &opts).map_err(js_err)
}

fn click_download_link(url: &str, filename: &str) -> Result<(), PlatformError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| PlatformError::from("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| PlatformError::from("no document body"))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| PlatformError::from("created element is not an anchor"))?;
    anchor.set_href(url);
    anchor.set_download(filename);
    anchor.style().set_property("display", "none").map_err(js_err)?;

    body.append_child(&anchor).map_err(js_err)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_err)?;
    Ok(())
}
