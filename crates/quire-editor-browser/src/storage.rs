//! LocalStorage persistence for the document snapshot.
//!
//! The value is stored as the raw content string, not JSON-encoded, so
//! anything else reading the key sees the markup as-is.

use quire_editor_core::{ContentStore, SmolStr, StoreError};
use wasm_bindgen::{JsCast, JsValue};

/// `window.localStorage`-backed content store.
///
/// Holds no state of its own; each call goes to the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }
}

fn local_storage() -> Result<web_sys::Storage, StoreError> {
    let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(StoreError::Unavailable("localStorage is disabled".into())),
        Err(e) => Err(StoreError::Unavailable(js_error_message(&e))),
    }
}

fn js_error_message(e: &JsValue) -> String {
    if let Some(dom) = e.dyn_ref::<web_sys::DomException>() {
        format!("{}: {}", dom.name(), dom.message())
    } else {
        e.as_string().unwrap_or_else(|| format!("{:?}", e))
    }
}

fn is_quota_error(e: &JsValue) -> bool {
    e.dyn_ref::<web_sys::DomException>()
        .map(|dom| {
            // Firefox reports its own name for the same condition.
            matches!(
                dom.name().as_str(),
                "QuotaExceededError" | "NS_ERROR_DOM_QUOTA_REACHED"
            )
        })
        .unwrap_or(false)
}

impl ContentStore for LocalStore {
    fn load(&self, key: &str) -> Option<String> {
        let storage = match local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!(key, "treating snapshot as absent: {e}");
                return None;
            }
        };
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, "localStorage read failed: {}", js_error_message(&e));
                None
            }
        }
    }

    fn save(&mut self, key: &str, content: &str) -> Result<(), StoreError> {
        let storage = local_storage()?;
        storage.set_item(key, content).map_err(|e| {
            if is_quota_error(&e) {
                StoreError::QuotaExceeded {
                    key: SmolStr::new(key),
                    bytes: content.len(),
                }
            } else {
                StoreError::Write(js_error_message(&e))
            }
        })
    }
}
