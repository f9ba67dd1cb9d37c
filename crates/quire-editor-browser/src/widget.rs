//! Binding to the Quill rich-text widget.
//!
//! Quill is expected as a global (`window.Quill`), loaded by the page before
//! the wasm module. The widget owns layout and editing; this side only feeds
//! it initial content and the toolbar, and listens for changes.

use gloo_utils::format::JsValueSerdeExt;
use quire_editor_core::{PlatformError, ToolbarConfig};
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

// === Quill binding ===

#[wasm_bindgen]
extern "C" {
    /// The global Quill editor class.
    pub type Quill;

    #[wasm_bindgen(constructor, catch)]
    fn new(container: &web_sys::Element, options: &JsValue) -> Result<Quill, JsValue>;

    /// The contenteditable element holding the document HTML.
    #[wasm_bindgen(method, getter)]
    fn root(this: &Quill) -> web_sys::HtmlElement;

    #[wasm_bindgen(method)]
    fn on(this: &Quill, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn off(this: &Quill, event: &str, handler: &js_sys::Function);
}

const TEXT_CHANGE: &str = "text-change";

/// A mounted widget and its change listener.
///
/// Dropping the handle detaches the listener; the widget's DOM stays in
/// place.
pub struct QuillWidget {
    quill: Quill,
    on_change: Closure<dyn FnMut()>,
}

impl QuillWidget {
    /// Create the widget inside the element with id `element_id`.
    ///
    /// `on_change` receives the full document HTML after every edit.
    pub fn mount(
        element_id: &str,
        toolbar: &ToolbarConfig,
        initial_html: &str,
        mut on_change: impl FnMut(String) + 'static,
    ) -> Result<Self, PlatformError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| PlatformError::from("no document"))?;
        let container = document
            .get_element_by_id(element_id)
            .ok_or_else(|| PlatformError(format!("no element with id {element_id:?}")))?;

        // Quill picks up whatever the container holds as its initial content.
        container.set_inner_html(initial_html);

        let options = json!({
            "theme": "snow",
            "modules": toolbar.to_widget_modules(),
        });
        let options = JsValue::from_serde(&options)
            .map_err(|e| PlatformError(format!("widget options: {e}")))?;
        let quill = Quill::new(&container, &options).map_err(|e| {
            PlatformError(format!(
                "Quill failed to initialise (is the script loaded?): {:?}",
                e
            ))
        })?;

        let root = quill.root();
        let on_change = Closure::<dyn FnMut()>::new(move || on_change(root.inner_html()));
        quill.on(TEXT_CHANGE, on_change.as_ref().unchecked_ref());

        tracing::debug!(element_id, "widget mounted");
        Ok(Self { quill, on_change })
    }

    /// Current document HTML.
    pub fn html(&self) -> String {
        self.quill.root().inner_html()
    }

    /// The widget's editable root element.
    pub fn root(&self) -> web_sys::HtmlElement {
        self.quill.root()
    }
}

impl Drop for QuillWidget {
    fn drop(&mut self) {
        self.quill
            .off(TEXT_CHANGE, self.on_change.as_ref().unchecked_ref());
    }
}
