//! DOM side of block formats.
//!
//! Converts between `web_sys::Element` and the framework-neutral
//! `BlockNode`, so the capability records in the registry drive real
//! elements without subclassing anything in the widget.

use quire_editor_core::{BlockFormat, BlockNode, FormatRegistry, PlatformError, SmolStr};
use wasm_bindgen::JsCast;

fn js_err(e: wasm_bindgen::JsValue) -> PlatformError {
    PlatformError(format!("{:?}", e))
}

/// Read the parts of `element` that `format` cares about.
fn node_from_element(element: &web_sys::Element, format: &BlockFormat) -> BlockNode {
    let mut node = BlockNode::new(element.tag_name().to_ascii_lowercase());
    if let Some(value) = element.get_attribute(format.attribute_name) {
        node.set_attribute(format.attribute_name, value);
    }
    node
}

/// Write `format`'s node attributes for `value` onto an existing element.
///
/// The element keeps its tag; it must be one the format owns.
pub fn apply_block_format(
    element: &web_sys::Element,
    format: &BlockFormat,
    value: &str,
) -> Result<(), PlatformError> {
    let tag = element.tag_name();
    if !format.owns_tag(&tag) {
        return Err(PlatformError(format!(
            "format {} does not own <{}>",
            format.name,
            tag.to_ascii_lowercase()
        )));
    }
    let node = format.create(value);
    for (name, value) in &node.attributes {
        element.set_attribute(name, value).map_err(js_err)?;
    }
    Ok(())
}

/// Read `format`'s value from a DOM element.
pub fn read_block_format(format: &BlockFormat, element: &web_sys::Element) -> Option<SmolStr> {
    format.formats(&node_from_element(element, format))
}

/// Annotate every block under `root` owned by a registered format.
///
/// Returns how many elements were updated.
pub fn annotate_blocks(
    root: &web_sys::Element,
    registry: &FormatRegistry,
) -> Result<usize, PlatformError> {
    let mut changed = 0;

    for format in registry.iter() {
        let selector = format.tag_names.join(",");
        if selector.is_empty() {
            continue;
        }
        let elements = root.query_selector_all(&selector).map_err(js_err)?;
        for i in 0..elements.length() {
            let Some(element) = elements
                .item(i)
                .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            if read_block_format(format, &element).is_some() {
                continue;
            }
            let mut node = BlockNode::new(element.tag_name().to_ascii_lowercase());
            if !registry.annotate(&mut node) {
                continue;
            }
            if let Some(value) = format.formats(&node) {
                apply_block_format(&element, format, &value)?;
                changed += 1;
            }
        }
    }

    if changed > 0 {
        tracing::trace!(changed, "annotated blocks");
    }
    Ok(changed)
}
