//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Small wrappers for element lookup and inline positioning so the adapters
//! don't sprinkle `style().set_property(…)` calls everywhere.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use crate::px;

/// Fetch an element by id and cast it to the expected type.
///
/// Unlike a plain `get_element_by_id` this reports *which* element is
/// missing or has the wrong tag, which is what a page author needs to see.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str, expected: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("element #{} not found", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{} is not {}", id, expected)))
}

/// Write `left` / `top` inline styles.
pub fn set_position(el: &HtmlElement, left: f64, top: f64) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property("left", &px!(left))?;
    style.set_property("top", &px!(top))?;
    Ok(())
}

/// Write `width` / `height` inline styles.
pub fn set_size(el: &HtmlElement, width: f64, height: f64) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property("width", &px!(width))?;
    style.set_property("height", &px!(height))?;
    Ok(())
}

/// Best-effort human readable message of a thrown JS value.
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{:?}", err)
}
