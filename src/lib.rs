use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

mod macros;
pub mod config;
pub mod constants; // Module for constants and default values
pub mod dom;
pub mod dom_utils;
pub mod drag;
pub mod models;
pub mod opacity;
pub mod particles;
pub mod scheduler;
mod state;
pub mod surface;
pub mod timer;
pub mod ui;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, WidgetConfig};
pub use drag::{ClickResult, DragState};
pub use models::{ObjectBounds, Particle, Point};
pub use opacity::{OpacityData, OpacityMap, RasterError};
pub use surface::{IDraggableImage, IGameContainer, ParticleRemover};
pub use timer::{GlooTimerHost, ITimerHost, ManualTimer, TimeoutId};
pub use widget::Widget;

fn window_and_document() -> Result<(Window, Document), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("should have a document on window"))?;
    Ok((window, document))
}

fn mount_with(window: &Window, document: &Document, config: &WidgetConfig) -> Result<(), JsValue> {
    let mounted = ui::setup::mount(window, document, config)?;
    state::replace_mounted(Some(mounted));
    Ok(())
}

/// Auto-mount when the page carries the default markup
/// (`#draggable-item` inside `#game-container`).
fn auto_mount() {
    let (window, document) = match window_and_document() {
        Ok(pair) => pair,
        Err(_) => return,
    };
    if document.get_element_by_id(constants::DEFAULT_IMAGE_ID).is_none() {
        debug_log!("no #{} on page, waiting for mount_widget()", constants::DEFAULT_IMAGE_ID);
        return;
    }
    let config = ui::setup::resolve_config(&document, JsValue::UNDEFINED).unwrap_or_else(|e| {
        warn_log!("Ignoring inline widget config: {:?}", e);
        WidgetConfig::default()
    });
    if let Err(e) = mount_with(&window, &document, &config) {
        warn_log!("Failed to mount widget: {:?}", e);
    }
}

// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let (_, document) = window_and_document()?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(auto_mount);
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        auto_mount();
    }
    Ok(())
}

/// Mount (or re-mount) the widget.  `config` is an optional object whose
/// fields override the defaults, e.g. `{ particle_asset: "img/steam.png" }`.
#[wasm_bindgen]
pub fn mount_widget(config: JsValue) -> Result<(), JsValue> {
    let (window, document) = window_and_document()?;
    let config = ui::setup::resolve_config(&document, config)?;
    mount_with(&window, &document, &config)
}

/// Stop the steam and detach every listener.
#[wasm_bindgen]
pub fn unmount_widget() {
    state::replace_mounted(None);
}

/// Debug helper: `true` while the bowl follows the pointer.
#[wasm_bindgen]
pub fn is_dragging() -> bool {
    state::with_mounted(|m| m.widget().drag_state() == DragState::Dragging).unwrap_or(false)
}

/// Debug helper: `true` while particles are being emitted.
#[wasm_bindgen]
pub fn is_emitting() -> bool {
    state::with_mounted(|m| m.widget().is_emitting()).unwrap_or(false)
}
