//! Mounting: resolve config, build the DOM adapters, wire events, start the
//! steam.

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement, HtmlImageElement, Window};

use crate::config::WidgetConfig;
use crate::constants::{CONFIG_DATA_ATTRIBUTE, DEFAULT_CONTAINER_ID};
use crate::dom::styles::ensure_particle_styles;
use crate::dom::{DomDraggableImage, DomGameContainer};
use crate::dom_utils::element_by_id;
use crate::timer::GlooTimerHost;
use crate::ui::events::{attach_widget_listeners, ListenerSet};
use crate::widget::Widget;
use crate::{debug_log, warn_log};

/// A widget attached to the page.  Dropping it stops the spawn loop and
/// detaches every listener.
pub struct MountedWidget {
    widget: Rc<Widget>,
    _listeners: ListenerSet,
}

impl MountedWidget {
    pub fn widget(&self) -> &Widget {
        &self.widget
    }
}

impl Drop for MountedWidget {
    fn drop(&mut self) {
        self.widget.teardown();
        debug_log!("widget unmounted");
    }
}

/// Pick the configuration: an explicit JS object wins, then JSON in the
/// default container's `data-widget-config`, then the built-in defaults.
pub fn resolve_config(document: &Document, explicit: JsValue) -> Result<WidgetConfig, JsValue> {
    if !(explicit.is_undefined() || explicit.is_null()) {
        return Ok(WidgetConfig::from_js(explicit)?);
    }
    let inline = document
        .get_element_by_id(DEFAULT_CONTAINER_ID)
        .and_then(|el| el.get_attribute(CONFIG_DATA_ATTRIBUTE));
    match inline {
        Some(json) => Ok(WidgetConfig::from_json(&json)?),
        None => Ok(WidgetConfig::default()),
    }
}

pub fn mount(window: &Window, document: &Document, config: &WidgetConfig) -> Result<MountedWidget, JsValue> {
    let image_el: HtmlImageElement = element_by_id(document, &config.image_id, "an <img>")?;
    let container_el: HtmlElement = element_by_id(document, &config.container_id, "an HTML element")?;

    if config.inject_default_styles {
        if let Err(e) = ensure_particle_styles(document, &config.particle_class, config.particle_animation_ms) {
            warn_log!("could not inject particle styles: {:?}", e);
        }
    }

    let image = Rc::new(DomDraggableImage::new(document, image_el.clone())?);
    let container = Rc::new(DomGameContainer::new(document.clone(), container_el.clone(), config));
    let timer = Rc::new(GlooTimerHost::new());

    let widget = Rc::new(Widget::new(image, container, timer, config, StdRng::from_entropy()));
    let listeners = attach_widget_listeners(window, &image_el, &container_el, widget.clone())?;
    widget.start_emitting();

    debug_log!(
        "widget mounted on #{} inside #{} ({} listeners)",
        config.image_id,
        config.container_id,
        listeners.len()
    );
    Ok(MountedWidget {
        widget,
        _listeners: listeners,
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::test_support::sleep;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn unmount_still_removes_particles_in_flight() {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let host: HtmlElement = document.create_element("div").unwrap().unchecked_into();
        host.set_id("unmount-flow-container");
        let img = document.create_element("img").unwrap();
        img.set_id("unmount-flow-bowl");
        host.append_child(&img).unwrap();
        document.body().unwrap().append_child(&host).unwrap();

        let config = WidgetConfig {
            image_id: "unmount-flow-bowl".into(),
            container_id: "unmount-flow-container".into(),
            particle_animation_ms: 30,
            particle_removal_buffer_ms: 10,
            inject_default_styles: false,
            ..WidgetConfig::default()
        };
        let mounted = mount(&window, &document, &config).unwrap();
        assert!(mounted.widget().is_emitting());
        mounted.widget().spawn_particle().unwrap();
        assert_eq!(host.child_element_count(), 3);

        drop(mounted);
        sleep(150).await;
        assert_eq!(host.child_element_count(), 1);
        host.remove();
    }
}
