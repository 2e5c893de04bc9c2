//! Game container adapter: origin lookup and particle element lifecycle.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlImageElement};

use crate::config::WidgetConfig;
use crate::dom_utils::{set_position, set_size};
use crate::models::{Particle, Point};
use crate::surface::{IGameContainer, ParticleRemover};

pub struct DomGameContainer {
    document: Document,
    element: HtmlElement,
    particle_asset: String,
    particle_class: String,
}

impl DomGameContainer {
    pub fn new(document: Document, element: HtmlElement, config: &WidgetConfig) -> Self {
        Self {
            document,
            element,
            particle_asset: config.particle_asset.clone(),
            particle_class: config.particle_class.clone(),
        }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn create_particle_element(&self, particle: &Particle) -> Result<HtmlImageElement, JsValue> {
        let img: HtmlImageElement = self.document.create_element("img")?.dyn_into()?;
        img.set_src(&self.particle_asset);
        img.set_alt("");
        img.set_draggable(false);
        img.set_class_name(&self.particle_class);
        img.set_attribute("aria-hidden", "true")?;

        let style = img.style();
        style.set_property("position", "absolute")?;
        style.set_property("pointer-events", "none")?;
        set_position(&img, particle.left, particle.top)?;
        set_size(&img, particle.size, particle.size)?;
        Ok(img)
    }
}

impl IGameContainer for DomGameContainer {
    fn origin(&self) -> Point {
        let rect = self.element.get_bounding_client_rect();
        Point::new(rect.left(), rect.top())
    }

    fn attach_particle(&self, particle: &Particle) -> Result<ParticleRemover, JsValue> {
        let img = self.create_particle_element(particle)?;
        self.element.append_child(&img)?;
        Ok(Box::new(move || img.remove()))
    }
}
